use cookienet::cookies::jar::CookieJar;
use cookienet::cookies::parser::parse_set_cookie;
use cookienet::http::RequestOrigin;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use url::Url;

fn benchmark_parse(c: &mut Criterion) {
    c.bench_function("set_cookie_parse", |b| {
        b.iter(|| {
            black_box(parse_set_cookie(black_box(
                "sid=abc123; Domain=example.com; Path=/; Max-Age=3600; Secure; HttpOnly",
            )));
        })
    });

    c.bench_function("set_cookie_parse_legacy_date", |b| {
        b.iter(|| {
            black_box(parse_set_cookie(black_box(
                "legacy=1; Expires=Sunday, 06-Nov-94 08:49:37 GMT",
            )));
        })
    });
}

fn benchmark_cookie_insert(c: &mut Criterion) {
    let url = Url::parse("https://example.com").unwrap();

    c.bench_function("cookie_parse_and_save", |b| {
        let mut jar = CookieJar::new();
        b.iter(|| {
            jar.parse_and_save_cookie(black_box(&url), black_box("foo=bar; Path=/; Secure"))
                .unwrap();
        })
    });
}

fn benchmark_cookie_get(c: &mut Criterion) {
    let mut jar = CookieJar::new();
    let url = Url::parse("https://example.com/foo/bar").unwrap();
    // Pre-populate
    for i in 0..100 {
        jar.parse_and_save_cookie(&url, &format!("cookie{}=val; Path=/foo", i))
            .unwrap();
    }
    let origin = RequestOrigin::from_url(&url);

    c.bench_function("cookie_get_for_url", |b| {
        b.iter(|| {
            black_box(jar.get_cookies_for_url(black_box(&url)));
        })
    });

    c.bench_function("cookie_header_value", |b| {
        b.iter(|| {
            black_box(jar.cookie_header_value(black_box(&origin)));
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_cookie_insert,
    benchmark_cookie_get
);
criterion_main!(benches);
