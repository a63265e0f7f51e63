pub mod origin;
pub mod session;

// Re-exports for convenience
pub use origin::RequestOrigin;
pub use session::{CookieSession, Transport};
