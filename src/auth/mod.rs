//! Authentication module
//!
//! EC3 expects `Authorization: Bearer <token>` on every request. The
//! `Authenticator` applies the configured scheme to outgoing requests.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
