//! Request hardening: session bootstrap, CSRF token storage, security
//! headers and the same-origin check for state-changing requests.

mod headers;
mod origin;
mod session;

pub use headers::with_security_headers;
pub use origin::require_same_origin;
pub use session::{bootstrap_session, load_context, store_flash_change};
