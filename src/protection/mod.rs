//! Request protection middleware.
//!
//! - Rate limiting: fixed request budget per client address per window
//! - Security headers: hardened defaults applied to every response

mod headers;
mod rate_limit;

pub use headers::*;
pub use rate_limit::*;
