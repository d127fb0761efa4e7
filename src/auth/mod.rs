//! The auth gate in front of the expense routes.
//!
//! A request is let through if its `Authorization` header is a date such as
//! "January 02, 2006". The date is not compared with the current time.

mod middleware;
mod token;

pub use middleware::auth_guard;
pub use token::parse_token;

#[cfg(test)]
pub(crate) use token::TOKEN_FORMAT;
