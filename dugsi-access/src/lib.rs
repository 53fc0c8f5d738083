//! Role-based page access control for Dugsi.
//!
//! A small, pure gate: an authenticated role maps to a statically
//! configured set of permitted page identifiers, and navigation is
//! allowed iff the requested page is in that set (admins everywhere,
//! no role nowhere). There is no session expiry and no per-record
//! authorization — a teacher who can open the students page sees all
//! students.

mod auth;
mod policy;
mod role;

pub use auth::{Credentials, Session};
pub use policy::AccessPolicy;
pub use role::Role;

/// Result type for access operations.
pub type AccessResult<T> = Result<T, AccessError>;

/// Errors that can occur during authentication.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The supplied password does not match the role's password.
    #[error("invalid password")]
    InvalidPassword,

    /// The supplied role name is not one of the known roles.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
