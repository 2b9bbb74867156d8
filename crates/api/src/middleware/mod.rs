//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the acting person, from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- requires `ADMIN` or `SUPER_ADMIN`.

pub mod auth;
pub mod rbac;
