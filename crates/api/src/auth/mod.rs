//! Bearer-token authentication.
//!
//! Tokens are issued by the identity provider; this crate only verifies
//! them. [`jwt::generate_access_token`] exists for tooling and tests.

pub mod jwt;
