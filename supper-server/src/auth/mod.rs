//! Authentication
//!
//! - [`JwtService`] - JWT issuing and validation
//! - [`CurrentUser`] - authenticated caller, injected by [`require_auth`]
//! - [`require_auth`] / [`require_admin`] - middleware
//! - [`password`] - Argon2 hashing

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
