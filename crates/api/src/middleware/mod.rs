//! Authentication and authorization extractors.
//!
//! - [`auth::CurrentAccount`] -- the access gate: resolves the account behind
//!   the `x-access-token` header.
//! - [`rbac::RequireAdmin`] -- requires an admin account.

pub mod auth;
pub mod rbac;
