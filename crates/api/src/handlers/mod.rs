//! HTTP handlers, one module per resource.

pub mod accounts;
pub mod auth;
pub mod movies;
pub mod tasks;
