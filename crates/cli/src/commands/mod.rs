//! CLI command implementations.

pub mod login;
pub mod request;
pub mod seed;
