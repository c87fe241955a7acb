//! Business logic services.
//!
//! - [`auth`] - credential matching and token minting
//! - [`blog`] - post and comment operations over the local stores

pub mod auth;
pub mod blog;

pub use auth::{AuthError, AuthService};
pub use blog::{BlogError, BlogService, Deleted};
