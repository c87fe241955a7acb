//! Core types for Postboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod comment;
pub mod email;
pub mod id;
pub mod post;
pub mod token;
pub mod user;

pub use comment::{Comment, NewComment};
pub use email::{Email, EmailError};
pub use id::*;
pub use post::{NewPost, Post, PostPatch, PostWithComments};
pub use token::AuthToken;
pub use user::{LoginResponse, UserSummary};
