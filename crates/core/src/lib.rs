//! Postboard Core - Shared types library.
//!
//! This crate provides common types used across all Postboard components:
//! - `api` - In-process blog API emulation (router, services, stores)
//! - `cli` - Command-line tools for seeding and issuing requests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP plumbing. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, auth tokens, and the post/comment records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
