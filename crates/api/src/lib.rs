//! Postboard API library.
//!
//! An in-process emulation of the blog backend: HTTP-shaped requests go into a
//! [`MockApi`], which gate-checks bearer tokens, routes them to the
//! [`services::BlogService`], and hands back [`ApiResponse`] values. Nothing
//! touches the network.
//!
//! # Layers (leaves first)
//!
//! - [`storage`] - string key-value medium (in-memory or single JSON file)
//! - [`db`] - post and comment stores over that medium, plus seed data
//! - [`services`] - login and post/comment operations with simulated latency
//! - [`middleware`], [`routes`] - bearer gate, request ids, route handlers
//! - [`fetch`] - the constructible router object and request/response shapes
//! - [`client`] - session-aware typed client on top of [`MockApi`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod fetch;
pub mod ids;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

pub use client::{ApiClient, ClientError};
pub use config::{ApiConfig, ConfigError, LatencyProfile};
pub use fetch::{ApiRequest, ApiResponse, MockApi};

pub use axum::http::{Method, StatusCode};
