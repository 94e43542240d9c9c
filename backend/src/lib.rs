//! # Villa API Backend
//!
//! CRUD service for villa listings.
//!
//! Every operation answers with the same JSON envelope
//! (`statusCode`, `isSuccess`, `errorMessages`, `result`), whether it
//! succeeded, was rejected, or hit a store fault.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: The `Villa` entity and its id type
//! - [`db`]: Entity stores, the generic repository and store configuration
//! - [`api`]: Wire DTOs, mapping and the response envelope
//! - [`services`]: Villa operations and error classification
//! - [`http`]: Axum-based HTTP server and request handlers
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
