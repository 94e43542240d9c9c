//! Service layer: villa operations independent of the HTTP transport.
//!
//! Each operation takes the request's [`Repository`](crate::db::Repository)
//! and always returns a populated [`ApiResponse`](crate::api::ApiResponse);
//! failures never escape as `Err`.

pub mod error;
pub mod villa;

pub use error::{VillaError, VillaResult};
pub use villa::{create_villa, delete_villa, get_villa, health_check, list_villas, update_villa};
