//! Domain models persisted by the entity stores.

pub mod macros;
pub mod villa;

pub use villa::{NewVilla, Villa, VillaId};
