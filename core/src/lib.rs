//! Shared model of the Demesne encounter builder: catalog types, the D&D 5e API
//! transforms and the client-side encounter state.

pub mod dto;
pub mod encounter;
pub mod error;
pub mod fixtures;
pub mod transform;
pub mod types;

pub use error::{Error, Result};
