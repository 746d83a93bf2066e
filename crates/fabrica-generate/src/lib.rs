//! Field resolution and schema generation engine for Fabrica.
//!
//! This crate resolves string field names to generator methods across a
//! fixed set of data providers, applies optional post-processing keys,
//! and composes resolved fields into repeatable structured records with
//! bulk and streaming creation modes. Output is deterministic under a
//! fixed seed.

pub mod errors;
pub mod field;
pub mod keys;
pub mod output;
pub mod params;
pub mod providers;
pub mod random;
pub mod schema;

pub use errors::{FieldError, Result};
pub use field::FieldEngine;
pub use keys::Key;
pub use random::{RandomStream, Seed, set_global_seed};
pub use schema::{Record, Schema};
