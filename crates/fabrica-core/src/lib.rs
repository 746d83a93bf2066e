//! Core contracts for Fabrica.
//!
//! This crate defines the supported locale set, the locale dataset
//! loader with region-overlay merging, and the generated value model
//! shared by the provider and schema crates.

pub mod dataset;
pub mod error;
pub mod locale;
pub mod value;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use locale::Locale;
pub use value::FieldValue;
