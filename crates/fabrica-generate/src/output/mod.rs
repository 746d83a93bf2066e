//! Thin serializers over [`crate::Schema::create`] output.

pub mod csv;
pub mod json;

pub use csv::write_csv;
pub use json::write_json;
