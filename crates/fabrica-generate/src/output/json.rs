use std::fs;
use std::path::Path;

use crate::errors::Result;
use crate::schema::Record;

/// Write records as a pretty-printed JSON array. Returns the byte
/// count written.
pub fn write_json(path: &Path, records: &[Record]) -> Result<u64> {
    let bytes = serde_json::to_vec_pretty(records)?;
    fs::write(path, &bytes)?;
    Ok(bytes.len() as u64)
}
