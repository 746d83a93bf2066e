use thiserror::Error;

/// Core error type shared across Fabrica crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The locale code is not in the supported set.
    #[error("unsupported locale: '{code}'")]
    UnsupportedLocale { code: String },
    /// The primary dataset file for a locale is absent.
    #[error("missing dataset file: {path}")]
    DatasetMissing { path: String },
    /// A dataset file exists but is not valid JSON of the expected shape.
    #[error("malformed dataset {path}: {message}")]
    DatasetFormat { path: String, message: String },
    /// A key path does not exist in a loaded dataset.
    #[error("missing dataset key: '{path}'")]
    MissingKey { path: String },
    /// Filesystem failure while reading a dataset.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results returned by Fabrica crates.
pub type Result<T> = std::result::Result<T, Error>;
