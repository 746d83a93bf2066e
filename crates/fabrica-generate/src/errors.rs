use thiserror::Error;

/// Errors emitted by the field resolution and schema engine.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Empty or whitespace-only field name.
    #[error("field name is undefined")]
    UndefinedField,
    /// No provider method matched the field name.
    #[error("unknown field: '{name}'")]
    UnknownField { name: String },
    /// More than one delimiter in the field name.
    #[error("ambiguous field name (at most one delimiter allowed): '{name}'")]
    AmbiguousField { name: String },
    /// Explicit lookup named a provider that is not registered.
    #[error("unknown provider: '{name}'")]
    UnknownProvider { name: String },
    /// Locale override attempted on a provider without locale data.
    #[error("provider '{provider}' is locale independent")]
    LocaleIndependent { provider: &'static str },
    /// Iteration or fieldset count below 1.
    #[error("{context}: count must be at least 1")]
    NonPositiveCount { context: &'static str },
    /// A generator method rejected its call-time parameters.
    #[error("invalid params for '{field}': {message}")]
    InvalidParams { field: String, message: String },
    /// Unregistering a handler name that was never registered.
    #[error("no handler registered under '{name}'")]
    UnregisteredHandler { name: String },
    /// Handler or alias registered under an empty name.
    #[error("{context} name must be a non-empty string")]
    EmptyName { context: &'static str },
    /// `maybe` probability outside `[0, 1]`.
    #[error("probability must be within [0, 1], got {value}")]
    Probability { value: f64 },
    /// No transliteration table exists for the locale.
    #[error("no transliteration table for locale '{locale}'")]
    NoTransliteration { locale: String },
    /// Export called with no records to derive a header from.
    #[error("cannot export an empty record set")]
    EmptyExport,
    #[error(transparent)]
    Core(#[from] fabrica_core::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by the engine.
pub type Result<T> = std::result::Result<T, FieldError>;
