use std::path::{Path, PathBuf};

use serde_json::Value;

use fabrica_core::{Dataset, FieldValue, Locale};

use crate::errors::{FieldError, Result};
use crate::random::RandomStream;

pub mod address;
pub mod crypto;
pub mod datetime;
pub mod numeric;
pub mod payment;
pub mod person;
pub mod text;

pub use address::AddressProvider;
pub use crypto::CryptographicProvider;
pub use datetime::DatetimeProvider;
pub use numeric::NumericProvider;
pub use payment::PaymentProvider;
pub use person::PersonProvider;
pub use text::TextProvider;

/// A named capability object exposing generator methods.
///
/// Providers enumerate their methods up front; the field resolver scans
/// those static tables instead of reflecting over the object at call
/// time. Locale-dependent providers own an exclusive dataset snapshot,
/// reloaded on locale change; locale-independent providers reject
/// locale operations.
pub trait Provider {
    fn name(&self) -> &'static str;

    /// Method names in a fixed order.
    fn methods(&self) -> &'static [&'static str];

    fn locale(&self) -> Option<Locale> {
        None
    }

    /// Switch the active locale and reload the dataset from disk.
    fn set_locale(&mut self, _locale: Locale) -> Result<()> {
        Err(FieldError::LocaleIndependent {
            provider: self.name(),
        })
    }

    /// Current locale + dataset, captured for scoped override.
    fn locale_snapshot(&self) -> Option<(Locale, Dataset)> {
        None
    }

    /// Put back a snapshot captured by [`Provider::locale_snapshot`].
    fn restore_locale(&mut self, _locale: Locale, _dataset: Dataset) {}

    fn call(
        &mut self,
        method: &str,
        params: Option<&Value>,
        random: &mut RandomStream,
    ) -> Result<FieldValue>;
}

/// Locale state owned by a locale-dependent provider.
#[derive(Debug, Clone)]
pub struct LocaleData {
    root: PathBuf,
    file: &'static str,
    locale: Locale,
    dataset: Dataset,
}

impl LocaleData {
    pub fn load(root: &Path, locale: Locale, file: &'static str) -> Result<Self> {
        let dataset = Dataset::load(root, locale, file)?;
        Ok(Self {
            root: root.to_path_buf(),
            file,
            locale,
            dataset,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn reload(&mut self, locale: Locale) -> Result<()> {
        self.dataset = Dataset::load(&self.root, locale, self.file)?;
        self.locale = locale;
        Ok(())
    }

    pub fn snapshot(&self) -> (Locale, Dataset) {
        (self.locale, self.dataset.clone())
    }

    pub fn restore(&mut self, locale: Locale, dataset: Dataset) {
        self.locale = locale;
        self.dataset = dataset;
    }
}

/// Build the default provider set in registration order.
///
/// The order is the fuzzy-lookup tie-break: when two providers expose
/// the same method name, the unqualified form resolves to the earlier
/// one here. Callers needing the later one use the explicit
/// `provider.method` form.
pub fn default_providers(root: &Path, locale: Locale) -> Result<Vec<Box<dyn Provider>>> {
    Ok(vec![
        Box::new(PersonProvider::new(root, locale)?),
        Box::new(AddressProvider::new(root, locale)?),
        Box::new(TextProvider::new(root, locale)?),
        Box::new(DatetimeProvider::new(root, locale)?),
        Box::new(PaymentProvider::new()),
        Box::new(NumericProvider::new()),
        Box::new(CryptographicProvider::new()),
    ])
}

/// Default dataset root shipped with this crate.
pub fn default_data_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn no_such_method(provider: &'static str, method: &str) -> FieldError {
    FieldError::UnknownField {
        name: format!("{provider}.{method}"),
    }
}

/// Gender argument, validated as a closed set. Unset resolves to a
/// uniformly random member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: &'static [Gender] = &[Gender::Male, Gender::Female];

    pub fn key(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn resolve(value: Option<&str>, field: &str, random: &mut RandomStream) -> Result<Self> {
        match value {
            None => Ok(*random.choice(Self::ALL).unwrap_or(&Gender::Female)),
            Some("male") => Ok(Gender::Male),
            Some("female") => Ok(Gender::Female),
            Some(other) => Err(FieldError::InvalidParams {
                field: field.to_string(),
                message: format!("gender must be 'male' or 'female', got '{other}'"),
            }),
        }
    }
}

/// Timestamp rendering, validated as a closed set. Unset resolves to a
/// uniformly random member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimestampFormat {
    Posix,
    Iso8601,
    Rfc3339,
}

impl TimestampFormat {
    pub const ALL: &'static [TimestampFormat] = &[
        TimestampFormat::Posix,
        TimestampFormat::Iso8601,
        TimestampFormat::Rfc3339,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TimestampFormat::Posix => "posix",
            TimestampFormat::Iso8601 => "iso-8601",
            TimestampFormat::Rfc3339 => "rfc-3339",
        }
    }

    pub fn resolve(value: Option<&str>, field: &str, random: &mut RandomStream) -> Result<Self> {
        match value {
            None => Ok(*random.choice(Self::ALL).unwrap_or(&TimestampFormat::Posix)),
            Some("posix") => Ok(TimestampFormat::Posix),
            Some("iso-8601") => Ok(TimestampFormat::Iso8601),
            Some("rfc-3339") => Ok(TimestampFormat::Rfc3339),
            Some(other) => Err(FieldError::InvalidParams {
                field: field.to_string(),
                message: format!("unknown timestamp format '{other}'"),
            }),
        }
    }
}

/// Card network, validated as a closed set. Unset resolves to a
/// uniformly random member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardType {
    Visa,
    MasterCard,
    Amex,
}

impl CardType {
    pub const ALL: &'static [CardType] = &[CardType::Visa, CardType::MasterCard, CardType::Amex];

    pub fn key(self) -> &'static str {
        match self {
            CardType::Visa => "visa",
            CardType::MasterCard => "mastercard",
            CardType::Amex => "amex",
        }
    }

    pub fn resolve(value: Option<&str>, field: &str, random: &mut RandomStream) -> Result<Self> {
        match value {
            None => Ok(*random.choice(Self::ALL).unwrap_or(&CardType::Visa)),
            Some("visa") => Ok(CardType::Visa),
            Some("mastercard") => Ok(CardType::MasterCard),
            Some("amex") => Ok(CardType::Amex),
            Some(other) => Err(FieldError::InvalidParams {
                field: field.to_string(),
                message: format!("unknown card type '{other}'"),
            }),
        }
    }
}
