use std::fmt;

use crate::error::{Error, Result};

/// Supported locale codes.
///
/// A locale is a two-letter primary code with an optional region suffix
/// separated by `-`. Region locales load the primary dataset first and
/// overlay their own keys on top (see [`crate::Dataset::load`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    De,
    Es,
    Pt,
    PtBr,
}

impl Locale {
    /// Every supported locale, in a fixed order.
    pub const ALL: &'static [Locale] =
        &[Locale::En, Locale::De, Locale::Es, Locale::Pt, Locale::PtBr];

    /// Validate a locale code. Unsupported codes are rejected, never
    /// silently substituted.
    pub fn parse(code: &str) -> Result<Self> {
        match code {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            "es" => Ok(Self::Es),
            "pt" => Ok(Self::Pt),
            "pt-br" => Ok(Self::PtBr),
            other => Err(Error::UnsupportedLocale {
                code: other.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Es => "es",
            Self::Pt => "pt",
            Self::PtBr => "pt-br",
        }
    }

    /// The primary locale this code falls back to. Region-less locales
    /// return themselves.
    pub fn primary(self) -> Self {
        match self {
            Self::PtBr => Self::Pt,
            other => other,
        }
    }

    /// The region suffix, if any (`pt-br` -> `br`).
    pub fn region(self) -> Option<&'static str> {
        match self {
            Self::PtBr => Some("br"),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
