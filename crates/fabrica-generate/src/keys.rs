use fabrica_core::{FieldValue, Locale};

use crate::errors::{FieldError, Result};
use crate::random::RandomStream;

/// Post-processing transform applied to a resolved field's output.
///
/// Two shapes are supported: a plain value map, and a seeded map that
/// also receives the random stream that produced the value. The engine
/// does not special-case any key; any conforming closure works.
pub enum Key {
    Map(Box<dyn Fn(FieldValue) -> FieldValue>),
    MapSeeded(Box<dyn Fn(FieldValue, &mut RandomStream) -> FieldValue>),
}

impl Key {
    pub fn map(f: impl Fn(FieldValue) -> FieldValue + 'static) -> Self {
        Key::Map(Box::new(f))
    }

    pub fn map_seeded(f: impl Fn(FieldValue, &mut RandomStream) -> FieldValue + 'static) -> Self {
        Key::MapSeeded(Box::new(f))
    }

    pub(crate) fn apply(&self, value: FieldValue, random: &mut RandomStream) -> FieldValue {
        match self {
            Key::Map(f) => f(value),
            Key::MapSeeded(f) => f(value, random),
        }
    }
}

/// Probabilistic override: keep the original value or replace it with
/// `substitute`, weighted by `probability`.
pub fn maybe(substitute: FieldValue, probability: f64) -> Result<Key> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(FieldError::Probability { value: probability });
    }
    Ok(Key::map_seeded(move |value, random| {
        if random.chance(probability) {
            substitute.clone()
        } else {
            value
        }
    }))
}

/// Lowercase every text value, recursing into lists and maps.
pub fn lowercase() -> Key {
    Key::map(|value| map_text(value, &|s| s.to_lowercase()))
}

/// Uppercase every text value, recursing into lists and maps.
pub fn uppercase() -> Key {
    Key::map(|value| map_text(value, &|s| s.to_uppercase()))
}

/// Transliterate locale-specific characters to ASCII.
///
/// Only locales that carry a transliteration table are supported;
/// others fail with [`FieldError::NoTransliteration`].
pub fn romanize(locale: Locale) -> Result<Key> {
    let table = transliteration_table(locale).ok_or_else(|| FieldError::NoTransliteration {
        locale: locale.to_string(),
    })?;
    Ok(Key::map(move |value| {
        map_text(value, &|s| transliterate(s, table))
    }))
}

type TranslitTable = &'static [(char, &'static str)];

fn transliteration_table(locale: Locale) -> Option<TranslitTable> {
    const DE: TranslitTable = &[
        ('ä', "ae"),
        ('ö', "oe"),
        ('ü', "ue"),
        ('Ä', "Ae"),
        ('Ö', "Oe"),
        ('Ü', "Ue"),
        ('ß', "ss"),
    ];
    const ES: TranslitTable = &[
        ('á', "a"),
        ('é', "e"),
        ('í', "i"),
        ('ó', "o"),
        ('ú', "u"),
        ('ü', "u"),
        ('ñ', "n"),
        ('Á', "A"),
        ('É', "E"),
        ('Í', "I"),
        ('Ó', "O"),
        ('Ú', "U"),
        ('Ñ', "N"),
    ];
    const PT: TranslitTable = &[
        ('ã', "a"),
        ('õ', "o"),
        ('á', "a"),
        ('à', "a"),
        ('â', "a"),
        ('é', "e"),
        ('ê', "e"),
        ('í', "i"),
        ('ó', "o"),
        ('ô', "o"),
        ('ú', "u"),
        ('ü', "u"),
        ('ç', "c"),
        ('Ã', "A"),
        ('Õ', "O"),
        ('Á', "A"),
        ('Â', "A"),
        ('É', "E"),
        ('Ê', "E"),
        ('Í', "I"),
        ('Ó', "O"),
        ('Ô', "O"),
        ('Ú', "U"),
        ('Ç', "C"),
    ];

    match locale {
        Locale::De => Some(DE),
        Locale::Es => Some(ES),
        Locale::Pt | Locale::PtBr => Some(PT),
        Locale::En => None,
    }
}

fn transliterate(input: &str, table: TranslitTable) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match table.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

fn map_text(value: FieldValue, f: &dyn Fn(&str) -> String) -> FieldValue {
    match value {
        FieldValue::Text(s) => FieldValue::Text(f(&s)),
        FieldValue::List(items) => {
            FieldValue::List(items.into_iter().map(|item| map_text(item, f)).collect())
        }
        FieldValue::Map(entries) => FieldValue::Map(
            entries
                .into_iter()
                .map(|(key, item)| (key, map_text(item, f)))
                .collect(),
        ),
        other => other,
    }
}
