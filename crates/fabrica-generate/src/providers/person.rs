use std::path::Path;

use serde_json::Value;

use fabrica_core::{Dataset, FieldValue, Locale};

use crate::errors::Result;
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::providers::{Gender, LocaleData, Provider, no_such_method};
use crate::random::RandomStream;

const DATAFILE: &str = "person.json";

const METHODS: &[&str] = &[
    "first_name",
    "last_name",
    "full_name",
    "title",
    "gender",
    "occupation",
    "email",
];

const GENDER_PARAMS: &[ParamSpec] = &[ParamSpec::new("gender", ParamKind::String)];
const EMAIL_PARAMS: &[ParamSpec] = &[ParamSpec::new("domain", ParamKind::String)];

/// Personal data: names, occupations, emails.
pub struct PersonProvider {
    data: LocaleData,
}

impl PersonProvider {
    pub fn new(root: &Path, locale: Locale) -> Result<Self> {
        Ok(Self {
            data: LocaleData::load(root, locale, DATAFILE)?,
        })
    }

    fn first_name(&self, gender: Gender, random: &mut RandomStream) -> Result<String> {
        let names = self.data.dataset().strings(&["names", gender.key()])?;
        Ok(random.choice(&names).cloned().unwrap_or_default())
    }

    fn last_name(&self, random: &mut RandomStream) -> Result<String> {
        let surnames = self.data.dataset().strings(&["surnames"])?;
        Ok(random.choice(&surnames).cloned().unwrap_or_default())
    }
}

impl Provider for PersonProvider {
    fn name(&self) -> &'static str {
        "person"
    }

    fn methods(&self) -> &'static [&'static str] {
        METHODS
    }

    fn locale(&self) -> Option<Locale> {
        Some(self.data.locale())
    }

    fn set_locale(&mut self, locale: Locale) -> Result<()> {
        self.data.reload(locale)?;
        Ok(())
    }

    fn locale_snapshot(&self) -> Option<(Locale, Dataset)> {
        Some(self.data.snapshot())
    }

    fn restore_locale(&mut self, locale: Locale, dataset: Dataset) {
        self.data.restore(locale, dataset);
    }

    fn call(
        &mut self,
        method: &str,
        params: Option<&Value>,
        random: &mut RandomStream,
    ) -> Result<FieldValue> {
        match method {
            "first_name" => {
                let map = validate_params(params, GENDER_PARAMS, "person.first_name")?;
                let gender = Gender::resolve(map.str("gender"), "person.first_name", random)?;
                Ok(FieldValue::Text(self.first_name(gender, random)?))
            }
            "last_name" => Ok(FieldValue::Text(self.last_name(random)?)),
            "full_name" => {
                let map = validate_params(params, GENDER_PARAMS, "person.full_name")?;
                let gender = Gender::resolve(map.str("gender"), "person.full_name", random)?;
                let first = self.first_name(gender, random)?;
                let last = self.last_name(random)?;
                Ok(FieldValue::Text(format!("{first} {last}")))
            }
            "title" => {
                let map = validate_params(params, GENDER_PARAMS, "person.title")?;
                let gender = Gender::resolve(map.str("gender"), "person.title", random)?;
                let titles = self.data.dataset().strings(&["titles", gender.key()])?;
                Ok(FieldValue::Text(
                    random.choice(&titles).cloned().unwrap_or_default(),
                ))
            }
            "gender" => {
                let map = validate_params(params, GENDER_PARAMS, "person.gender")?;
                let gender = Gender::resolve(map.str("gender"), "person.gender", random)?;
                let word = self.data.dataset().string(&["gender", gender.key()])?;
                Ok(FieldValue::Text(word))
            }
            "occupation" => {
                let occupations = self.data.dataset().strings(&["occupations"])?;
                Ok(FieldValue::Text(
                    random.choice(&occupations).cloned().unwrap_or_default(),
                ))
            }
            "email" => {
                let map = validate_params(params, EMAIL_PARAMS, "person.email")?;
                let gender = Gender::resolve(None, "person.email", random)?;
                let first = self.first_name(gender, random)?;
                let last = self.last_name(random)?;
                let domain = match map.str("domain") {
                    Some(domain) => domain.to_string(),
                    None => {
                        let domains = self.data.dataset().strings(&["email_domains"])?;
                        random.choice(&domains).cloned().unwrap_or_default()
                    }
                };
                let number = random.randint(1, 9999);
                Ok(FieldValue::Text(format!(
                    "{}.{}{}@{}",
                    slugify(&first),
                    slugify(&last),
                    number,
                    domain
                )))
            }
            other => Err(no_such_method("person", other)),
        }
    }
}

/// ASCII-fold a name for use in an email local part.
fn slugify(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' => Some(c),
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => Some('a'),
            'é' | 'è' | 'ê' | 'ë' => Some('e'),
            'í' | 'ì' | 'î' | 'ï' => Some('i'),
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => Some('o'),
            'ú' | 'ù' | 'û' | 'ü' => Some('u'),
            'ç' => Some('c'),
            'ñ' => Some('n'),
            'ß' => Some('s'),
            _ => {
                let lower = c.to_ascii_lowercase();
                lower.is_ascii_alphanumeric().then_some(lower)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_folds_diacritics_and_case() {
        assert_eq!(slugify("João"), "joao");
        assert_eq!(slugify("Müller"), "muller");
        assert_eq!(slugify("O'Neil"), "oneil");
    }
}
