use std::path::Path;

use serde_json::Value;

use fabrica_core::{Dataset, FieldValue, Locale};

use crate::errors::Result;
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::providers::{LocaleData, Provider, no_such_method};
use crate::random::RandomStream;

const DATAFILE: &str = "text.json";

const METHODS: &[&str] = &["word", "words", "sentence", "title", "quote"];

const WORDS_PARAMS: &[ParamSpec] = &[ParamSpec::new("quantity", ParamKind::Int)];

const DEFAULT_WORD_QUANTITY: usize = 5;

/// Dummy text: words, sentences, titles, quotes.
pub struct TextProvider {
    data: LocaleData,
}

impl TextProvider {
    pub fn new(root: &Path, locale: Locale) -> Result<Self> {
        Ok(Self {
            data: LocaleData::load(root, locale, DATAFILE)?,
        })
    }

    fn pick(&self, key: &str, random: &mut RandomStream) -> Result<String> {
        let items = self.data.dataset().strings(&[key])?;
        Ok(random.choice(&items).cloned().unwrap_or_default())
    }
}

impl Provider for TextProvider {
    fn name(&self) -> &'static str {
        "text"
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
            "word" => Ok(FieldValue::Text(self.pick("words", random)?)),
            "words" => {
                let map = validate_params(params, WORDS_PARAMS, "text.words")?;
                let quantity = map.usize("quantity").unwrap_or(DEFAULT_WORD_QUANTITY);
                let mut out = Vec::with_capacity(quantity);
                for _ in 0..quantity {
                    out.push(FieldValue::Text(self.pick("words", random)?));
                }
                Ok(FieldValue::List(out))
            }
            "sentence" => Ok(FieldValue::Text(self.pick("sentences", random)?)),
            "title" => Ok(FieldValue::Text(self.pick("titles", random)?)),
            "quote" => Ok(FieldValue::Text(self.pick("quotes", random)?)),
            other => Err(no_such_method("text", other)),
        }
    }
}
