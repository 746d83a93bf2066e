use std::path::Path;

use serde_json::Value;

use fabrica_core::{Dataset, FieldValue, Locale};

use crate::errors::Result;
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::providers::{LocaleData, Provider, no_such_method};
use crate::random::RandomStream;

const DATAFILE: &str = "address.json";

const METHODS: &[&str] = &[
    "street_name",
    "street_number",
    "address",
    "city",
    "postal_code",
    "country",
    "country_code",
];

const STREET_NUMBER_PARAMS: &[ParamSpec] = &[ParamSpec::new("maximum", ParamKind::Int)];

const DEFAULT_STREET_NUMBER_MAX: i64 = 1400;

/// Postal addresses: streets, cities, postal codes.
pub struct AddressProvider {
    data: LocaleData,
}

impl AddressProvider {
    pub fn new(root: &Path, locale: Locale) -> Result<Self> {
        Ok(Self {
            data: LocaleData::load(root, locale, DATAFILE)?,
        })
    }

    fn street_name(&self, random: &mut RandomStream) -> Result<String> {
        let streets = self.data.dataset().strings(&["street_names"])?;
        Ok(random.choice(&streets).cloned().unwrap_or_default())
    }
}

impl Provider for AddressProvider {
    fn name(&self) -> &'static str {
        "address"
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
            "street_name" => Ok(FieldValue::Text(self.street_name(random)?)),
            "street_number" => {
                let map = validate_params(params, STREET_NUMBER_PARAMS, "address.street_number")?;
                let maximum = map.i64("maximum").unwrap_or(DEFAULT_STREET_NUMBER_MAX);
                Ok(FieldValue::Int(random.randint(1, maximum.max(1))))
            }
            "address" => {
                let format = self.data.dataset().string(&["address_format"])?;
                let street = self.street_name(random)?;
                let number = random.randint(1, DEFAULT_STREET_NUMBER_MAX);
                Ok(FieldValue::Text(
                    format
                        .replace("{number}", &number.to_string())
                        .replace("{street}", &street),
                ))
            }
            "city" => {
                let cities = self.data.dataset().strings(&["cities"])?;
                Ok(FieldValue::Text(
                    random.choice(&cities).cloned().unwrap_or_default(),
                ))
            }
            "postal_code" => {
                let mask = self.data.dataset().string(&["postal_code_mask"])?;
                let code: String = mask
                    .chars()
                    .map(|c| {
                        if c == '#' {
                            char::from_digit(random.randint(0, 9) as u32, 10).unwrap_or('0')
                        } else {
                            c
                        }
                    })
                    .collect();
                Ok(FieldValue::Text(code))
            }
            "country" => Ok(FieldValue::Text(self.data.dataset().string(&["country"])?)),
            "country_code" => Ok(FieldValue::Text(
                self.data.dataset().string(&["country_code"])?,
            )),
            other => Err(no_such_method("address", other)),
        }
    }
}
