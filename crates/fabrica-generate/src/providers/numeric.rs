use serde_json::Value;

use fabrica_core::FieldValue;

use crate::errors::Result;
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::providers::{Provider, no_such_method};
use crate::random::RandomStream;

const METHODS: &[&str] = &[
    "increment",
    "integer_number",
    "float_number",
    "decimal_number",
];

const INT_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("start", ParamKind::Int),
    ParamSpec::new("end", ParamKind::Int),
];
const FLOAT_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("start", ParamKind::Float),
    ParamSpec::new("end", ParamKind::Float),
    ParamSpec::new("precision", ParamKind::Int),
];

const DEFAULT_INT_START: i64 = -1000;
const DEFAULT_INT_END: i64 = 1000;
const DEFAULT_FLOAT_START: f64 = -1000.0;
const DEFAULT_FLOAT_END: f64 = 1000.0;
const DEFAULT_PRECISION: u32 = 2;
const DECIMAL_PRECISION: u32 = 2;

/// Numbers. Locale independent; `increment` is a per-provider
/// accumulator starting at 1.
pub struct NumericProvider {
    accumulator: i64,
}

impl NumericProvider {
    pub fn new() -> Self {
        Self { accumulator: 0 }
    }
}

impl Default for NumericProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for NumericProvider {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn methods(&self) -> &'static [&'static str] {
        METHODS
    }

    fn call(
        &mut self,
        method: &str,
        params: Option<&Value>,
        random: &mut RandomStream,
    ) -> Result<FieldValue> {
        match method {
            "increment" => {
                self.accumulator += 1;
                Ok(FieldValue::Int(self.accumulator))
            }
            "integer_number" => {
                let map = validate_params(params, INT_PARAMS, "numeric.integer_number")?;
                let start = map.i64("start").unwrap_or(DEFAULT_INT_START);
                let end = map.i64("end").unwrap_or(DEFAULT_INT_END);
                Ok(FieldValue::Int(random.randint(start, end)))
            }
            "float_number" => {
                let map = validate_params(params, FLOAT_PARAMS, "numeric.float_number")?;
                let start = map.f64("start").unwrap_or(DEFAULT_FLOAT_START);
                let end = map.f64("end").unwrap_or(DEFAULT_FLOAT_END);
                let precision = map
                    .usize("precision")
                    .map(|p| p as u32)
                    .unwrap_or(DEFAULT_PRECISION);
                Ok(FieldValue::Float(random.uniform(start, end, precision)))
            }
            "decimal_number" => {
                let map = validate_params(params, INT_PARAMS, "numeric.decimal_number")?;
                let start = map.i64("start").unwrap_or(DEFAULT_INT_START) as f64;
                let end = map.i64("end").unwrap_or(DEFAULT_INT_END) as f64;
                Ok(FieldValue::Float(random.uniform(
                    start,
                    end,
                    DECIMAL_PRECISION,
                )))
            }
            other => Err(no_such_method("numeric", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Seed;

    #[test]
    fn increment_starts_at_one_and_steps_by_one() {
        let mut provider = NumericProvider::new();
        let mut random = RandomStream::new(Seed::Number(0));
        for expected in 1..=5_i64 {
            let value = provider.call("increment", None, &mut random).unwrap();
            assert_eq!(value, FieldValue::Int(expected));
        }
    }

    #[test]
    fn locale_operations_fail_on_locale_independent_provider() {
        let mut provider = NumericProvider::new();
        assert!(provider.locale().is_none());
        let err = provider.set_locale(fabrica_core::Locale::En).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::FieldError::LocaleIndependent { provider: "numeric" }
        ));
    }
}
