use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use fabrica_core::{Dataset, FieldValue, Locale};

use crate::errors::{FieldError, Result};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::providers::{LocaleData, Provider, TimestampFormat, no_such_method};
use crate::random::RandomStream;

const DATAFILE: &str = "datetime.json";

const METHODS: &[&str] = &[
    "year",
    "month",
    "day_of_week",
    "date",
    "time",
    "datetime",
    "timestamp",
];

const YEAR_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("minimum", ParamKind::Int),
    ParamSpec::new("maximum", ParamKind::Int),
];
const DATE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("start", ParamKind::Int),
    ParamSpec::new("end", ParamKind::Int),
];
const TIMESTAMP_PARAMS: &[ParamSpec] = &[ParamSpec::new("fmt", ParamKind::String)];

// Fixed default bounds keep output independent of the wall clock.
const DEFAULT_MIN_YEAR: i64 = 1990;
const DEFAULT_MAX_YEAR: i64 = 2035;

/// Calendar data: localized month and day names, dates and times.
pub struct DatetimeProvider {
    data: LocaleData,
}

impl DatetimeProvider {
    pub fn new(root: &Path, locale: Locale) -> Result<Self> {
        Ok(Self {
            data: LocaleData::load(root, locale, DATAFILE)?,
        })
    }

    fn random_date(&self, start: i64, end: i64, random: &mut RandomStream) -> Result<NaiveDate> {
        let drawn = random.randint(start, end);
        let year = i32::try_from(drawn).map_err(|_| FieldError::InvalidParams {
            field: "datetime.date".to_string(),
            message: format!("year out of range: {drawn}"),
        })?;
        let ordinal = random.randint(1, 365) as u32;
        NaiveDate::from_yo_opt(year, ordinal).ok_or_else(|| FieldError::InvalidParams {
            field: "datetime.date".to_string(),
            message: format!("year out of range: {year}"),
        })
    }

    fn random_datetime(&self, random: &mut RandomStream) -> Result<NaiveDateTime> {
        let date = self.random_date(DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR, random)?;
        let seconds = random.randint(0, 86_399) as u32;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or_default();
        Ok(NaiveDateTime::new(date, time))
    }
}

impl Provider for DatetimeProvider {
    fn name(&self) -> &'static str {
        "datetime"
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
            "year" => {
                let map = validate_params(params, YEAR_PARAMS, "datetime.year")?;
                let minimum = map.i64("minimum").unwrap_or(DEFAULT_MIN_YEAR);
                let maximum = map.i64("maximum").unwrap_or(DEFAULT_MAX_YEAR);
                Ok(FieldValue::Int(random.randint(minimum, maximum)))
            }
            "month" => {
                let months = self.data.dataset().strings(&["months"])?;
                Ok(FieldValue::Text(
                    random.choice(&months).cloned().unwrap_or_default(),
                ))
            }
            "day_of_week" => {
                let days = self.data.dataset().strings(&["days"])?;
                Ok(FieldValue::Text(
                    random.choice(&days).cloned().unwrap_or_default(),
                ))
            }
            "date" => {
                let map = validate_params(params, DATE_PARAMS, "datetime.date")?;
                let start = map.i64("start").unwrap_or(DEFAULT_MIN_YEAR);
                let end = map.i64("end").unwrap_or(DEFAULT_MAX_YEAR);
                let date = self.random_date(start, end, random)?;
                let format = self.data.dataset().string(&["formats", "date"])?;
                Ok(FieldValue::Text(date.format(&format).to_string()))
            }
            "time" => {
                let seconds = random.randint(0, 86_399) as u32;
                let time =
                    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or_default();
                let format = self.data.dataset().string(&["formats", "time"])?;
                Ok(FieldValue::Text(time.format(&format).to_string()))
            }
            "datetime" => {
                let value = self.random_datetime(random)?;
                Ok(FieldValue::Text(
                    value.format("%Y-%m-%dT%H:%M:%S").to_string(),
                ))
            }
            "timestamp" => {
                let map = validate_params(params, TIMESTAMP_PARAMS, "datetime.timestamp")?;
                let fmt = TimestampFormat::resolve(map.str("fmt"), "datetime.timestamp", random)?;
                let value = self.random_datetime(random)?;
                Ok(match fmt {
                    TimestampFormat::Posix => FieldValue::Int(value.and_utc().timestamp()),
                    TimestampFormat::Iso8601 => {
                        FieldValue::Text(value.format("%Y-%m-%dT%H:%M:%S").to_string())
                    }
                    TimestampFormat::Rfc3339 => {
                        FieldValue::Text(value.and_utc().to_rfc3339())
                    }
                })
            }
            other => Err(no_such_method("datetime", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::default_data_root;
    use crate::random::Seed;

    #[test]
    fn date_rejects_year_bounds_beyond_the_calendar() {
        let mut provider = DatetimeProvider::new(&default_data_root(), Locale::En).unwrap();
        let mut random = RandomStream::new(Seed::Number(6));
        let params = serde_json::json!({"start": 9_000_000_000_i64, "end": 9_000_000_000_i64});
        let err = provider.call("date", Some(&params), &mut random).unwrap_err();
        assert!(matches!(err, FieldError::InvalidParams { .. }));
        assert!(err.to_string().contains("9000000000"));
    }

    #[test]
    fn date_honors_explicit_year_bounds() {
        let mut provider = DatetimeProvider::new(&default_data_root(), Locale::En).unwrap();
        let mut random = RandomStream::new(Seed::Number(6));
        let params = serde_json::json!({"start": 2000, "end": 2000});
        let value = provider.call("date", Some(&params), &mut random).unwrap();
        assert!(value.as_str().unwrap().contains("2000"));
    }
}
