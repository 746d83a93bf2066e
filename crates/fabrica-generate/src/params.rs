use serde_json::{Map, Value};

use crate::errors::{FieldError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Int,
    Float,
    String,
}

/// Declared parameter of a generator method.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub key: &'static str,
    pub kind: ParamKind,
}

impl ParamSpec {
    pub const fn new(key: &'static str, kind: ParamKind) -> Self {
        Self { key, kind }
    }
}

/// Validated view over call-time keyword parameters.
#[derive(Debug)]
pub struct ParamMap<'a> {
    map: Option<&'a Map<String, Value>>,
}

/// Validate params against a method's declared spec. Unknown keys and
/// mistyped values are rejected with the offending field named.
pub fn validate_params<'a>(
    params: Option<&'a Value>,
    specs: &[ParamSpec],
    field: &str,
) -> Result<ParamMap<'a>> {
    let map = match params {
        None => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            return Err(FieldError::InvalidParams {
                field: field.to_string(),
                message: "params must be a JSON object".to_string(),
            });
        }
    };

    if let Some(map) = map {
        for (key, value) in map {
            let Some(spec) = specs.iter().find(|spec| spec.key == key.as_str()) else {
                return Err(FieldError::InvalidParams {
                    field: field.to_string(),
                    message: format!("unknown param '{key}'"),
                });
            };
            let ok = match spec.kind {
                ParamKind::Bool => value.is_boolean(),
                ParamKind::Int => value.is_i64() || value.is_u64(),
                ParamKind::Float => value.is_number(),
                ParamKind::String => value.is_string(),
            };
            if !ok {
                return Err(FieldError::InvalidParams {
                    field: field.to_string(),
                    message: format!("param '{key}' has the wrong type"),
                });
            }
        }
    }

    Ok(ParamMap { map })
}

impl<'a> ParamMap<'a> {
    pub fn i64(&self, key: &str) -> Option<i64> {
        self.map.and_then(|map| map.get(key)).and_then(Value::as_i64)
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.map.and_then(|map| map.get(key)).and_then(Value::as_f64)
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.map.and_then(|map| map.get(key)).and_then(Value::as_str)
    }

    pub fn usize(&self, key: &str) -> Option<usize> {
        self.i64(key).and_then(|value| usize::try_from(value).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SPECS: &[ParamSpec] = &[
        ParamSpec::new("min", ParamKind::Int),
        ParamSpec::new("label", ParamKind::String),
    ];

    #[test]
    fn accepts_declared_params() {
        let params = json!({"min": 3, "label": "x"});
        let map = validate_params(Some(&params), SPECS, "numeric.integer_number").unwrap();
        assert_eq!(map.i64("min"), Some(3));
        assert_eq!(map.str("label"), Some("x"));
        assert_eq!(map.i64("absent"), None);
    }

    #[test]
    fn rejects_unknown_and_mistyped_params() {
        let unknown = json!({"bogus": 1});
        let err = validate_params(Some(&unknown), SPECS, "f").unwrap_err();
        assert!(err.to_string().contains("bogus"));

        let mistyped = json!({"min": "three"});
        assert!(validate_params(Some(&mistyped), SPECS, "f").is_err());
    }

    #[test]
    fn rejects_non_object_params() {
        let params = json!([1, 2]);
        assert!(validate_params(Some(&params), SPECS, "f").is_err());
    }
}
