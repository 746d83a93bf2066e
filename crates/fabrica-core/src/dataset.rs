use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::locale::Locale;

/// A nested key-value dataset scoped to one locale.
///
/// Datasets are read-only JSON documents addressed as
/// `{root}/{localeCode}/{file}`. Loading a region locale (`pt-br`)
/// loads the primary locale's document first, then recursively merges
/// the region document on top: region keys win at any depth, primary
/// keys absent from the overlay survive.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    locale: Locale,
    file: String,
    data: Value,
}

impl Dataset {
    /// Load the dataset for `locale` from `{root}/{code}/{file}`.
    ///
    /// The primary document is required; a region overlay is optional.
    pub fn load(root: &Path, locale: Locale, file: &str) -> Result<Self> {
        let primary_path = root.join(locale.primary().as_str()).join(file);
        let mut data = read_document(&primary_path)?.ok_or_else(|| Error::DatasetMissing {
            path: primary_path.display().to_string(),
        })?;

        if locale.region().is_some() {
            let overlay_path = root.join(locale.as_str()).join(file);
            if let Some(overlay) = read_document(&overlay_path)? {
                merge(&mut data, overlay);
                debug!(locale = %locale, file, "merged region overlay");
            }
        }

        debug!(locale = %locale, file, "dataset loaded");
        Ok(Self {
            locale,
            file: file.to_string(),
            data,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Resolve a nested key path.
    pub fn lookup(&self, keys: &[&str]) -> Result<&Value> {
        let mut current = &self.data;
        for key in keys {
            current = current.get(key).ok_or_else(|| Error::MissingKey {
                path: format!("{}:{}", self.file, keys.join(".")),
            })?;
        }
        Ok(current)
    }

    /// Resolve a key path to a list of strings.
    pub fn strings(&self, keys: &[&str]) -> Result<Vec<String>> {
        let value = self.lookup(keys)?;
        let items = value.as_array().ok_or_else(|| Error::MissingKey {
            path: format!("{}:{} (expected array)", self.file, keys.join(".")),
        })?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(|s| s.to_string())
                    .ok_or_else(|| Error::MissingKey {
                        path: format!("{}:{} (expected strings)", self.file, keys.join(".")),
                    })
            })
            .collect()
    }

    /// Resolve a key path to a single string.
    pub fn string(&self, keys: &[&str]) -> Result<String> {
        let value = self.lookup(keys)?;
        value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| Error::MissingKey {
                path: format!("{}:{} (expected string)", self.file, keys.join(".")),
            })
    }
}

fn read_document(path: &Path) -> Result<Option<Value>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(Error::Io(err)),
    };
    let value: Value = serde_json::from_str(&contents).map_err(|err| Error::DatasetFormat {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    if !value.is_object() {
        return Err(Error::DatasetFormat {
            path: path.display().to_string(),
            message: "top-level document must be an object".to_string(),
        });
    }
    Ok(Some(value))
}

/// Recursively merge `overlay` into `base`. Objects merge key-wise at
/// any depth; every other value kind is replaced wholesale.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(base_value) => merge(base_value, overlay_value),
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (base_slot, overlay_value) => *base_slot = overlay_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overrides_at_depth_and_keeps_base_keys() {
        let mut base = json!({
            "names": {"male": ["Joao"], "female": ["Maria"]},
            "surnames": ["Silva"],
            "country": "Portugal"
        });
        let overlay = json!({
            "names": {"male": ["Thiago"]},
            "country": "Brasil"
        });
        merge(&mut base, overlay);

        assert_eq!(base["names"]["male"], json!(["Thiago"]));
        assert_eq!(base["names"]["female"], json!(["Maria"]));
        assert_eq!(base["surnames"], json!(["Silva"]));
        assert_eq!(base["country"], json!("Brasil"));
    }

    #[test]
    fn merge_replaces_lists_wholesale() {
        let mut base = json!({"words": ["a", "b", "c"]});
        merge(&mut base, json!({"words": ["x"]}));
        assert_eq!(base["words"], json!(["x"]));
    }
}
