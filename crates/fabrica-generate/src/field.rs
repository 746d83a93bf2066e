use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use fabrica_core::{FieldValue, Locale};

use crate::errors::{FieldError, Result};
use crate::keys::Key;
use crate::providers::{Provider, default_data_root, default_providers};
use crate::random::{RandomStream, Seed};

/// Default invocation count for [`FieldEngine::fieldset`].
pub const DEFAULT_FIELDSET_ITERATIONS: usize = 10;

/// A caller-registered generator invoked in place of provider lookup.
pub type Handler = Box<dyn FnMut(&mut RandomStream, Option<&Value>) -> Result<FieldValue>>;

#[derive(Debug, Clone)]
struct Target {
    provider: usize,
    method: String,
}

/// The field resolution engine: resolves string field names to provider
/// methods and invokes them against one shared random stream.
///
/// Providers are scanned in a fixed registration order (see
/// [`default_providers`]); resolved names are cached per engine
/// instance. The engine is single-threaded; wrap it in external
/// synchronization or use per-thread instances for concurrent use.
pub struct FieldEngine {
    providers: Vec<Box<dyn Provider>>,
    random: RandomStream,
    cache: HashMap<String, Target>,
    handlers: HashMap<String, Handler>,
    aliases: HashMap<String, String>,
    locale: Locale,
}

impl FieldEngine {
    /// Build an engine over the default provider set and bundled data.
    pub fn new(locale: Locale, seed: Seed) -> Result<Self> {
        Self::with_data_root(locale, seed, &default_data_root())
    }

    /// Build an engine loading datasets from an explicit root.
    pub fn with_data_root(locale: Locale, seed: Seed, root: &Path) -> Result<Self> {
        let providers = default_providers(root, locale)?;
        debug!(locale = %locale, providers = providers.len(), "field engine ready");
        Ok(Self {
            providers,
            random: RandomStream::new(seed),
            cache: HashMap::new(),
            handlers: HashMap::new(),
            aliases: HashMap::new(),
            locale,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Restart the shared random stream from a fresh seed.
    pub fn reseed(&mut self, seed: Seed) {
        self.random.reseed(seed);
    }

    /// Every resolvable `provider.method` name, in provider order.
    pub fn catalog(&self) -> Vec<String> {
        self.providers
            .iter()
            .flat_map(|provider| {
                provider
                    .methods()
                    .iter()
                    .map(|method| format!("{}.{}", provider.name(), method))
            })
            .collect()
    }

    /// Resolve and invoke a field by name.
    ///
    /// Accepted forms: `provider.method` (explicit) or `method` (fuzzy,
    /// first provider in registration order wins). Aliases substitute
    /// first; a handler registered under the substituted name then
    /// short-circuits normalization and provider lookup entirely. `/`,
    /// `:` and whitespace are accepted as delimiters and normalized to
    /// `.`; more than one delimiter is an error.
    pub fn perform(
        &mut self,
        name: &str,
        params: Option<&Value>,
        key: Option<&Key>,
    ) -> Result<FieldValue> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FieldError::UndefinedField);
        }

        let aliased = match self.aliases.get(trimmed) {
            Some(target) => target.clone(),
            None => trimmed.to_string(),
        };

        if let Some(handler) = self.handlers.get_mut(aliased.as_str()) {
            debug!(field = %aliased, "custom handler invoked");
            let value = handler(&mut self.random, params)?;
            return Ok(match key {
                Some(key) => key.apply(value, &mut self.random),
                None => value,
            });
        }

        let normalized = normalize(&aliased);
        if normalized.matches('.').count() > 1 {
            return Err(FieldError::AmbiguousField {
                name: name.to_string(),
            });
        }

        let target = match self.cache.get(&normalized) {
            Some(target) => target.clone(),
            None => {
                let target = self.resolve(&normalized)?;
                self.cache.insert(normalized.clone(), target.clone());
                target
            }
        };

        let value =
            self.providers[target.provider].call(&target.method, params, &mut self.random)?;
        Ok(match key {
            Some(key) => key.apply(value, &mut self.random),
            None => value,
        })
    }

    /// Shorthand for [`FieldEngine::perform`] without params or key.
    pub fn value(&mut self, name: &str) -> Result<FieldValue> {
        self.perform(name, None, None)
    }

    /// Invoke a field `count` times, producing an ordered list.
    pub fn fieldset(
        &mut self,
        name: &str,
        count: Option<usize>,
        params: Option<&Value>,
        key: Option<&Key>,
    ) -> Result<FieldValue> {
        let count = count.unwrap_or(DEFAULT_FIELDSET_ITERATIONS);
        if count < 1 {
            return Err(FieldError::NonPositiveCount {
                context: "fieldset",
            });
        }
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.perform(name, params, key)?);
        }
        Ok(FieldValue::List(items))
    }

    /// Register a custom handler under `name`.
    ///
    /// First registration wins: re-registering an existing name is a
    /// no-op, not an error. The handler takes precedence over provider
    /// lookup (and the resolution cache) for that exact name, matched
    /// after alias substitution.
    pub fn register_handler(&mut self, name: &str, handler: Handler) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FieldError::EmptyName { context: "handler" });
        }
        if self.handlers.contains_key(name) {
            debug!(field = name, "handler already registered, keeping first");
            return Ok(());
        }
        self.handlers.insert(name.to_string(), handler);
        Ok(())
    }

    /// Remove a handler, failing if the name was never registered.
    pub fn unregister_handler(&mut self, name: &str) -> Result<()> {
        self.handlers
            .remove(name.trim())
            .map(|_| ())
            .ok_or_else(|| FieldError::UnregisteredHandler {
                name: name.to_string(),
            })
    }

    /// Register an alias resolving to another field name.
    pub fn register_alias(&mut self, alias: &str, target: &str) -> Result<()> {
        let alias = alias.trim();
        let target = target.trim();
        if alias.is_empty() || target.is_empty() {
            return Err(FieldError::EmptyName { context: "alias" });
        }
        self.aliases.insert(alias.to_string(), target.to_string());
        Ok(())
    }

    /// Run `f` with every locale-dependent provider switched to
    /// `locale`, restoring the original locale and dataset of each on
    /// every exit path.
    pub fn with_locale<T>(
        &mut self,
        locale: Locale,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let snapshots: Vec<_> = self
            .providers
            .iter()
            .enumerate()
            .filter_map(|(index, provider)| {
                provider
                    .locale_snapshot()
                    .map(|(locale, dataset)| (index, locale, dataset))
            })
            .collect();

        for (index, _, _) in &snapshots {
            if let Err(err) = self.providers[*index].set_locale(locale) {
                self.restore_snapshots(snapshots);
                return Err(err);
            }
        }
        debug!(locale = %locale, "locale override entered");

        let result = f(self);
        self.restore_snapshots(snapshots);
        debug!("locale override restored");
        result
    }

    fn restore_snapshots(&mut self, snapshots: Vec<(usize, Locale, fabrica_core::Dataset)>) {
        for (index, locale, dataset) in snapshots {
            self.providers[index].restore_locale(locale, dataset);
        }
    }

    fn resolve(&self, normalized: &str) -> Result<Target> {
        if let Some((provider_name, method)) = normalized.split_once('.') {
            let index = self
                .providers
                .iter()
                .position(|provider| provider.name() == provider_name)
                .ok_or_else(|| FieldError::UnknownProvider {
                    name: provider_name.to_string(),
                })?;
            if !self.providers[index].methods().contains(&method) {
                return Err(FieldError::UnknownField {
                    name: normalized.to_string(),
                });
            }
            debug!(field = normalized, provider = provider_name, "explicit resolution");
            return Ok(Target {
                provider: index,
                method: method.to_string(),
            });
        }

        for (index, provider) in self.providers.iter().enumerate() {
            if provider.methods().contains(&normalized) {
                debug!(field = normalized, provider = provider.name(), "fuzzy resolution");
                return Ok(Target {
                    provider: index,
                    method: normalized.to_string(),
                });
            }
        }
        Err(FieldError::UnknownField {
            name: normalized.to_string(),
        })
    }
}

/// Normalize accepted delimiters (`/`, `:`, whitespace) to `.`,
/// collapsing runs into one.
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_delimiter = false;
    for c in name.chars() {
        if c == '/' || c == ':' || c == '.' || c.is_whitespace() {
            if !last_was_delimiter {
                out.push('.');
            }
            last_was_delimiter = true;
        } else {
            out.push(c);
            last_was_delimiter = false;
        }
    }
    out
}
