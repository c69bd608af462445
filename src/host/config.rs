use std::{collections::HashMap, env, path::Path};

use color_eyre::eyre::{eyre, Result, WrapErr};
use serde_json::Value;

/// Separates nested sections in a configuration key, e.g. `Widgets:GoogleMap:ApiKey`
pub const SECTION_DELIMITER: char = ':';

/// Read-only key/value access to host configuration.
///
/// An unset key is `Ok(None)`. `Err` is reserved for a lookup that could not be performed.
pub trait ConfigLookup: Send + Sync {
    fn value(&self, key: &str) -> Result<Option<String>>;
}

/// Case-insensitive in-memory configuration
#[derive(Debug, Default, Clone)]
pub struct MemoryConfiguration {
    values: HashMap<String, String>,
}

impl MemoryConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(key.as_ref().to_lowercase(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryConfiguration
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut config = Self::new();
        iter.into_iter().for_each(|(k, v)| config.set(k, v));
        config
    }
}

impl ConfigLookup for MemoryConfiguration {
    fn value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(&key.to_lowercase()).cloned())
    }
}

/// Configuration backed by an `appsettings.json` style document
#[derive(Debug, Clone)]
pub struct JsonConfiguration {
    root: Value,
}

impl JsonConfiguration {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(json)?))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Couldn't read settings file {}", path.display()))?;
        Self::from_json_str(&contents)
            .wrap_err_with(|| format!("Couldn't parse settings file {}", path.display()))
    }
}

impl ConfigLookup for JsonConfiguration {
    fn value(&self, key: &str) -> Result<Option<String>> {
        let mut node = &self.root;
        for section in key.split(SECTION_DELIMITER) {
            let next = match node {
                Value::Object(map) => map
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(section))
                    .map(|(_, value)| value),
                Value::Array(items) => section.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(value) => node = value,
                None => return Ok(None),
            }
        }
        // Sections with children have no value of their own
        Ok(match node {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Object(_) | Value::Array(_) => None,
        })
    }
}

/// Configuration read from environment variables.
///
/// `Section:Key` is looked up as `{prefix}Section__Key`.
#[derive(Debug, Default, Clone)]
pub struct EnvConfiguration {
    prefix: String,
}

impl EnvConfiguration {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn variable_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.replace(SECTION_DELIMITER, "__"))
    }
}

impl ConfigLookup for EnvConfiguration {
    fn value(&self, key: &str) -> Result<Option<String>> {
        let name = self.variable_name(key);
        match env::var(&name) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(eyre!("Environment variable {name} is not valid unicode"))
            }
        }
    }
}

/// Stack of lookups where later layers override earlier ones
#[derive(Default)]
pub struct LayeredConfiguration {
    layers: Vec<Box<dyn ConfigLookup>>,
}

impl LayeredConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(mut self, lookup: impl ConfigLookup + 'static) -> Self {
        self.layers.push(Box::new(lookup));
        self
    }
}

impl ConfigLookup for LayeredConfiguration {
    fn value(&self, key: &str) -> Result<Option<String>> {
        for layer in self.layers.iter().rev() {
            if let Some(value) = layer.value(key)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}
