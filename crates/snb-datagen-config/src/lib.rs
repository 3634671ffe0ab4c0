// snb-datagen-config - Configuration bootstrap for the generator
//
// Resolution order:
// 1. Override property file passed to `read_config` (highest priority)
// 2. Built-in defaults from `initialize`
//
// A resolved `Configuration` is immutable. Changes go through `ConfigBuilder`
// and produce a new value, so workers can share it behind an `Arc`.

use std::collections::BTreeMap;

mod bootstrap;
mod error;
pub mod keys;
mod properties;
mod validation;

pub use bootstrap::{
    derive_output_dirs, entries_with_prefix, initialize, print_config, read_config,
    read_config_or_exit, LOCAL_FILESYSTEM,
};
pub use error::{ConfigError, Result};
pub use properties::parse_properties;
pub use validation::validate_config;

/// Resolved key/value configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    values: BTreeMap<String, String>,
}

impl Configuration {
    /// Start a builder seeded with this configuration's entries
    pub fn into_builder(self) -> ConfigBuilder {
        ConfigBuilder {
            values: self.values,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a value that must have been set by a default or an override
    pub fn get_required(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
        })
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        parse_int(key, self.get_required(key)?)
    }

    /// Integer value, or `default` when the key is absent.
    /// A present but malformed value is still an error.
    pub fn get_int_or(&self, key: &str, default: i64) -> Result<i64> {
        match self.get(key) {
            Some(value) => parse_int(key, value),
            None => Ok(default),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        parse_bool(key, self.get_required(key)?)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            Some(value) => parse_bool(key, value),
            None => Ok(default),
        }
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Mutable staging area for a [`Configuration`]
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    values: BTreeMap<String, String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Overlay every pair, in order; later pairs win
    pub fn merge<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.set(key, value);
        }
        self
    }

    pub fn build(self) -> Configuration {
        Configuration {
            values: self.values,
        }
    }
}

fn parse_int(key: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| ConfigError::invalid(key, value, e.to_string()))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::invalid(key, value, "expected true or false")),
    }
}
