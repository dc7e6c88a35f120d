// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;

use crate::core::language::{DEFAULT_DIRECTIVE, LanguageRegistry};
use crate::core::render::EditorMode;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Extra extension -> language associations.
    pub associations: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    String(String),
}

impl Config {
    /// Associate a file extension with a language name
    pub fn associate(&mut self, extension: &str, language: &str) {
        self.associations
            .insert(extension.to_string(), language.to_string());
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The word that introduces a language directive on a file's first line.
    pub fn directive_word(&self) -> &str {
        self.get_string("directive")
            .filter(|w| !w.is_empty())
            .unwrap_or(DEFAULT_DIRECTIVE)
    }

    /// The configured editor mode; an unparseable value falls back to `Edit`.
    pub fn mode(&self) -> EditorMode {
        self.get_string("mode")
            .and_then(|m| m.parse().ok())
            .unwrap_or_default()
    }

    /// Debug logging requested.
    pub fn verbose(&self) -> bool {
        self.get_bool("verbose").unwrap_or(false)
    }

    /// Build a language registry with this configuration's directive word and
    /// extension associations.
    pub fn registry(&self) -> LanguageRegistry {
        let mut registry = LanguageRegistry::with_directive(self.directive_word());
        for (extension, language) in &self.associations {
            registry.associate(extension, language);
        }
        registry
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}
