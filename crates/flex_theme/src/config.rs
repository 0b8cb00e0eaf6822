//! Theme store configuration

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

pub const DEFAULT_ATTRIBUTE: &str = "data-theme";
pub const DEFAULT_STORAGE_KEY: &str = "flex-theme";

fn default_attribute() -> String {
    DEFAULT_ATTRIBUTE.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Settings for a [`ThemeStore`](crate::ThemeStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Root attribute receiving the resolved theme
    #[serde(default = "default_attribute")]
    pub attribute: String,

    /// Storage key holding the persisted preference
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Preference used when nothing valid is persisted
    #[serde(default)]
    pub default_theme: Theme,

    /// Also toggle `dark`/`light` classes on the root element
    #[serde(default)]
    pub apply_class_names: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            attribute: default_attribute(),
            storage_key: default_storage_key(),
            default_theme: Theme::Auto,
            apply_class_names: false,
        }
    }
}

impl ThemeConfig {
    /// Apply the fields set in `options`, leaving the rest as they are
    pub fn merge(&mut self, options: ThemeOptions) {
        if let Some(attribute) = options.attribute {
            self.attribute = attribute;
        }
        if let Some(storage_key) = options.storage_key {
            self.storage_key = storage_key;
        }
        if let Some(default_theme) = options.default_theme {
            self.default_theme = default_theme;
        }
        if let Some(apply_class_names) = options.apply_class_names {
            self.apply_class_names = apply_class_names;
        }
    }
}

/// Partial configuration accepted by [`ThemeStore::configure`](crate::ThemeStore::configure)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeOptions {
    pub attribute: Option<String>,
    pub storage_key: Option<String>,
    pub default_theme: Option<Theme>,
    pub apply_class_names: Option<bool>,
}

impl ThemeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    pub fn default_theme(mut self, theme: Theme) -> Self {
        self.default_theme = Some(theme);
        self
    }

    pub fn apply_class_names(mut self, enabled: bool) -> Self {
        self.apply_class_names = Some(enabled);
        self
    }
}

impl From<ThemeConfig> for ThemeOptions {
    fn from(config: ThemeConfig) -> Self {
        Self {
            attribute: Some(config.attribute),
            storage_key: Some(config.storage_key),
            default_theme: Some(config.default_theme),
            apply_class_names: Some(config.apply_class_names),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ThemeConfig::default();
        assert_eq!(config.attribute, "data-theme");
        assert_eq!(config.storage_key, "flex-theme");
        assert_eq!(config.default_theme, Theme::Auto);
    }

    #[test]
    fn merge_only_touches_given_fields() {
        let mut config = ThemeConfig::default();
        config.merge(ThemeOptions::new().storage_key("app-theme"));
        assert_eq!(config.storage_key, "app-theme");
        assert_eq!(config.attribute, "data-theme");
    }

    #[test]
    fn deserialize_partial() {
        let config: ThemeConfig = serde_json::from_str(r#"{"default_theme":"system"}"#).unwrap();
        assert_eq!(config.default_theme, Theme::Auto);
        assert_eq!(config.storage_key, "flex-theme");
    }
}
