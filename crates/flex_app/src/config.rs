//! flex-theme configuration file handling (`flex-theme.toml`)

use std::fs;
use std::path::{Path, PathBuf};

use flex_i18n::{LocaleOptions, DEFAULT_LOCALE, DEFAULT_LOCALE_STORAGE_KEY};
use flex_theme::{PresetConfig, Theme, ThemeConfig, DEFAULT_ATTRIBUTE, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlexConfig {
    /// Root attribute receiving the resolved theme
    #[serde(default = "default_attribute")]
    pub attribute: String,
    /// Storage key for the theme preference
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub default_theme: Theme,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Mirror `lang`/`dir` onto the root element
    #[serde(default = "default_true")]
    pub enable_rtl: bool,
    #[serde(default = "default_true")]
    pub enable_mobile_optimizations: bool,
    #[serde(default)]
    pub apply_class_names: bool,
    #[serde(default)]
    pub presets: PresetConfig,
    #[serde(default)]
    pub plugins: PluginConfig,
}

fn default_attribute() -> String {
    DEFAULT_ATTRIBUTE.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for FlexConfig {
    fn default() -> Self {
        Self {
            attribute: default_attribute(),
            storage_key: default_storage_key(),
            default_theme: Theme::Auto,
            default_locale: default_locale(),
            enable_rtl: true,
            enable_mobile_optimizations: true,
            apply_class_names: false,
            presets: PresetConfig::default(),
            plugins: PluginConfig::default(),
        }
    }
}

impl FlexConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn theme_config(&self) -> ThemeConfig {
        ThemeConfig {
            attribute: self.attribute.clone(),
            storage_key: self.storage_key.clone(),
            default_theme: self.default_theme,
            apply_class_names: self.apply_class_names,
        }
    }

    pub fn locale_options(&self) -> LocaleOptions {
        LocaleOptions {
            storage_key: DEFAULT_LOCALE_STORAGE_KEY.to_string(),
            default_locale: self.default_locale.clone(),
            enable_rtl: self.enable_rtl,
        }
    }
}

pub const DEFAULT_PLUGIN_STORAGE_KEY: &str = "flex-theme-plugins";

/// Plugin manager configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PluginConfig {
    /// When false, no plugin can be enabled
    #[serde(default = "default_true")]
    pub enable_plugins: bool,
    /// Initialize enabled plugins as soon as the manager is configured
    #[serde(default = "default_true")]
    pub auto_initialize: bool,
    /// Storage key for the enabled plugin ids
    #[serde(default = "default_plugin_storage_key")]
    pub storage_key: String,
}

fn default_plugin_storage_key() -> String {
    DEFAULT_PLUGIN_STORAGE_KEY.to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enable_plugins: true,
            auto_initialize: true,
            storage_key: default_plugin_storage_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FlexConfig::from_toml_str("").unwrap(), FlexConfig::default());
    }

    #[test]
    fn partial_file() {
        let config = FlexConfig::from_toml_str(
            r#"
default_theme = "dark"
default_locale = "fr-FR"

[presets]
default_preset_id = "sepia"

[plugins]
auto_initialize = false
"#,
        )
        .unwrap();

        assert_eq!(config.default_theme, Theme::Dark);
        assert_eq!(config.attribute, "data-theme");
        assert_eq!(config.presets.default_preset_id, "sepia");
        assert_eq!(config.presets.storage_key, "flex-theme-presets");
        assert!(!config.plugins.auto_initialize);
        assert!(config.plugins.enable_plugins);
        assert_eq!(config.locale_options().default_locale, "fr-FR");
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(matches!(
            FlexConfig::from_toml_str(r#"default_theme = "sepia""#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flex-theme.toml");
        let config = FlexConfig {
            apply_class_names: true,
            ..FlexConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(FlexConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = FlexConfig::load(Path::new("/nonexistent/flex-theme.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/flex-theme.toml"));
    }
}
