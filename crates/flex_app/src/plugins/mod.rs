//! Plugin system
//!
//! A [`Plugin`] receives lifecycle and theme events from a
//! [`PluginManager`]. Hooks return `Result`; the manager logs failures and
//! never lets one plugin's error reach the caller or other plugins.

mod manager;
mod samples;

pub use manager::PluginManager;
pub use samples::{AnalyticsEvent, AnalyticsPlugin, SystemThemePlugin};

use flex_theme::{Preset, ResolvedTheme, Theme};
use thiserror::Error;

use crate::config::FlexConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PluginError {
    #[error("plugin is missing an id, name or version")]
    Invalid,

    #[error("plugin `{0}` is already registered")]
    AlreadyRegistered(String),

    #[error("plugin `{0}` is not registered")]
    NotRegistered(String),

    #[error("plugin `{plugin}` depends on `{dependency}`, which is not registered")]
    MissingDependency { plugin: String, dependency: String },

    #[error("plugin `{plugin}` is required by `{dependent}`")]
    RequiredBy { plugin: String, dependent: String },

    #[error("plugins are disabled")]
    Disabled,

    /// A hook reported a failure
    #[error("{0}")]
    Hook(String),
}

pub type Result<T> = std::result::Result<T, PluginError>;

/// Extension receiving flex-theme events
///
/// Every hook is optional.
pub trait Plugin {
    /// Unique identifier
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Ids of plugins that must be registered first
    fn dependencies(&self) -> &[&str] {
        &[]
    }

    fn on_init(&self) -> Result<()> {
        Ok(())
    }

    fn on_theme_change(&self, _theme: Theme, _resolved: ResolvedTheme) -> Result<()> {
        Ok(())
    }

    fn on_locale_change(&self, _locale: &str) -> Result<()> {
        Ok(())
    }

    fn on_preset_activated(&self, _preset: &Preset) -> Result<()> {
        Ok(())
    }

    fn on_config_change(&self, _config: &FlexConfig) -> Result<()> {
        Ok(())
    }

    fn on_disable(&self) -> Result<()> {
        Ok(())
    }
}
