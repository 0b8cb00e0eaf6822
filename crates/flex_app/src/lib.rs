//! flex-theme application layer
//!
//! [`FlexTheme`] assembles the theme store, presets, locale state, motion
//! helpers and plugins around one host, configured by a [`FlexConfig`]
//! (usually loaded from `flex-theme.toml`).
//!
//! ```
//! use flex_app::{FlexConfig, FlexTheme};
//! use flex_platform::MemoryHost;
//! use flex_theme::Theme;
//!
//! let host = MemoryHost::new();
//! let flex = FlexTheme::new(host.shared(), FlexConfig::default());
//! flex.initialize();
//! flex.set_theme(Theme::Dark);
//! assert_eq!(host.attribute("data-theme").as_deref(), Some("dark"));
//! ```

pub mod config;
mod flex;
pub mod plugins;

pub use config::{ConfigError, FlexConfig, PluginConfig, DEFAULT_PLUGIN_STORAGE_KEY};
pub use flex::FlexTheme;
pub use plugins::{
    AnalyticsEvent, AnalyticsPlugin, Plugin, PluginError, PluginManager, SystemThemePlugin,
};
