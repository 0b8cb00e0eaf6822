//! flex-theme theme state
//!
//! Light/dark/auto theme preference with system-scheme resolution,
//! persistence and change notification, plus the design tokens and presets
//! published as CSS custom properties.
//!
//! # Quick Start
//!
//! ```rust
//! use flex_platform::{ColorScheme, MemoryHost};
//! use flex_theme::{Theme, ThemeConfig, ThemeStore};
//!
//! let host = MemoryHost::with_system_scheme(ColorScheme::Dark);
//! let store = ThemeStore::new(host.shared(), ThemeConfig::default());
//! store.initialize();
//!
//! assert_eq!(store.get_theme(), Theme::Auto);
//! assert_eq!(store.get_resolved_theme(), ColorScheme::Dark);
//!
//! let sub = store.on_theme_change(|theme, resolved| {
//!     println!("theme is now {theme} ({resolved})");
//! });
//! store.toggle_theme();
//! assert_eq!(host.attribute("data-theme").as_deref(), Some("light"));
//! sub.unsubscribe();
//! ```
//!
//! # Tokens
//!
//! - [`ColorTokens`]: 20 semantic colors, light and dark tables
//! - [`SpacingTokens`], [`RadiusTokens`], [`TypographyTokens`], [`ShadowTokens`]
//!
//! [`css::generate_css_variables`] renders them as a stylesheet keyed off the
//! theme attribute.

pub mod config;
pub mod css;
pub mod error;
pub mod presets;
pub mod store;
pub mod theme;
pub mod tokens;

pub use config::{ThemeConfig, ThemeOptions, DEFAULT_ATTRIBUTE, DEFAULT_STORAGE_KEY};
pub use css::{generate_css_variables, inject_css_variables, TokenSet};
pub use error::{Result, ThemeError};
pub use presets::{built_in_presets, Preset, PresetConfig, PresetKind, PresetRegistry};
pub use store::ThemeStore;
pub use theme::{ResolvedTheme, Theme, ThemeChange};
pub use tokens::*;

pub use flex_platform::ColorScheme;
