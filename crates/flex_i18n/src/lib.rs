//! Internationalization for flex-theme
//!
//! Built-in YAML message catalogs for six locales, per-locale presentation
//! rules (text direction, date/time patterns, preferred theme) and a
//! host-bound [`LocaleState`].
//!
//! ```
//! use flex_i18n::get_message;
//!
//! assert_eq!(get_message("es-ES", "themes.light", &[]), "Claro");
//! assert_eq!(
//!     get_message("en-US", "actions.switchTo", &[("theme", "dark")]),
//!     "Switch to dark theme"
//! );
//! ```

mod catalog;
mod error;
pub mod format;
pub mod locale;
mod messages;
mod state;

pub use catalog::{apply_params, MessageCatalog};
pub use error::I18nError;
pub use format::{format_date, format_pattern, format_time, to_chrono_format};
pub use locale::{
    locale_config, locale_fallback_chain, normalize_locale, LocaleConfig, DEFAULT_LOCALE,
    SUPPORTED_LOCALES,
};
pub use messages::{get_message, Messages};
pub use state::{LocaleOptions, LocaleState, DEFAULT_LOCALE_STORAGE_KEY};
