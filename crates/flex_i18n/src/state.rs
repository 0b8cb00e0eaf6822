use std::cell::RefCell;
use std::rc::Rc;

use flex_core::{Emitter, Subscription};
use flex_platform::{SharedHost, TextDirection};
use flex_theme::Theme;
use tracing::{debug, warn};

use crate::locale::{is_supported, locale_config, match_supported_locale, normalize_locale, DEFAULT_LOCALE};
use crate::messages::get_message;
use crate::I18nError;

pub const DEFAULT_LOCALE_STORAGE_KEY: &str = "flex-theme-locale";

/// Settings for [`LocaleState`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleOptions {
    pub storage_key: String,
    /// Used when neither storage nor the host names a supported locale
    pub default_locale: String,
    /// Mirror `lang`/`dir` onto the root element
    pub enable_rtl: bool,
}

impl Default for LocaleOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_LOCALE_STORAGE_KEY.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            enable_rtl: true,
        }
    }
}

struct StateInner {
    host: SharedHost,
    options: LocaleOptions,
    locale: RefCell<Option<String>>,
    listeners: Emitter<String>,
}

/// Active locale bound to a host
#[derive(Clone)]
pub struct LocaleState {
    inner: Rc<StateInner>,
}

impl LocaleState {
    pub fn new(host: SharedHost, options: LocaleOptions) -> Self {
        Self {
            inner: Rc::new(StateInner {
                host,
                options,
                locale: RefCell::new(None),
                listeners: Emitter::new(),
            }),
        }
    }

    pub fn with_defaults(host: SharedHost) -> Self {
        Self::new(host, LocaleOptions::default())
    }

    pub fn options(&self) -> &LocaleOptions {
        &self.inner.options
    }

    /// Active locale.
    ///
    /// Until [`configure_locale`](Self::configure_locale) is called this is
    /// detected: a supported stored value, then the host's preferred
    /// languages (exact match before language match), then the default.
    pub fn locale(&self) -> String {
        if let Some(locale) = self.inner.locale.borrow().as_ref() {
            return locale.clone();
        }
        self.detect()
    }

    fn detect(&self) -> String {
        let host = &self.inner.host;
        let key = &self.inner.options.storage_key;

        match host.get_stored_value(key) {
            Ok(Some(stored)) if is_supported(&stored) => return stored,
            Ok(Some(stored)) => debug!("LocaleState: ignoring stored locale `{}`", stored),
            Ok(None) => {}
            Err(e) => warn!("LocaleState: failed to read `{}`: {}", key, e),
        }

        let languages: Vec<String> = host
            .preferred_languages()
            .iter()
            .map(|l| normalize_locale(l))
            .collect();
        if let Some(exact) = languages.iter().find(|l| is_supported(l)) {
            return exact.clone();
        }
        if let Some(matched) = languages.iter().find_map(|l| match_supported_locale(l)) {
            return matched.to_string();
        }

        self.inner.options.default_locale.clone()
    }

    pub fn text_direction(&self) -> TextDirection {
        locale_config(&self.locale())
            .map(|c| c.text_direction)
            .unwrap_or_default()
    }

    /// Switch to `locale`, persist it and notify listeners.
    ///
    /// Returns the locale's preferred theme, if it has one, so callers can
    /// apply it to their theme store.
    pub fn configure_locale(&self, locale: &str) -> Result<Option<Theme>, I18nError> {
        let locale = normalize_locale(locale);
        let Some(config) = locale_config(&locale) else {
            warn!("LocaleState: unsupported locale `{}`", locale);
            return Err(I18nError::UnsupportedLocale(locale));
        };

        let previous = self.inner.locale.replace(Some(locale.clone()));
        debug!("LocaleState::configure_locale: {:?} -> {}", previous, locale);

        let host = &self.inner.host;
        if self.inner.options.enable_rtl {
            if let Err(e) = host.set_document_language(&locale, config.text_direction) {
                warn!("LocaleState: failed to set document language: {}", e);
            }
        }
        if let Err(e) = host.set_stored_value(&self.inner.options.storage_key, &locale) {
            warn!("LocaleState: failed to persist locale: {}", e);
        }

        self.inner.listeners.emit(&locale);
        Ok(config.default_theme)
    }

    /// Register a listener receiving the new locale
    pub fn on_locale_change(&self, listener: impl Fn(&str) + 'static) -> Subscription {
        self.inner
            .listeners
            .subscribe(move |locale: &String| listener(locale))
    }

    /// Message for the active locale
    pub fn message(&self, path: &str, params: &[(&str, &str)]) -> String {
        get_message(&self.locale(), path, params)
    }
}

impl std::fmt::Debug for LocaleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleState")
            .field("options", &self.inner.options)
            .field("locale", &self.inner.locale.borrow())
            .finish()
    }
}
