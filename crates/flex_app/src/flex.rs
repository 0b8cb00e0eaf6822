//! The [`FlexTheme`] facade
//!
//! Wires a theme store, preset registry, locale state and plugin manager to
//! one host and keeps them consistent.

use std::cell::RefCell;

use flex_animation::{inject_keyframes, Motion};
use flex_core::Subscription;
use flex_i18n::{I18nError, LocaleState};
use flex_platform::{apply_mobile_optimizations, SharedHost};
use flex_theme::{
    inject_css_variables, PresetRegistry, ResolvedTheme, Theme, ThemeOptions, ThemeStore,
};
use tracing::{debug, warn};

use crate::config::FlexConfig;
use crate::plugins::PluginManager;

pub struct FlexTheme {
    host: SharedHost,
    config: RefCell<FlexConfig>,
    store: ThemeStore,
    presets: PresetRegistry,
    locale: RefCell<LocaleState>,
    plugins: PluginManager,
    motion: Motion,
    /// Forwarding listeners and host subscriptions; empty until initialized
    subscriptions: RefCell<Vec<Subscription>>,
}

impl FlexTheme {
    /// Build every component; nothing touches the host until
    /// [`initialize`](Self::initialize)
    pub fn new(host: SharedHost, config: FlexConfig) -> Self {
        let store = ThemeStore::new(host.clone(), config.theme_config());
        let presets = PresetRegistry::new(host.clone(), config.presets.clone());
        let locale = LocaleState::new(host.clone(), config.locale_options());
        let plugins = PluginManager::new(host.clone(), config.plugins.clone());
        let motion = Motion::new(host.clone());

        Self {
            host,
            config: RefCell::new(config),
            store,
            presets,
            locale: RefCell::new(locale),
            plugins,
            motion,
            subscriptions: RefCell::new(Vec::new()),
        }
    }

    pub fn with_defaults(host: SharedHost) -> Self {
        Self::new(host, FlexConfig::default())
    }

    pub fn host(&self) -> &SharedHost {
        &self.host
    }

    pub fn config(&self) -> FlexConfig {
        self.config.borrow().clone()
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn locale_state(&self) -> LocaleState {
        self.locale.borrow().clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_initialized()
    }

    // ========== Lifecycle ==========

    /// Apply persisted state to the host and start forwarding events to
    /// plugins. Calling it again is a no-op.
    pub fn initialize(&self) {
        if self.is_initialized() {
            return;
        }
        let config = self.config();
        debug!("FlexTheme::initialize");

        let theme_was_persisted = matches!(
            self.host.get_stored_value(&config.storage_key),
            Ok(Some(_))
        );
        self.store.initialize();

        let locale = self.locale_state();
        match locale.configure_locale(&locale.locale()) {
            Ok(Some(theme)) if !theme_was_persisted => {
                debug!("FlexTheme: applying locale default theme {}", theme);
                self.store.set_theme(theme);
            }
            Ok(_) => {}
            Err(e) => warn!("FlexTheme: {}", e),
        }

        let mut subs = Vec::new();
        if config.enable_mobile_optimizations {
            subs.push(apply_mobile_optimizations(&self.host));
        }
        if let Err(e) = inject_css_variables(self.host.as_ref(), &config.attribute) {
            warn!("FlexTheme: failed to inject CSS variables: {}", e);
        }
        if let Err(e) = inject_keyframes(self.host.as_ref()) {
            warn!("FlexTheme: failed to inject keyframes: {}", e);
        }

        let preset_was_persisted = matches!(
            self.host.get_stored_value(&config.presets.storage_key),
            Ok(Some(_))
        );
        if preset_was_persisted {
            self.presets.apply_active();
        }

        let plugins = self.plugins.clone();
        subs.push(
            self.store
                .on_theme_change(move |theme, resolved| plugins.notify_theme_change(theme, resolved)),
        );
        let plugins = self.plugins.clone();
        subs.push(
            self.presets
                .on_preset_change(move |preset| plugins.notify_preset_activated(preset)),
        );
        let plugins = self.plugins.clone();
        subs.push(locale.on_locale_change(move |locale| plugins.notify_locale_change(locale)));
        self.subscriptions.borrow_mut().extend(subs);

        // Seed the current state so plugins initialized from here on get it
        self.plugins
            .notify_theme_change(self.store.get_theme(), self.store.get_resolved_theme());
        self.plugins.notify_locale_change(&locale.locale());
        self.plugins.notify_preset_activated(&self.presets.active());

        if config.plugins.auto_initialize {
            self.plugins.initialize();
        }
    }

    /// Stop forwarding events and following the host
    pub fn teardown(&self) {
        let subs: Vec<Subscription> = self.subscriptions.borrow_mut().drain(..).collect();
        for sub in subs {
            sub.unsubscribe();
        }
        self.store.teardown();
    }

    /// Replace the configuration, re-apply it and notify plugins
    pub fn configure(&self, config: FlexConfig) {
        debug!("FlexTheme::configure: {:?}", config);
        let was_initialized = self.is_initialized();
        if was_initialized {
            self.teardown();
        }

        self.store.configure(ThemeOptions::from(config.theme_config()));
        self.presets.configure(config.presets.clone());
        if self.locale.borrow().options() != &config.locale_options() {
            *self.locale.borrow_mut() = LocaleState::new(self.host.clone(), config.locale_options());
        }
        self.plugins.configure(config.plugins.clone());
        *self.config.borrow_mut() = config.clone();

        if was_initialized {
            self.initialize();
        }
        self.plugins.notify_config_change(&config);
    }

    // ========== Convenience ==========

    pub fn get_theme(&self) -> Theme {
        self.store.get_theme()
    }

    pub fn get_resolved_theme(&self) -> ResolvedTheme {
        self.store.get_resolved_theme()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set_theme(theme);
    }

    pub fn toggle_theme(&self) -> Theme {
        self.store.toggle_theme()
    }

    pub fn on_theme_change(&self, listener: impl Fn(Theme, ResolvedTheme) + 'static) -> Subscription {
        self.store.on_theme_change(listener)
    }

    pub fn locale(&self) -> String {
        self.locale.borrow().locale()
    }

    /// Switch locale; a locale with a preferred theme applies it
    pub fn set_locale(&self, locale: &str) -> Result<(), I18nError> {
        let state = self.locale_state();
        if let Some(theme) = state.configure_locale(locale)? {
            self.store.set_theme(theme);
        }
        Ok(())
    }

    /// Message for the active locale
    pub fn message(&self, path: &str, params: &[(&str, &str)]) -> String {
        self.locale.borrow().message(path, params)
    }
}

impl Drop for FlexTheme {
    fn drop(&mut self) {
        // Forwarders hold plugin handles; plugins may hold the store
        for sub in self.subscriptions.get_mut().drain(..) {
            sub.unsubscribe();
        }
    }
}

impl std::fmt::Debug for FlexTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlexTheme")
            .field("config", &self.config.borrow())
            .field("store", &self.store)
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}
