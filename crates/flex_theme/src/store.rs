//! Theme store
//!
//! [`ThemeStore`] owns the user's theme preference. It resolves `auto`
//! against the host's color scheme, persists the preference, mirrors the
//! resolved value onto the root element and notifies listeners.
//!
//! The in-memory preference is authoritative once set: when the host cannot
//! persist (no storage, quota exceeded) the store keeps working and only
//! logs the failure.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use flex_core::{Emitter, Subscription};
use flex_platform::{SharedHost, StorageChange};
use tracing::{debug, warn};

use crate::config::{ThemeConfig, ThemeOptions};
use crate::error::Result;
use crate::theme::{ResolvedTheme, Theme, ThemeChange};

struct StoreInner {
    host: SharedHost,
    config: RefCell<ThemeConfig>,
    /// Preference set through this store or adopted from storage
    theme: Cell<Option<Theme>>,
    initialized: Cell<bool>,
    listeners: Emitter<ThemeChange>,
    host_subscriptions: RefCell<Vec<Subscription>>,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        for sub in self.host_subscriptions.get_mut().drain(..) {
            sub.unsubscribe();
        }
    }
}

/// Observable theme preference bound to a host
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Rc<StoreInner>,
}

impl ThemeStore {
    /// Create a store; nothing touches the host until [`initialize`](Self::initialize)
    pub fn new(host: SharedHost, config: ThemeConfig) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                host,
                config: RefCell::new(config),
                theme: Cell::new(None),
                initialized: Cell::new(false),
                listeners: Emitter::new(),
                host_subscriptions: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn with_defaults(host: SharedHost) -> Self {
        Self::new(host, ThemeConfig::default())
    }

    pub fn host(&self) -> &SharedHost {
        &self.inner.host
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> ThemeConfig {
        self.inner.config.borrow().clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.get()
    }

    // ========== Reading ==========

    /// Current preference: in-memory value, else a valid persisted value,
    /// else the configured default
    pub fn get_theme(&self) -> Theme {
        if let Some(theme) = self.inner.theme.get() {
            return theme;
        }
        self.read_persisted()
            .unwrap_or_else(|| self.inner.config.borrow().default_theme)
    }

    /// Concrete light/dark value for the current preference
    pub fn get_resolved_theme(&self) -> ResolvedTheme {
        self.resolve(self.get_theme())
    }

    fn resolve(&self, theme: Theme) -> ResolvedTheme {
        match theme {
            Theme::Auto => theme.resolve(self.inner.host.system_color_scheme()),
            other => other.resolve(None),
        }
    }

    fn read_persisted(&self) -> Option<Theme> {
        let key = self.inner.config.borrow().storage_key.clone();
        match self.inner.host.get_stored_value(&key) {
            Ok(Some(value)) => match value.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(_) => {
                    debug!("ThemeStore: ignoring invalid stored theme `{}`", value);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("ThemeStore: failed to read `{}`: {}", key, e);
                None
            }
        }
    }

    // ========== Writing ==========

    /// Set the preference, persist it, apply it and notify listeners
    pub fn set_theme(&self, theme: Theme) {
        debug!("ThemeStore::set_theme: {}", theme);
        self.inner.theme.set(Some(theme));

        let key = self.inner.config.borrow().storage_key.clone();
        if let Err(e) = self.inner.host.set_stored_value(&key, theme.as_str()) {
            warn!("ThemeStore: failed to persist theme: {}", e);
        }

        let resolved = self.resolve(theme);
        self.apply(resolved);
        self.notify(theme, resolved);
    }

    /// Parse and set a theme token. Unknown tokens are logged and leave the
    /// store untouched.
    pub fn set_theme_str(&self, value: &str) -> Result<()> {
        match value.parse::<Theme>() {
            Ok(theme) => {
                self.set_theme(theme);
                Ok(())
            }
            Err(e) => {
                warn!("ThemeStore: {}", e);
                Err(e)
            }
        }
    }

    /// Switch to the opposite of the currently resolved theme; returns the
    /// new preference
    pub fn toggle_theme(&self) -> Theme {
        let next = Theme::from(self.get_resolved_theme().toggle());
        self.set_theme(next);
        next
    }

    /// Register a listener receiving `(theme, resolved)` on every change
    pub fn on_theme_change(&self, listener: impl Fn(Theme, ResolvedTheme) + 'static) -> Subscription {
        self.inner
            .listeners
            .subscribe(move |change: &ThemeChange| listener(change.theme, change.resolved))
    }

    /// Number of registered theme listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    // ========== Lifecycle ==========

    /// Replace parts of the configuration. An initialized store re-runs
    /// initialization under the new settings.
    ///
    /// Changing the storage key drops the in-memory preference so the value
    /// persisted under the new key (or the default) takes over.
    pub fn configure(&self, options: ThemeOptions) {
        let key_changed = {
            let mut config = self.inner.config.borrow_mut();
            let previous_key = config.storage_key.clone();
            config.merge(options);
            config.storage_key != previous_key
        };
        if key_changed {
            self.inner.theme.set(None);
        }
        debug!("ThemeStore::configure: {:?}", self.inner.config.borrow());

        if self.is_initialized() {
            self.teardown();
            self.initialize();
        }
    }

    /// Load the persisted preference, apply it and start following the
    /// host's scheme and external storage writes. Calling it again is a no-op.
    pub fn initialize(&self) {
        if self.inner.initialized.replace(true) {
            return;
        }

        if let Some(theme) = self.read_persisted() {
            self.inner.theme.set(Some(theme));
        }
        let theme = self.get_theme();
        debug!("ThemeStore::initialize: theme={}", theme);
        self.apply(self.resolve(theme));

        let weak = Rc::downgrade(&self.inner);
        let scheme_sub = self
            .inner
            .host
            .subscribe_system_scheme_change(Box::new(move |scheme| {
                if let Some(store) = Self::upgrade(&weak) {
                    store.handle_system_scheme(scheme);
                }
            }));

        let weak = Rc::downgrade(&self.inner);
        let storage_sub = self
            .inner
            .host
            .subscribe_storage_change(Box::new(move |change| {
                if let Some(store) = Self::upgrade(&weak) {
                    store.handle_storage_change(change);
                }
            }));

        self.inner
            .host_subscriptions
            .borrow_mut()
            .extend([scheme_sub, storage_sub]);
    }

    /// Stop following host notifications; the store can be initialized again
    pub fn teardown(&self) {
        let subs: Vec<Subscription> = self.inner.host_subscriptions.borrow_mut().drain(..).collect();
        for sub in subs {
            sub.unsubscribe();
        }
        self.inner.initialized.set(false);
    }

    fn upgrade(weak: &Weak<StoreInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    // ========== Host notifications ==========

    fn handle_system_scheme(&self, scheme: ResolvedTheme) {
        if self.get_theme() != Theme::Auto {
            return;
        }
        debug!("ThemeStore: system scheme changed to {}", scheme);
        self.apply(scheme);
        self.notify(Theme::Auto, scheme);
    }

    fn handle_storage_change(&self, change: &StorageChange) {
        if change.key != self.inner.config.borrow().storage_key {
            return;
        }

        let adopted = change
            .new_value
            .as_deref()
            .and_then(|value| value.parse::<Theme>().ok());
        debug!(
            "ThemeStore: external storage write {:?} -> {:?}",
            change.new_value, adopted
        );
        self.inner.theme.set(adopted);

        let theme = adopted.unwrap_or_else(|| self.inner.config.borrow().default_theme);
        let resolved = self.resolve(theme);
        self.apply(resolved);
        self.notify(theme, resolved);
    }

    // ========== Side effects ==========

    fn apply(&self, resolved: ResolvedTheme) {
        let (attribute, classes) = {
            let config = self.inner.config.borrow();
            (config.attribute.clone(), config.apply_class_names)
        };
        let host = &self.inner.host;

        if let Err(e) = host.apply_attribute(&attribute, resolved.as_str()) {
            warn!("ThemeStore: failed to apply `{}`: {}", attribute, e);
        }
        if classes {
            let result = host
                .set_root_class(resolved.as_str(), true)
                .and_then(|_| host.set_root_class(resolved.toggle().as_str(), false));
            if let Err(e) = result {
                warn!("ThemeStore: failed to update theme classes: {}", e);
            }
        }
    }

    fn notify(&self, theme: Theme, resolved: ResolvedTheme) {
        let count = self.inner.listeners.emit(&ThemeChange { theme, resolved });
        debug!("ThemeStore: notified {} listener(s) ({}, {})", count, theme, resolved);
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("config", &self.inner.config.borrow())
            .field("theme", &self.inner.theme.get())
            .field("initialized", &self.inner.initialized.get())
            .finish()
    }
}

