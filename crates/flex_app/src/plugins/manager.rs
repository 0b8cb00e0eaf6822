use std::cell::{Cell, RefCell};
use std::rc::Rc;

use flex_platform::SharedHost;
use flex_theme::{Preset, ResolvedTheme, Theme};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, error, warn};

use super::{Plugin, PluginError, Result};
use crate::config::{FlexConfig, PluginConfig};

struct ManagerInner {
    host: SharedHost,
    config: RefCell<PluginConfig>,
    plugins: RefCell<IndexMap<String, Rc<dyn Plugin>>>,
    /// Persisted; may name plugins that are not registered yet
    enabled: RefCell<IndexSet<String>>,
    initialized: RefCell<FxHashSet<String>>,
    configs: RefCell<FxHashMap<String, serde_json::Value>>,

    // Latest state, replayed to plugins initialized later
    last_theme: Cell<Option<(Theme, ResolvedTheme)>>,
    last_locale: RefCell<Option<String>>,
    last_preset: RefCell<Option<Preset>>,
}

/// Registry of plugins and their enabled/initialized state
///
/// Cloning yields another handle to the same manager.
#[derive(Clone)]
pub struct PluginManager {
    inner: Rc<ManagerInner>,
}

impl PluginManager {
    pub fn new(host: SharedHost, config: PluginConfig) -> Self {
        let manager = Self {
            inner: Rc::new(ManagerInner {
                host,
                config: RefCell::new(config),
                plugins: RefCell::new(IndexMap::new()),
                enabled: RefCell::new(IndexSet::new()),
                initialized: RefCell::new(FxHashSet::default()),
                configs: RefCell::new(FxHashMap::default()),
                last_theme: Cell::new(None),
                last_locale: RefCell::new(None),
                last_preset: RefCell::new(None),
            }),
        };
        manager.load_enabled();
        manager
    }

    pub fn with_defaults(host: SharedHost) -> Self {
        Self::new(host, PluginConfig::default())
    }

    pub fn config(&self) -> PluginConfig {
        self.inner.config.borrow().clone()
    }

    /// Replace the configuration, reload the enabled ids from storage and,
    /// with `auto_initialize`, initialize them
    pub fn configure(&self, config: PluginConfig) {
        debug!("PluginManager::configure: {:?}", config);
        let auto_initialize = config.auto_initialize;
        *self.inner.config.borrow_mut() = config;
        self.load_enabled();
        if auto_initialize {
            self.initialize();
        }
    }

    fn load_enabled(&self) {
        let config = self.config();
        if !config.enable_plugins {
            return;
        }
        let stored = match self.inner.host.get_stored_value(&config.storage_key) {
            Ok(Some(stored)) => stored,
            Ok(None) => return,
            Err(e) => {
                warn!("PluginManager: failed to read `{}`: {}", config.storage_key, e);
                return;
            }
        };
        match serde_json::from_str::<Vec<String>>(&stored) {
            Ok(ids) => *self.inner.enabled.borrow_mut() = ids.into_iter().collect(),
            Err(e) => warn!("PluginManager: ignoring malformed enabled list: {}", e),
        }
    }

    fn persist_enabled(&self) {
        let key = self.inner.config.borrow().storage_key.clone();
        let ids = self.enabled_ids();
        let result = serde_json::to_string(&ids)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.inner
                    .host
                    .set_stored_value(&key, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            warn!("PluginManager: failed to persist enabled plugins: {}", e);
        }
    }

    // ========== Registration ==========

    /// Add a plugin. A plugin whose id was enabled in an earlier session is
    /// initialized right away when `auto_initialize` is set.
    pub fn register(&self, plugin: impl Plugin + 'static) -> Result<()> {
        let plugin: Rc<dyn Plugin> = Rc::new(plugin);
        let id = plugin.id().to_string();

        if id.is_empty() || plugin.name().is_empty() || plugin.version().is_empty() {
            error!("PluginManager: invalid plugin `{}`", id);
            return Err(PluginError::Invalid);
        }
        if self.inner.plugins.borrow().contains_key(&id) {
            warn!("PluginManager: plugin `{}` is already registered", id);
            return Err(PluginError::AlreadyRegistered(id));
        }
        if let Some(missing) = plugin
            .dependencies()
            .iter()
            .find(|dep| !self.inner.plugins.borrow().contains_key(**dep))
        {
            error!("PluginManager: `{}` depends on unregistered `{}`", id, missing);
            return Err(PluginError::MissingDependency {
                plugin: id,
                dependency: missing.to_string(),
            });
        }

        debug!("PluginManager::register: {} {}", id, plugin.version());
        self.inner.plugins.borrow_mut().insert(id.clone(), plugin);

        if self.is_enabled(&id) && self.inner.config.borrow().auto_initialize {
            self.initialize_plugin(&id)?;
        }
        Ok(())
    }

    /// Remove a plugin; refused while another registered plugin depends on it
    pub fn unregister(&self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            warn!("PluginManager: plugin `{}` is not registered", id);
            return Err(PluginError::NotRegistered(id.to_string()));
        }
        if let Some(dependent) = self.dependent_of(id, false) {
            error!("PluginManager: cannot unregister `{}`, `{}` depends on it", id, dependent);
            return Err(PluginError::RequiredBy {
                plugin: id.to_string(),
                dependent,
            });
        }

        if self.is_enabled(id) {
            self.disable(id)?;
        }
        self.inner.plugins.borrow_mut().shift_remove(id);
        self.inner.configs.borrow_mut().remove(id);
        debug!("PluginManager::unregister: {}", id);
        Ok(())
    }

    /// First registered plugin (optionally only enabled ones) listing `id`
    /// as a dependency
    fn dependent_of(&self, id: &str, enabled_only: bool) -> Option<String> {
        let plugins = self.inner.plugins.borrow();
        let enabled = self.inner.enabled.borrow();
        plugins
            .iter()
            .filter(|(other, _)| !enabled_only || enabled.contains(other.as_str()))
            .find(|(_, plugin)| plugin.dependencies().contains(&id))
            .map(|(other, _)| other.clone())
    }

    // ========== Enable / disable ==========

    /// Enable a plugin together with its dependencies and initialize them
    pub fn enable(&self, id: &str) -> Result<()> {
        if !self.inner.config.borrow().enable_plugins {
            warn!("PluginManager: plugins are disabled");
            return Err(PluginError::Disabled);
        }
        let Some(plugin) = self.get(id) else {
            warn!("PluginManager: plugin `{}` is not registered", id);
            return Err(PluginError::NotRegistered(id.to_string()));
        };
        if self.is_enabled(id) {
            debug!("PluginManager: `{}` is already enabled", id);
            return Ok(());
        }
        for dependency in plugin.dependencies() {
            self.enable(dependency)?;
        }
        self.inner.enabled.borrow_mut().insert(id.to_string());

        debug!("PluginManager::enable: {}", id);
        self.initialize_plugin(id)?;
        self.persist_enabled();
        Ok(())
    }

    /// Disable a plugin; refused while an enabled plugin depends on it
    pub fn disable(&self, id: &str) -> Result<()> {
        let Some(plugin) = self.get(id) else {
            warn!("PluginManager: plugin `{}` is not registered", id);
            return Err(PluginError::NotRegistered(id.to_string()));
        };
        if !self.is_enabled(id) {
            return Ok(());
        }
        if let Some(dependent) = self.dependent_of(id, true) {
            error!("PluginManager: cannot disable `{}`, enabled `{}` depends on it", id, dependent);
            return Err(PluginError::RequiredBy {
                plugin: id.to_string(),
                dependent,
            });
        }

        run_hook(plugin.as_ref(), "on_disable", |p| p.on_disable());
        self.inner.enabled.borrow_mut().shift_remove(id);
        self.inner.initialized.borrow_mut().remove(id);
        debug!("PluginManager::disable: {}", id);
        self.persist_enabled();
        Ok(())
    }

    // ========== Initialization ==========

    /// Initialize one plugin, its dependencies first. Dependencies of an
    /// enabled plugin are enabled with it. A failing `on_init` is logged and
    /// leaves the plugin uninitialized.
    pub fn initialize_plugin(&self, id: &str) -> Result<()> {
        let Some(plugin) = self.get(id) else {
            warn!("PluginManager: plugin `{}` is not registered", id);
            return Err(PluginError::NotRegistered(id.to_string()));
        };
        if self.is_initialized(id) {
            return Ok(());
        }

        let enabled = self.is_enabled(id);
        let mut pulled_in = false;
        for dependency in plugin.dependencies() {
            if !self.is_initialized(dependency) {
                self.initialize_plugin(dependency)?;
            }
            if enabled && self.inner.enabled.borrow_mut().insert(dependency.to_string()) {
                debug!("PluginManager: enabling `{}` for `{}`", dependency, id);
                pulled_in = true;
            }
        }
        if pulled_in {
            self.persist_enabled();
        }

        if let Err(e) = plugin.on_init() {
            error!("Plugin `{}`: on_init failed: {}", id, e);
            return Ok(());
        }
        self.inner.initialized.borrow_mut().insert(id.to_string());
        debug!("PluginManager: initialized `{}`", id);

        if let Some((theme, resolved)) = self.inner.last_theme.get() {
            run_hook(plugin.as_ref(), "on_theme_change", |p| p.on_theme_change(theme, resolved));
        }
        let locale = self.inner.last_locale.borrow().clone();
        if let Some(locale) = locale {
            run_hook(plugin.as_ref(), "on_locale_change", |p| p.on_locale_change(&locale));
        }
        let preset = self.inner.last_preset.borrow().clone();
        if let Some(preset) = preset {
            run_hook(plugin.as_ref(), "on_preset_activated", |p| p.on_preset_activated(&preset));
        }
        Ok(())
    }

    /// Initialize every enabled, registered plugin
    pub fn initialize(&self) {
        let pending: Vec<String> = self
            .enabled_ids()
            .into_iter()
            .filter(|id| self.get(id).is_some() && !self.is_initialized(id))
            .collect();
        for id in pending {
            if let Err(e) = self.initialize_plugin(&id) {
                warn!("PluginManager: {}", e);
            }
        }
    }

    // ========== Queries ==========

    /// Registered plugins in registration order
    pub fn plugins(&self) -> Vec<Rc<dyn Plugin>> {
        self.inner.plugins.borrow().values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<Rc<dyn Plugin>> {
        self.inner.plugins.borrow().get(id).cloned()
    }

    pub fn enabled_ids(&self) -> Vec<String> {
        self.inner.enabled.borrow().iter().cloned().collect()
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.inner.enabled.borrow().contains(id)
    }

    pub fn is_initialized(&self, id: &str) -> bool {
        self.inner.initialized.borrow().contains(id)
    }

    /// Attach free-form settings to a registered plugin
    pub fn set_config(&self, id: &str, config: serde_json::Value) -> Result<()> {
        if self.get(id).is_none() {
            warn!("PluginManager: plugin `{}` is not registered", id);
            return Err(PluginError::NotRegistered(id.to_string()));
        }
        self.inner.configs.borrow_mut().insert(id.to_string(), config);
        Ok(())
    }

    pub fn plugin_config(&self, id: &str) -> Option<serde_json::Value> {
        self.inner.configs.borrow().get(id).cloned()
    }

    // ========== Notification ==========

    /// Enabled and initialized plugins, snapshotted so hooks may call back
    /// into the manager
    fn active_plugins(&self) -> Vec<Rc<dyn Plugin>> {
        let plugins = self.inner.plugins.borrow();
        let enabled = self.inner.enabled.borrow();
        let initialized = self.inner.initialized.borrow();
        enabled
            .iter()
            .filter(|id| initialized.contains(id.as_str()))
            .filter_map(|id| plugins.get(id).cloned())
            .collect()
    }

    pub fn notify_theme_change(&self, theme: Theme, resolved: ResolvedTheme) {
        self.inner.last_theme.set(Some((theme, resolved)));
        for plugin in self.active_plugins() {
            run_hook(plugin.as_ref(), "on_theme_change", |p| p.on_theme_change(theme, resolved));
        }
    }

    pub fn notify_locale_change(&self, locale: &str) {
        *self.inner.last_locale.borrow_mut() = Some(locale.to_string());
        for plugin in self.active_plugins() {
            run_hook(plugin.as_ref(), "on_locale_change", |p| p.on_locale_change(locale));
        }
    }

    pub fn notify_preset_activated(&self, preset: &Preset) {
        *self.inner.last_preset.borrow_mut() = Some(preset.clone());
        for plugin in self.active_plugins() {
            run_hook(plugin.as_ref(), "on_preset_activated", |p| p.on_preset_activated(preset));
        }
    }

    pub fn notify_config_change(&self, config: &FlexConfig) {
        for plugin in self.active_plugins() {
            run_hook(plugin.as_ref(), "on_config_change", |p| p.on_config_change(config));
        }
    }
}

fn run_hook(plugin: &dyn Plugin, hook: &str, f: impl FnOnce(&dyn Plugin) -> Result<()>) {
    if let Err(e) = f(plugin) {
        error!("Plugin `{}`: {} failed: {}", plugin.id(), hook, e);
    }
}

impl std::fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManager")
            .field("config", &self.inner.config.borrow())
            .field("plugins", &self.inner.plugins.borrow().keys().collect::<Vec<_>>())
            .field("enabled", &self.inner.enabled.borrow())
            .finish()
    }
}
