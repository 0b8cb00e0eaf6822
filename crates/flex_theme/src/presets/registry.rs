use std::cell::RefCell;
use std::rc::Rc;

use flex_core::{Emitter, Subscription};
use flex_platform::SharedHost;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{built_in_presets, Preset, PresetKind};
use crate::config::DEFAULT_ATTRIBUTE;
use crate::error::{Result, ThemeError};

pub const DEFAULT_PRESET_STORAGE_KEY: &str = "flex-theme-presets";
pub const DEFAULT_PRESET_ID: &str = "light";
pub const PRESET_ATTRIBUTE: &str = "data-theme-preset";

fn default_storage_key() -> String {
    DEFAULT_PRESET_STORAGE_KEY.to_string()
}

fn default_preset_id() -> String {
    DEFAULT_PRESET_ID.to_string()
}

fn default_theme_attribute() -> String {
    DEFAULT_ATTRIBUTE.to_string()
}

fn default_true() -> bool {
    true
}

/// Preset registry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
    /// Key holding the active preset id; custom presets live under
    /// `<storage_key>-custom`
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Preset used when nothing valid is persisted
    #[serde(default = "default_preset_id")]
    pub default_preset_id: String,

    #[serde(default = "default_true")]
    pub enable_persistence: bool,

    /// Root attribute receiving the active preset's kind
    #[serde(default = "default_theme_attribute")]
    pub theme_attribute: String,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_preset_id: default_preset_id(),
            enable_persistence: true,
            theme_attribute: default_theme_attribute(),
        }
    }
}

impl PresetConfig {
    pub fn custom_storage_key(&self) -> String {
        format!("{}-custom", self.storage_key)
    }
}

struct RegistryInner {
    host: SharedHost,
    config: RefCell<PresetConfig>,
    presets: RefCell<Vec<Preset>>,
    active_id: RefCell<String>,
    listeners: Emitter<Preset>,
}

/// Built-in and custom presets, with the active one mirrored to storage
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct PresetRegistry {
    inner: Rc<RegistryInner>,
}

impl PresetRegistry {
    /// Create a registry and load the persisted active id and custom presets
    pub fn new(host: SharedHost, config: PresetConfig) -> Self {
        let registry = Self {
            inner: Rc::new(RegistryInner {
                host,
                active_id: RefCell::new(config.default_preset_id.clone()),
                config: RefCell::new(config),
                presets: RefCell::new(built_in_presets()),
                listeners: Emitter::new(),
            }),
        };
        registry.load();
        registry
    }

    pub fn with_defaults(host: SharedHost) -> Self {
        Self::new(host, PresetConfig::default())
    }

    pub fn config(&self) -> PresetConfig {
        self.inner.config.borrow().clone()
    }

    /// Replace the configuration and reload persisted state
    pub fn configure(&self, config: PresetConfig) {
        *self.inner.config.borrow_mut() = config;
        *self.inner.presets.borrow_mut() = built_in_presets();
        self.load();
    }

    fn load(&self) {
        let config = self.config();
        let mut active = config.default_preset_id.clone();

        if config.enable_persistence {
            let custom = self.read_custom(&config.custom_storage_key());
            if !custom.is_empty() {
                debug!("PresetRegistry: loaded {} custom preset(s)", custom.len());
                let mut presets = self.inner.presets.borrow_mut();
                for preset in custom {
                    if presets.iter().any(|p| p.id == preset.id) {
                        warn!("PresetRegistry: stored preset `{}` shadows an existing id", preset.id);
                        continue;
                    }
                    presets.push(preset);
                }
            }

            match self.inner.host.get_stored_value(&config.storage_key) {
                Ok(Some(id)) if self.get(&id).is_some() => active = id,
                Ok(_) => {}
                Err(e) => warn!("PresetRegistry: failed to read active preset: {}", e),
            }
        }

        *self.inner.active_id.borrow_mut() = active;
    }

    fn read_custom(&self, key: &str) -> Vec<Preset> {
        match self.inner.host.get_stored_value(key) {
            Ok(Some(json)) => parse_presets(&json).unwrap_or_else(|e| {
                warn!("PresetRegistry: ignoring malformed `{}`: {}", key, e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("PresetRegistry: failed to read `{}`: {}", key, e);
                Vec::new()
            }
        }
    }

    // ========== Queries ==========

    /// Every preset, built-ins first
    pub fn all(&self) -> Vec<Preset> {
        self.inner.presets.borrow().clone()
    }

    pub fn built_in(&self) -> Vec<Preset> {
        self.filtered(|p| p.built_in)
    }

    pub fn custom(&self) -> Vec<Preset> {
        self.filtered(|p| !p.built_in)
    }

    fn filtered(&self, keep: impl Fn(&Preset) -> bool) -> Vec<Preset> {
        self.inner
            .presets
            .borrow()
            .iter()
            .filter(|p| keep(*p))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Preset> {
        self.inner.presets.borrow().iter().find(|p| p.id == id).cloned()
    }

    pub fn active_id(&self) -> String {
        self.inner.active_id.borrow().clone()
    }

    /// The active preset; an id that no longer resolves falls back to the
    /// built-in `dark` or `light` preset
    pub fn active(&self) -> Preset {
        let id = self.active_id();
        if let Some(preset) = self.get(&id) {
            return preset;
        }
        let fallback = if id == "dark" { "dark" } else { DEFAULT_PRESET_ID };
        built_in_presets()
            .into_iter()
            .find(|p| p.id == fallback)
            .unwrap_or_else(|| Preset::new(DEFAULT_PRESET_ID, "Light", PresetKind::Light))
    }

    // ========== Mutation ==========

    /// Activate a preset: persist its id, publish its colors and notify
    /// preset listeners
    pub fn set_active(&self, id: &str) -> Result<()> {
        let Some(preset) = self.get(id) else {
            warn!("PresetRegistry: preset `{}` not found", id);
            return Err(ThemeError::UnknownPreset(id.to_string()));
        };

        debug!("PresetRegistry::set_active: {}", id);
        *self.inner.active_id.borrow_mut() = id.to_string();

        let config = self.config();
        if config.enable_persistence {
            if let Err(e) = self.inner.host.set_stored_value(&config.storage_key, id) {
                warn!("PresetRegistry: failed to persist active preset: {}", e);
            }
        }

        self.apply(&preset);
        self.inner.listeners.emit(&preset);
        Ok(())
    }

    /// Publish the active preset without changing anything
    pub fn apply_active(&self) {
        self.apply(&self.active());
    }

    /// Insert or replace a custom preset. The stored copy is always marked
    /// custom; ids of built-in presets are refused.
    pub fn add_custom(&self, mut preset: Preset) -> Result<Preset> {
        if let Err(reason) = preset.validate() {
            warn!("PresetRegistry: {}", reason);
            return Err(ThemeError::InvalidPreset(reason));
        }
        preset.built_in = false;

        {
            let mut presets = self.inner.presets.borrow_mut();
            match presets.iter().position(|p| p.id == preset.id) {
                Some(index) if presets[index].built_in => {
                    warn!("PresetRegistry: cannot replace built-in preset `{}`", preset.id);
                    return Err(ThemeError::BuiltInPreset(preset.id));
                }
                Some(index) => presets[index] = preset.clone(),
                None => presets.push(preset.clone()),
            }
        }

        debug!("PresetRegistry::add_custom: {}", preset.id);
        self.persist_custom();
        Ok(preset)
    }

    /// Remove a custom preset. Returns `false` for unknown ids and
    /// built-ins. Removing the active preset activates the default one.
    pub fn remove_custom(&self, id: &str) -> bool {
        match self.get(id) {
            None => {
                warn!("PresetRegistry: preset `{}` not found", id);
                return false;
            }
            Some(preset) if preset.built_in => {
                warn!("PresetRegistry: cannot remove built-in preset `{}`", id);
                return false;
            }
            Some(_) => {}
        }

        self.inner.presets.borrow_mut().retain(|p| p.id != id);
        debug!("PresetRegistry::remove_custom: {}", id);

        if self.active_id() == id {
            let default_id = self.config().default_preset_id;
            if self.set_active(&default_id).is_err() {
                *self.inner.active_id.borrow_mut() = DEFAULT_PRESET_ID.to_string();
            }
        }

        self.persist_custom();
        true
    }

    fn persist_custom(&self) {
        let config = self.config();
        if !config.enable_persistence {
            return;
        }
        let result = serde_json::to_string(&self.custom())
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.inner
                    .host
                    .set_stored_value(&config.custom_storage_key(), &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            warn!("PresetRegistry: failed to persist custom presets: {}", e);
        }
    }

    // ========== Import / export ==========

    /// JSON array of the given presets, or of every custom preset when
    /// `ids` is `None`
    pub fn export(&self, ids: Option<&[&str]>) -> String {
        let presets = match ids {
            Some(ids) => self.filtered(|p| ids.contains(&p.id.as_str())),
            None => self.custom(),
        };
        serde_json::to_string(&presets).unwrap_or_else(|e| {
            warn!("PresetRegistry: export failed: {}", e);
            "[]".to_string()
        })
    }

    /// Add every valid preset in a JSON array as custom presets and return
    /// those that were added. Malformed input imports nothing.
    pub fn import(&self, json: &str) -> Vec<Preset> {
        let presets = match parse_presets(json) {
            Ok(presets) => presets,
            Err(e) => {
                warn!("PresetRegistry: failed to import presets: {}", e);
                return Vec::new();
            }
        };
        presets
            .into_iter()
            .filter_map(|preset| self.add_custom(preset).ok())
            .collect()
    }

    /// Register a listener called with the newly activated preset
    pub fn on_preset_change(&self, listener: impl Fn(&Preset) + 'static) -> Subscription {
        self.inner.listeners.subscribe(listener)
    }

    // ========== Side effects ==========

    fn apply(&self, preset: &Preset) {
        let host = &self.inner.host;
        let attribute = self.inner.config.borrow().theme_attribute.clone();

        let mut result = Ok(());
        for (token, color) in &preset.colors {
            result = result.and_then(|_| host.set_css_variable(&token.css_name(), &color.to_css()));
        }
        let result = result
            .and_then(|_| host.apply_attribute(PRESET_ATTRIBUTE, &preset.id))
            .and_then(|_| host.apply_attribute(&attribute, preset.kind.as_str()));
        if let Err(e) = result {
            warn!("PresetRegistry: failed to apply preset `{}`: {}", preset.id, e);
        }
    }
}

/// Parse a JSON array of presets, skipping entries that do not validate
fn parse_presets(json: &str) -> std::result::Result<Vec<Preset>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Preset>(value) {
            Ok(preset) if preset.validate().is_ok() => Some(preset),
            Ok(preset) => {
                warn!("PresetRegistry: skipping invalid preset `{}`", preset.id);
                None
            }
            Err(e) => {
                warn!("PresetRegistry: skipping malformed preset: {}", e);
                None
            }
        })
        .collect())
}

impl std::fmt::Debug for PresetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetRegistry")
            .field("active_id", &self.inner.active_id.borrow())
            .field("presets", &self.inner.presets.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flex_platform::MemoryHost;

    #[test]
    fn parse_skips_invalid_entries() {
        let json = r##"[
            {"id": "ok", "name": "Ok", "type": "light", "colors": {"primary": "#112233"}},
            {"id": "", "name": "No id", "type": "light", "colors": {}},
            {"id": "bad", "name": "Bad", "type": "neon", "colors": {}}
        ]"##;
        let presets = parse_presets(json).unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].id, "ok");
    }

    #[test]
    fn persistence_can_be_disabled() {
        let host = MemoryHost::new();
        let config = PresetConfig {
            enable_persistence: false,
            ..PresetConfig::default()
        };
        let registry = PresetRegistry::new(host.shared(), config);
        registry.set_active("sepia").unwrap();
        assert_eq!(host.stored("flex-theme-presets"), None);
        assert_eq!(registry.active_id(), "sepia");
    }
}
