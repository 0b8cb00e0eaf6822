//! In-process host
//!
//! Behaves like a single browser tab: storage, root attributes, classes,
//! CSS variables and style sheets are kept in maps, and the "system"
//! preferences can be flipped to drive change notifications.

use std::cell::RefCell;
use std::rc::Rc;

use flex_core::{Emitter, Subscription};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::error::{HostError, Result};
use crate::host::{Host, SharedHost, StorageChange};
use crate::scheme::{ColorScheme, TextDirection};

#[derive(Default)]
struct MemoryState {
    storage: FxHashMap<String, String>,
    storage_fails: bool,
    attributes: FxHashMap<String, String>,
    classes: FxHashSet<String>,
    css_variables: FxHashMap<String, String>,
    style_sheets: FxHashMap<String, String>,
    language: Option<(String, TextDirection)>,
    system_scheme: Option<ColorScheme>,
    reduced_motion: bool,
    languages: Vec<String>,
    viewport_width: Option<u32>,
    touch: bool,
    portrait: Option<bool>,
}

/// Host backed by in-memory maps
///
/// Cloning yields another handle to the same state, so a test can keep one
/// handle for inspection while components hold another.
#[derive(Clone, Default)]
pub struct MemoryHost {
    state: Rc<RefCell<MemoryState>>,
    scheme_changes: Emitter<ColorScheme>,
    storage_changes: Emitter<StorageChange>,
    orientation_changes: Emitter<bool>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that reports the given system scheme
    pub fn with_system_scheme(scheme: ColorScheme) -> Self {
        let host = Self::new();
        host.state.borrow_mut().system_scheme = Some(scheme);
        host
    }

    /// Type-erased handle sharing this host's state
    pub fn shared(&self) -> SharedHost {
        Rc::new(self.clone())
    }

    // ========== Environment control ==========

    /// Change the reported system scheme and notify subscribers if it changed
    pub fn set_system_scheme(&self, scheme: ColorScheme) {
        let previous = self.state.borrow_mut().system_scheme.replace(scheme);
        if previous != Some(scheme) {
            trace!("MemoryHost: system scheme -> {}", scheme);
            self.scheme_changes.emit(&scheme);
        }
    }

    /// Write a value as if another tab had done it: storage is updated and
    /// storage-change subscribers are notified.
    pub fn simulate_external_write(&self, key: &str, value: Option<&str>) {
        {
            let mut state = self.state.borrow_mut();
            match value {
                Some(v) => state.storage.insert(key.to_string(), v.to_string()),
                None => state.storage.remove(key),
            };
        }
        self.storage_changes.emit(&StorageChange {
            key: key.to_string(),
            new_value: value.map(str::to_string),
        });
    }

    /// Make every storage read/write fail (quota exceeded, privacy mode)
    pub fn set_storage_failure(&self, fails: bool) {
        self.state.borrow_mut().storage_fails = fails;
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        self.state.borrow_mut().reduced_motion = reduced;
    }

    pub fn set_preferred_languages<I, S>(&self, languages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.borrow_mut().languages = languages.into_iter().map(Into::into).collect();
    }

    pub fn set_viewport_width(&self, width: u32) {
        self.state.borrow_mut().viewport_width = Some(width);
    }

    pub fn set_touch_device(&self, touch: bool) {
        self.state.borrow_mut().touch = touch;
    }

    /// Change orientation and notify orientation subscribers
    pub fn set_portrait(&self, portrait: bool) {
        self.state.borrow_mut().portrait = Some(portrait);
        self.orientation_changes.emit(&portrait);
    }

    // ========== Inspection ==========

    /// Raw stored value, bypassing the failure switch
    pub fn stored(&self, key: &str) -> Option<String> {
        self.state.borrow().storage.get(key).cloned()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.contains(class)
    }

    pub fn style_sheet(&self, id: &str) -> Option<String> {
        self.state.borrow().style_sheets.get(id).cloned()
    }

    pub fn language(&self) -> Option<(String, TextDirection)> {
        self.state.borrow().language.clone()
    }

    /// Number of live system-scheme subscriptions
    pub fn scheme_subscriber_count(&self) -> usize {
        self.scheme_changes.len()
    }

    /// Number of live storage-change subscriptions
    pub fn storage_subscriber_count(&self) -> usize {
        self.storage_changes.len()
    }
}

impl Host for MemoryHost {
    fn get_stored_value(&self, key: &str) -> Result<Option<String>> {
        let state = self.state.borrow();
        if state.storage_fails {
            return Err(HostError::storage(key, "storage is unavailable"));
        }
        Ok(state.storage.get(key).cloned())
    }

    fn set_stored_value(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.storage_fails {
            return Err(HostError::storage(key, "quota exceeded"));
        }
        state.storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_stored_value(&self, key: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.storage_fails {
            return Err(HostError::storage(key, "storage is unavailable"));
        }
        state.storage.remove(key);
        Ok(())
    }

    fn system_color_scheme(&self) -> Option<ColorScheme> {
        self.state.borrow().system_scheme
    }

    fn apply_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn subscribe_system_scheme_change(&self, callback: Box<dyn Fn(ColorScheme)>) -> Subscription {
        self.scheme_changes.subscribe(move |scheme| callback(*scheme))
    }

    fn subscribe_storage_change(&self, callback: Box<dyn Fn(&StorageChange)>) -> Subscription {
        self.storage_changes.subscribe(move |change| callback(change))
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.state.borrow().reduced_motion
    }

    fn set_css_variable(&self, name: &str, value: &str) -> Result<()> {
        self.state
            .borrow_mut()
            .css_variables
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn css_variable(&self, name: &str) -> Option<String> {
        self.state.borrow().css_variables.get(name).cloned()
    }

    fn set_root_class(&self, class: &str, enabled: bool) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if enabled {
            state.classes.insert(class.to_string());
        } else {
            state.classes.remove(class);
        }
        Ok(())
    }

    fn set_document_language(&self, lang: &str, direction: TextDirection) -> Result<()> {
        self.state.borrow_mut().language = Some((lang.to_string(), direction));
        Ok(())
    }

    fn preferred_languages(&self) -> Vec<String> {
        self.state.borrow().languages.clone()
    }

    fn install_style_sheet(&self, id: &str, css: &str) -> Result<()> {
        self.state
            .borrow_mut()
            .style_sheets
            .insert(id.to_string(), css.to_string());
        Ok(())
    }

    fn viewport_width(&self) -> Option<u32> {
        self.state.borrow().viewport_width
    }

    fn is_touch_device(&self) -> bool {
        self.state.borrow().touch
    }

    fn is_portrait(&self) -> Option<bool> {
        self.state.borrow().portrait
    }

    fn subscribe_orientation_change(&self, callback: Box<dyn Fn(bool)>) -> Subscription {
        self.orientation_changes
            .subscribe(move |portrait| callback(*portrait))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use pretty_assertions::assert_eq;

    #[test]
    fn scheme_change_fires_only_on_change() {
        let host = MemoryHost::with_system_scheme(ColorScheme::Light);
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let _sub = host.subscribe_system_scheme_change(Box::new(move |_| c.set(c.get() + 1)));

        host.set_system_scheme(ColorScheme::Light);
        host.set_system_scheme(ColorScheme::Dark);
        assert_eq!(calls.get(), 1);
        assert_eq!(host.system_color_scheme(), Some(ColorScheme::Dark));
    }

    #[test]
    fn storage_failure_surfaces_as_error() {
        let host = MemoryHost::new();
        host.set_storage_failure(true);
        let err = host.set_stored_value("k", "v").unwrap_err();
        assert!(matches!(err, HostError::Storage { .. }));
        assert_eq!(host.stored("k"), None);
    }

    #[test]
    fn clones_share_state() {
        let host = MemoryHost::new();
        let shared = host.shared();
        shared.apply_attribute("data-theme", "dark").unwrap();
        assert_eq!(host.attribute("data-theme").as_deref(), Some("dark"));
    }

    #[test]
    fn external_write_notifies_and_persists() {
        let host = MemoryHost::new();
        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        let _sub = host.subscribe_storage_change(Box::new(move |c| {
            *s.borrow_mut() = Some(c.clone());
        }));

        host.simulate_external_write("flex-theme", Some("dark"));
        assert_eq!(host.stored("flex-theme").as_deref(), Some("dark"));
        assert_eq!(
            seen.borrow().as_ref().map(|c| c.new_value.clone()),
            Some(Some("dark".to_string()))
        );
    }
}
