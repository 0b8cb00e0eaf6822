//! The host capability trait

use std::rc::Rc;

use flex_core::Subscription;

use crate::error::Result;
use crate::scheme::{ColorScheme, TextDirection};

/// Shared, type-erased host handle passed to every component
pub type SharedHost = Rc<dyn Host>;

/// A storage mutation made outside this process/tab
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageChange {
    pub key: String,
    /// `None` when the key was removed
    pub new_value: Option<String>,
}

/// Environment capabilities used by flex-theme
///
/// The first six methods are the core contract. Everything else has a
/// harmless default so minimal hosts only implement what they have.
pub trait Host {
    /// Read a persisted string value
    fn get_stored_value(&self, key: &str) -> Result<Option<String>>;

    /// Persist a string value
    fn set_stored_value(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a persisted value
    fn remove_stored_value(&self, key: &str) -> Result<()>;

    /// The host's reported color scheme, `None` if it cannot tell
    fn system_color_scheme(&self) -> Option<ColorScheme>;

    /// Set an attribute on the document root element
    fn apply_attribute(&self, name: &str, value: &str) -> Result<()>;

    /// Be told whenever the host's color scheme changes
    fn subscribe_system_scheme_change(&self, callback: Box<dyn Fn(ColorScheme)>) -> Subscription;

    /// Whether this host is a real environment. [`NoopHost`](crate::NoopHost)
    /// returns `false`.
    fn is_available(&self) -> bool {
        true
    }

    /// Be told about storage writes made elsewhere (other tabs/windows)
    fn subscribe_storage_change(&self, _callback: Box<dyn Fn(&StorageChange)>) -> Subscription {
        Subscription::noop()
    }

    /// `prefers-reduced-motion: reduce`
    fn prefers_reduced_motion(&self) -> bool {
        false
    }

    /// Set a CSS custom property on the root element (`name` without `--`)
    fn set_css_variable(&self, _name: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    /// Computed value of a CSS custom property on the root element
    fn css_variable(&self, _name: &str) -> Option<String> {
        None
    }

    /// Add or remove a class on the root element
    fn set_root_class(&self, _class: &str, _enabled: bool) -> Result<()> {
        Ok(())
    }

    /// Set `lang` and `dir` on the root element
    fn set_document_language(&self, _lang: &str, _direction: TextDirection) -> Result<()> {
        Ok(())
    }

    /// The user's preferred languages, most preferred first
    fn preferred_languages(&self) -> Vec<String> {
        Vec::new()
    }

    /// Create or replace the `<style>` element with the given id
    fn install_style_sheet(&self, _id: &str, _css: &str) -> Result<()> {
        Ok(())
    }

    /// Viewport width in CSS pixels
    fn viewport_width(&self) -> Option<u32> {
        None
    }

    fn is_touch_device(&self) -> bool {
        false
    }

    /// `Some(true)` in portrait orientation, `None` if unknown
    fn is_portrait(&self) -> Option<bool> {
        None
    }

    /// Be told when the device orientation changes; the callback receives
    /// `true` for portrait
    fn subscribe_orientation_change(&self, _callback: Box<dyn Fn(bool)>) -> Subscription {
        Subscription::noop()
    }
}
