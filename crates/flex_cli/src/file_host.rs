//! Host persisting storage to a JSON file
//!
//! The terminal has no document, so attribute/class/style operations are
//! logged and otherwise ignored.

use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use flex_i18n::normalize_locale;
use flex_platform::{ColorScheme, Host, HostError, Result, Subscription, TextDirection};
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

pub struct FileHost {
    path: PathBuf,
    values: RefCell<IndexMap<String, String>>,
    system_scheme: Option<ColorScheme>,
    languages: Vec<String>,
}

impl FileHost {
    /// Open (or start) the state file at `path`. A corrupt file is logged
    /// and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("FileHost: ignoring malformed {}: {}", path.display(), e);
                IndexMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => IndexMap::new(),
            Err(e) => return Err(HostError::storage(&path.display().to_string(), e.to_string())),
        };
        debug!("FileHost: opened {} ({} value(s))", path.display(), values.len());

        Ok(Self {
            path,
            values: RefCell::new(values),
            system_scheme: None,
            languages: Vec::new(),
        })
    }

    /// Report `scheme` as the system color scheme
    pub fn with_system_scheme(mut self, scheme: Option<ColorScheme>) -> Self {
        self.system_scheme = scheme;
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    fn flush(&self, key: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(&*self.values.borrow())
            .map_err(|e| HostError::storage(key, e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| HostError::storage(key, e.to_string()))?;
        }
        fs::write(&self.path, json).map_err(|e| HostError::storage(key, e.to_string()))
    }
}

/// Preferred languages from `LC_ALL`, `LC_MESSAGES` and `LANG`, in that
/// order. `C` and `POSIX` are skipped.
pub fn languages_from_env() -> Vec<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| normalize_locale(&value))
        .filter(|l| !l.is_empty() && l != "C" && l != "POSIX")
        .collect()
}

impl Host for FileHost {
    fn get_stored_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set_stored_value(&self, key: &str, value: &str) -> Result<()> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        self.flush(key)
    }

    fn remove_stored_value(&self, key: &str) -> Result<()> {
        if self.values.borrow_mut().shift_remove(key).is_some() {
            self.flush(key)?;
        }
        Ok(())
    }

    fn system_color_scheme(&self) -> Option<ColorScheme> {
        self.system_scheme
    }

    fn apply_attribute(&self, name: &str, value: &str) -> Result<()> {
        trace!("FileHost: {}={}", name, value);
        Ok(())
    }

    fn subscribe_system_scheme_change(&self, _callback: Box<dyn Fn(ColorScheme)>) -> Subscription {
        Subscription::noop()
    }

    fn set_document_language(&self, lang: &str, direction: TextDirection) -> Result<()> {
        trace!("FileHost: lang={} dir={}", lang, direction);
        Ok(())
    }

    fn preferred_languages(&self) -> Vec<String> {
        self.languages.clone()
    }
}
