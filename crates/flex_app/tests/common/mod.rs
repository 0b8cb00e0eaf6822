#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use flex_app::{FlexConfig, Plugin, PluginError};
use flex_theme::{Preset, ResolvedTheme, Theme};

pub type Log = Rc<RefCell<Vec<String>>>;

/// Plugin that writes every hook call to a shared log
#[derive(Clone)]
pub struct Recorder {
    pub id: &'static str,
    pub deps: &'static [&'static str],
    pub fail_init: bool,
    pub log: Log,
}

impl Recorder {
    pub fn new(id: &'static str, log: &Log) -> Self {
        Self {
            id,
            deps: &[],
            fail_init: false,
            log: log.clone(),
        }
    }

    pub fn depends_on(mut self, deps: &'static [&'static str]) -> Self {
        self.deps = deps;
        self
    }

    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    fn push(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }
}

impl Plugin for Recorder {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        "Recorder"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn dependencies(&self) -> &[&str] {
        self.deps
    }

    fn on_init(&self) -> Result<(), PluginError> {
        if self.fail_init {
            return Err(PluginError::Hook("boom".into()));
        }
        self.push(format!("init:{}", self.id));
        Ok(())
    }

    fn on_theme_change(&self, theme: Theme, resolved: ResolvedTheme) -> Result<(), PluginError> {
        self.push(format!("theme:{}:{}/{}", self.id, theme, resolved));
        Ok(())
    }

    fn on_locale_change(&self, locale: &str) -> Result<(), PluginError> {
        self.push(format!("locale:{}:{}", self.id, locale));
        Ok(())
    }

    fn on_preset_activated(&self, preset: &Preset) -> Result<(), PluginError> {
        self.push(format!("preset:{}:{}", self.id, preset.id));
        Ok(())
    }

    fn on_config_change(&self, config: &FlexConfig) -> Result<(), PluginError> {
        self.push(format!("config:{}:{}", self.id, config.attribute));
        Ok(())
    }

    fn on_disable(&self) -> Result<(), PluginError> {
        self.push(format!("disable:{}", self.id));
        Ok(())
    }
}

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}
