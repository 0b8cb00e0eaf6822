//! Plugins shipped with flex-theme

use std::cell::RefCell;
use std::rc::Rc;

use flex_theme::{ResolvedTheme, Theme, ThemeStore};
use tracing::{debug, info};

use super::{Plugin, Result};

/// A theme change recorded by [`AnalyticsPlugin`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub event: &'static str,
    pub theme: Theme,
    pub resolved: ResolvedTheme,
}

/// Records theme changes and reports them through `tracing`
///
/// Clones share the recorded events.
#[derive(Clone, Debug, Default)]
pub struct AnalyticsPlugin {
    events: Rc<RefCell<Vec<AnalyticsEvent>>>,
}

impl AnalyticsPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.borrow().clone()
    }
}

impl Plugin for AnalyticsPlugin {
    fn id(&self) -> &str {
        "analytics"
    }

    fn name(&self) -> &str {
        "Analytics Plugin"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn description(&self) -> Option<&str> {
        Some("Tracks theme changes for analytics")
    }

    fn on_init(&self) -> Result<()> {
        info!("Analytics plugin initialized");
        Ok(())
    }

    fn on_theme_change(&self, theme: Theme, resolved: ResolvedTheme) -> Result<()> {
        info!(event = "theme_change", %theme, %resolved, "Theme changed");
        self.events.borrow_mut().push(AnalyticsEvent {
            event: "theme_change",
            theme,
            resolved,
        });
        Ok(())
    }

    fn on_disable(&self) -> Result<()> {
        info!("Analytics plugin disabled");
        Ok(())
    }
}

/// Puts the theme store in `auto` mode so it follows the system scheme
#[derive(Clone, Debug)]
pub struct SystemThemePlugin {
    store: ThemeStore,
}

impl SystemThemePlugin {
    pub fn new(store: ThemeStore) -> Self {
        Self { store }
    }
}

impl Plugin for SystemThemePlugin {
    fn id(&self) -> &str {
        "system-theme"
    }

    fn name(&self) -> &str {
        "System Theme Plugin"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn description(&self) -> Option<&str> {
        Some("Automatically switches theme based on system preferences")
    }

    fn on_init(&self) -> Result<()> {
        if self.store.get_theme() != Theme::Auto {
            debug!("SystemThemePlugin: switching to auto");
            self.store.set_theme(Theme::Auto);
        }
        Ok(())
    }

    fn on_disable(&self) -> Result<()> {
        debug!("SystemThemePlugin: disabled");
        Ok(())
    }
}
