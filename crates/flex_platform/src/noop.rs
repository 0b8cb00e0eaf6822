//! Host for non-browser execution

use flex_core::Subscription;

use crate::error::Result;
use crate::host::Host;
use crate::scheme::ColorScheme;

/// Host with no environment behind it
///
/// Reads return nothing, writes succeed without effect, subscriptions never
/// fire. Theme logic running on it falls back to configured defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl Host for NoopHost {
    fn get_stored_value(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set_stored_value(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove_stored_value(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    fn system_color_scheme(&self) -> Option<ColorScheme> {
        None
    }

    fn apply_attribute(&self, _name: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn subscribe_system_scheme_change(&self, _callback: Box<dyn Fn(ColorScheme)>) -> Subscription {
        Subscription::noop()
    }

    fn is_available(&self) -> bool {
        false
    }
}
