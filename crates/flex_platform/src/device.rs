//! Device classification and mobile-specific root tweaks

use flex_core::Subscription;
use tracing::{debug, warn};

use crate::host::{Host, SharedHost};

/// Coarse device class derived from viewport width
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceType {
    /// Widths below 768px are mobile, below 1024px tablet
    pub fn from_width(width: u32) -> Self {
        match width {
            0..=767 => Self::Mobile,
            768..=1023 => Self::Tablet,
            _ => Self::Desktop,
        }
    }

    /// Classify the host's viewport; desktop when the width is unknown
    pub fn detect(host: &dyn Host) -> Self {
        host.viewport_width()
            .map(Self::from_width)
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }

    pub fn is_handheld(self) -> bool {
        matches!(self, Self::Mobile | Self::Tablet)
    }
}

fn set_orientation_classes(host: &dyn Host, portrait: bool) {
    let (on, off) = if portrait {
        ("portrait", "landscape")
    } else {
        ("landscape", "portrait")
    };
    if let Err(e) = host
        .set_root_class(on, true)
        .and_then(|_| host.set_root_class(off, false))
    {
        warn!("Failed to update orientation classes: {}", e);
    }
}

/// Tag the root element for touch/device/orientation targeting and enlarge
/// touch targets on handheld devices.
///
/// Returns the orientation-change subscription; unsubscribe it to stop
/// tracking orientation.
pub fn apply_mobile_optimizations(host: &SharedHost) -> Subscription {
    let device = DeviceType::detect(host.as_ref());
    debug!("apply_mobile_optimizations: device={}", device.as_str());

    let mut result = Ok(());
    if host.is_touch_device() {
        result = result.and_then(|_| host.set_root_class("touch-device", true));
    }
    result = result.and_then(|_| host.set_root_class(&format!("device-{}", device.as_str()), true));

    if device.is_handheld() {
        result = result
            .and_then(|_| host.set_css_variable("touch-target-size", "44px"))
            .and_then(|_| host.set_css_variable("input-padding", "12px"))
            .and_then(|_| host.set_css_variable("button-min-height", "44px"));
        if device == DeviceType::Mobile {
            result = result.and_then(|_| host.set_css_variable("font-size-adjustment", "1.1"));
        }
    }
    if let Err(e) = result {
        warn!("Failed to apply mobile optimizations: {}", e);
    }

    if let Some(portrait) = host.is_portrait() {
        set_orientation_classes(host.as_ref(), portrait);
    }

    let weak = std::rc::Rc::downgrade(host);
    host.subscribe_orientation_change(Box::new(move |portrait| {
        if let Some(host) = weak.upgrade() {
            set_orientation_classes(host.as_ref(), portrait);
        }
    }))
}
