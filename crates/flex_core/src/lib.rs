//! flex-theme core
//!
//! Small building blocks shared by every other flex-theme crate:
//!
//! - [`Color`]: 8-bit sRGB colors with hex parsing/formatting
//! - WCAG contrast helpers ([`contrast_ratio`], [`is_accessible`],
//!   [`accessible_color`])
//! - [`Emitter`]: a single-threaded listener registry with typed payloads
//!   and idempotent [`Subscription`] handles

pub mod color;
pub mod emitter;

pub use color::{
    accessible_color, contrast_ratio, is_accessible, is_light_color, Color, ColorParseError,
    ContrastLevel,
};
pub use emitter::{Emitter, Subscription};
