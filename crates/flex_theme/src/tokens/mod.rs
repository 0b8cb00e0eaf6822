//! Design tokens for theming
//!
//! Tokens are the atomic values that make up the design system:
//! - Colors (light and dark tables with identical keys)
//! - Spacing
//! - Border radii
//! - Typography (families, sizes, weights, line heights)
//! - Shadows
//!
//! Every table can enumerate itself as CSS custom properties through
//! [`CssTokens`].

mod color;
mod radius;
mod shadow;
mod spacing;
mod typography;

pub use color::*;
pub use radius::*;
pub use shadow::*;
pub use spacing::*;
pub use typography::*;

/// A token table that can be published as CSS custom properties
pub trait CssTokens {
    /// `(variable name without "--", value)` pairs in declaration order
    fn css_variables(&self) -> Vec<(String, String)>;
}

/// A CSS length used by the scale tables
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Zero,
    Rem(f32),
    Px(f32),
}

impl Length {
    pub fn to_css(self) -> String {
        match self {
            Length::Zero => "0".to_string(),
            Length::Rem(v) => format!("{}rem", format_number(v)),
            Length::Px(v) => format!("{}px", format_number(v)),
        }
    }

    /// Length in CSS pixels, assuming a 16px root font size
    pub fn to_px(self) -> f32 {
        match self {
            Length::Zero => 0.0,
            Length::Rem(v) => v * 16.0,
            Length::Px(v) => v,
        }
    }
}

/// Shortest decimal form: `1` not `1.0`, `0.125` kept as is
pub(crate) fn format_number(v: f32) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
