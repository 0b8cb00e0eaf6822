//! Color types and contrast utilities

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// 8-bit sRGB color with alpha
///
/// Tokens are authored as CSS hex strings, so components are kept as bytes
/// to make `#rrggbb` round-trips exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error returned when a CSS hex color cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color `{0}` (expected #rgb, #rrggbb or #rrggbbaa)")]
pub struct ColorParseError(pub String);

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from hex value (0xRRGGBB)
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Parse a CSS hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`, `#` optional)
    pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());

        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(hex.chars()) {
                    let v = c.to_digit(16).ok_or_else(err)? as u8;
                    *slot = v * 17;
                }
                Ok(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }

    /// Set alpha (0.0 - 1.0) and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Alpha as a 0.0 - 1.0 fraction
    pub fn alpha(&self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Linear interpolation between two colors
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(from.r, to.r),
            g: mix(from.g, to.g),
            b: mix(from.b, to.b),
            a: mix(from.a, to.a),
        }
    }

    /// CSS representation: lowercase `#rrggbb` when opaque, `rgba(...)` otherwise
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                trim_float(self.alpha())
            )
        }
    }

    /// WCAG relative luminance (0.0 - 1.0)
    pub fn relative_luminance(&self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// Perceived brightness (0.0 - 1.0), YIQ weights
    pub fn perceived_brightness(&self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    /// Shift HSL lightness by `amount` percent (-100 to 100), scaling channels
    /// proportionally.
    pub fn adjust_lightness(&self, amount: f64) -> Self {
        let max = self.r.max(self.g).max(self.b) as f64 / 255.0;
        let min = self.r.min(self.g).min(self.b) as f64 / 255.0;
        let l = (max + min) / 2.0;
        let new_l = (l + amount / 100.0).clamp(0.0, 1.0);

        // Black has no hue to scale; lift it to a gray of the target lightness.
        if l == 0.0 {
            let v = (new_l * 255.0).round() as u8;
            return Self::rgba(v, v, v, self.a);
        }

        let factor = new_l / l;
        let scale = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
        Self::rgba(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}

fn trim_float(v: f32) -> String {
    let mut s = format!("{v:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.a == 255 {
            serializer.serialize_str(&self.to_css())
        } else {
            serializer.serialize_str(&format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            ))
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ========== Contrast ==========

/// WCAG conformance level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContrastLevel {
    #[default]
    AA,
    AAA,
}

impl ContrastLevel {
    /// Minimum contrast ratio for this level
    pub fn min_ratio(self, large_text: bool) -> f64 {
        match (self, large_text) {
            (ContrastLevel::AA, true) => 3.0,
            (ContrastLevel::AA, false) => 4.5,
            (ContrastLevel::AAA, true) => 4.5,
            (ContrastLevel::AAA, false) => 7.0,
        }
    }
}

/// Contrast ratio between two colors (1.0 - 21.0)
pub fn contrast_ratio(foreground: Color, background: Color) -> f64 {
    let l1 = foreground.relative_luminance();
    let l2 = background.relative_luminance();
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether a foreground/background pair meets the given WCAG level
pub fn is_accessible(
    foreground: Color,
    background: Color,
    level: ContrastLevel,
    large_text: bool,
) -> bool {
    contrast_ratio(foreground, background) >= level.min_ratio(large_text)
}

/// Suggest a variant of `base` that is readable on `background`.
///
/// Lightness is stepped 5% at a time away from the background (lighter on
/// dark backgrounds, darker on light ones). If no step within ±100% passes,
/// the last candidate is returned.
pub fn accessible_color(
    base: Color,
    background: Color,
    level: ContrastLevel,
    large_text: bool,
) -> Color {
    if is_accessible(base, background, level, large_text) {
        return base;
    }

    let step = if background.perceived_brightness() < 0.5 {
        5.0
    } else {
        -5.0
    };

    let mut adjusted = base;
    let mut adjustment: f64 = 0.0;
    while !is_accessible(adjusted, background, level, large_text) && adjustment.abs() <= 100.0 {
        adjustment += step;
        adjusted = base.adjust_lightness(adjustment);
    }

    tracing::trace!(
        "accessible_color: {} on {} -> {} ({}%)",
        base,
        background,
        adjusted,
        adjustment
    );
    adjusted
}

/// Whether a color reads as light (perceived brightness above 50%)
pub fn is_light_color(color: Color) -> bool {
    color.perceived_brightness() > 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Color::parse_hex("#4361ee").unwrap(), Color::from_hex(0x4361EE));
        assert_eq!(Color::parse_hex("fff").unwrap(), Color::WHITE);
        assert_eq!(
            Color::parse_hex("#00000080").unwrap(),
            Color::rgba(0, 0, 0, 0x80)
        );
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#gggggg").is_err());
        assert!(Color::parse_hex("#ééé").is_err());
    }

    #[test]
    fn css_round_trip_is_lowercase_hex() {
        let c: Color = "#2940B3".parse().unwrap();
        assert_eq!(c.to_css(), "#2940b3");
        assert_eq!(Color::BLACK.with_alpha(0.5).to_css(), "rgba(0, 0, 0, 0.502)");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::from_hex(0x121212)).unwrap();
        assert_eq!(json, "\"#121212\"");
        let back: Color = serde_json::from_str("\"#738eef\"").unwrap();
        assert_eq!(back, Color::from_hex(0x738EEF));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn contrast_extremes() {
        let ratio = contrast_ratio(Color::WHITE, Color::BLACK);
        assert!((ratio - 21.0).abs() < 1e-9);
        assert!((contrast_ratio(Color::WHITE, Color::WHITE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn accessibility_thresholds() {
        // #777777 on white is ~4.48:1, just below AA body text.
        let gray = Color::from_hex(0x777777);
        assert!(!is_accessible(gray, Color::WHITE, ContrastLevel::AA, false));
        assert!(is_accessible(gray, Color::WHITE, ContrastLevel::AA, true));
        assert!(!is_accessible(gray, Color::WHITE, ContrastLevel::AAA, true));
    }

    #[test]
    fn accessible_color_darkens_on_light_background() {
        let base = Color::from_hex(0x999999);
        let fixed = accessible_color(base, Color::WHITE, ContrastLevel::AA, false);
        assert!(is_accessible(fixed, Color::WHITE, ContrastLevel::AA, false));
        assert!(fixed.relative_luminance() < base.relative_luminance());
    }

    #[test]
    fn accessible_color_lightens_black_on_dark_background() {
        let bg = Color::from_hex(0x121212);
        let fixed = accessible_color(Color::BLACK, bg, ContrastLevel::AA, false);
        assert!(is_accessible(fixed, bg, ContrastLevel::AA, false));
    }

    #[test]
    fn accessible_color_keeps_passing_base() {
        let base = Color::from_hex(0x212529);
        assert_eq!(
            accessible_color(base, Color::WHITE, ContrastLevel::AAA, false),
            base
        );
    }

    #[test]
    fn light_detection() {
        assert!(is_light_color(Color::from_hex(0xF8F9FA)));
        assert!(!is_light_color(Color::from_hex(0x121212)));
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
        assert_eq!(mid, Color::rgb(128, 128, 128));
    }
}
