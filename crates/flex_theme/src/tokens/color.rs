//! Color tokens for theming

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use flex_core::Color;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::CssTokens;

/// Semantic color token keys for dynamic access
///
/// Serialized names are the camelCase keys used in CSS variables
/// (`--color-primaryLight`) and preset JSON.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorToken {
    // Primary palette
    Primary,
    PrimaryLight,
    PrimaryDark,

    // Secondary palette
    Secondary,
    SecondaryLight,
    SecondaryDark,

    // Semantic colors
    Success,
    Warning,
    Error,
    Info,

    // Neutrals
    Background,
    Surface,
    SurfaceVariant,
    Border,
    Divider,

    // Typography
    TextPrimary,
    TextSecondary,
    TextDisabled,
    TextOnPrimary,
    TextOnSecondary,
}

impl ColorToken {
    /// Every token, in declaration order
    pub const ALL: [ColorToken; 20] = [
        ColorToken::Primary,
        ColorToken::PrimaryLight,
        ColorToken::PrimaryDark,
        ColorToken::Secondary,
        ColorToken::SecondaryLight,
        ColorToken::SecondaryDark,
        ColorToken::Success,
        ColorToken::Warning,
        ColorToken::Error,
        ColorToken::Info,
        ColorToken::Background,
        ColorToken::Surface,
        ColorToken::SurfaceVariant,
        ColorToken::Border,
        ColorToken::Divider,
        ColorToken::TextPrimary,
        ColorToken::TextSecondary,
        ColorToken::TextDisabled,
        ColorToken::TextOnPrimary,
        ColorToken::TextOnSecondary,
    ];

    /// camelCase key
    pub fn key(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::PrimaryLight => "primaryLight",
            Self::PrimaryDark => "primaryDark",
            Self::Secondary => "secondary",
            Self::SecondaryLight => "secondaryLight",
            Self::SecondaryDark => "secondaryDark",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::Background => "background",
            Self::Surface => "surface",
            Self::SurfaceVariant => "surfaceVariant",
            Self::Border => "border",
            Self::Divider => "divider",
            Self::TextPrimary => "textPrimary",
            Self::TextSecondary => "textSecondary",
            Self::TextDisabled => "textDisabled",
            Self::TextOnPrimary => "textOnPrimary",
            Self::TextOnSecondary => "textOnSecondary",
        }
    }

    /// CSS variable name without the leading `--`
    pub fn css_name(self) -> String {
        format!("color-{}", self.key())
    }
}

impl Display for ColorToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ColorToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.key() == s)
            .ok_or_else(|| format!("unknown color token `{s}`"))
    }
}

/// Complete set of semantic color tokens
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTokens {
    // Primary palette
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,

    // Secondary palette
    pub secondary: Color,
    pub secondary_light: Color,
    pub secondary_dark: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Neutrals
    pub background: Color,
    pub surface: Color,
    pub surface_variant: Color,
    pub border: Color,
    pub divider: Color,

    // Typography
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,
    pub text_on_primary: Color,
    pub text_on_secondary: Color,
}

impl ColorTokens {
    /// Get a color by token key
    pub fn get(&self, token: ColorToken) -> Color {
        *self.slot(token)
    }

    /// Replace a color by token key
    pub fn set(&mut self, token: ColorToken, color: Color) {
        *self.slot_mut(token) = color;
    }

    fn slot(&self, token: ColorToken) -> &Color {
        match token {
            ColorToken::Primary => &self.primary,
            ColorToken::PrimaryLight => &self.primary_light,
            ColorToken::PrimaryDark => &self.primary_dark,
            ColorToken::Secondary => &self.secondary,
            ColorToken::SecondaryLight => &self.secondary_light,
            ColorToken::SecondaryDark => &self.secondary_dark,
            ColorToken::Success => &self.success,
            ColorToken::Warning => &self.warning,
            ColorToken::Error => &self.error,
            ColorToken::Info => &self.info,
            ColorToken::Background => &self.background,
            ColorToken::Surface => &self.surface,
            ColorToken::SurfaceVariant => &self.surface_variant,
            ColorToken::Border => &self.border,
            ColorToken::Divider => &self.divider,
            ColorToken::TextPrimary => &self.text_primary,
            ColorToken::TextSecondary => &self.text_secondary,
            ColorToken::TextDisabled => &self.text_disabled,
            ColorToken::TextOnPrimary => &self.text_on_primary,
            ColorToken::TextOnSecondary => &self.text_on_secondary,
        }
    }

    fn slot_mut(&mut self, token: ColorToken) -> &mut Color {
        match token {
            ColorToken::Primary => &mut self.primary,
            ColorToken::PrimaryLight => &mut self.primary_light,
            ColorToken::PrimaryDark => &mut self.primary_dark,
            ColorToken::Secondary => &mut self.secondary,
            ColorToken::SecondaryLight => &mut self.secondary_light,
            ColorToken::SecondaryDark => &mut self.secondary_dark,
            ColorToken::Success => &mut self.success,
            ColorToken::Warning => &mut self.warning,
            ColorToken::Error => &mut self.error,
            ColorToken::Info => &mut self.info,
            ColorToken::Background => &mut self.background,
            ColorToken::Surface => &mut self.surface,
            ColorToken::SurfaceVariant => &mut self.surface_variant,
            ColorToken::Border => &mut self.border,
            ColorToken::Divider => &mut self.divider,
            ColorToken::TextPrimary => &mut self.text_primary,
            ColorToken::TextSecondary => &mut self.text_secondary,
            ColorToken::TextDisabled => &mut self.text_disabled,
            ColorToken::TextOnPrimary => &mut self.text_on_primary,
            ColorToken::TextOnSecondary => &mut self.text_on_secondary,
        }
    }

    /// `(token, color)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ColorToken, Color)> + '_ {
        ColorToken::ALL.iter().map(move |&t| (t, self.get(t)))
    }

    /// Copy of these tokens with `overrides` applied on top
    pub fn with_overrides(&self, overrides: &IndexMap<ColorToken, Color>) -> Self {
        let mut out = self.clone();
        for (&token, &color) in overrides {
            out.set(token, color);
        }
        out
    }

    /// Every token as an ordered map
    pub fn to_map(&self) -> IndexMap<ColorToken, Color> {
        self.iter().collect()
    }

    /// Default light palette
    pub fn light() -> Self {
        Self {
            primary: Color::from_hex(0x4361EE),
            primary_light: Color::from_hex(0x738EEF),
            primary_dark: Color::from_hex(0x2940B3),
            secondary: Color::from_hex(0x6C757D),
            secondary_light: Color::from_hex(0xADB5BD),
            secondary_dark: Color::from_hex(0x495057),
            success: Color::from_hex(0x2ECC71),
            warning: Color::from_hex(0xF39C12),
            error: Color::from_hex(0xE74C3C),
            info: Color::from_hex(0x3498DB),
            background: Color::WHITE,
            surface: Color::from_hex(0xF8F9FA),
            surface_variant: Color::from_hex(0xF0F0F0),
            border: Color::from_hex(0xE0E0E0),
            divider: Color::from_hex(0xEEEEEE),
            text_primary: Color::from_hex(0x212529),
            text_secondary: Color::from_hex(0x6C757D),
            text_disabled: Color::from_hex(0xADB5BD),
            text_on_primary: Color::WHITE,
            text_on_secondary: Color::WHITE,
        }
    }

    /// Default dark palette
    pub fn dark() -> Self {
        Self {
            primary: Color::from_hex(0x738EEF),
            primary_light: Color::from_hex(0xA5B9F3),
            primary_dark: Color::from_hex(0x2940B3),
            secondary: Color::from_hex(0xADB5BD),
            secondary_light: Color::from_hex(0xCED4DA),
            secondary_dark: Color::from_hex(0x6C757D),
            success: Color::from_hex(0x2ECC71),
            warning: Color::from_hex(0xF39C12),
            error: Color::from_hex(0xE74C3C),
            info: Color::from_hex(0x3498DB),
            background: Color::from_hex(0x121212),
            surface: Color::from_hex(0x1E1E1E),
            surface_variant: Color::from_hex(0x2A2A2A),
            border: Color::from_hex(0x333333),
            divider: Color::from_hex(0x2C2C2C),
            text_primary: Color::from_hex(0xF8F9FA),
            text_secondary: Color::from_hex(0xADB5BD),
            text_disabled: Color::from_hex(0x6C757D),
            text_on_primary: Color::WHITE,
            text_on_secondary: Color::WHITE,
        }
    }
}

impl Default for ColorTokens {
    fn default() -> Self {
        Self::light()
    }
}

impl CssTokens for ColorTokens {
    fn css_variables(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(token, color)| (token.css_name(), color.to_css()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_keys_round_trip() {
        for token in ColorToken::ALL {
            assert_eq!(token.key().parse::<ColorToken>(), Ok(token));
            let json = serde_json::to_string(&token).unwrap();
            assert_eq!(json, format!("\"{}\"", token.key()));
        }
    }

    #[test]
    fn light_and_dark_cover_the_same_keys() {
        let light: Vec<_> = ColorTokens::light().iter().map(|(t, _)| t).collect();
        let dark: Vec<_> = ColorTokens::dark().iter().map(|(t, _)| t).collect();
        assert_eq!(light, dark);
        assert_eq!(light.len(), ColorToken::ALL.len());
    }

    #[test]
    fn overrides_replace_only_named_tokens() {
        let mut overrides = IndexMap::new();
        overrides.insert(ColorToken::Primary, Color::from_hex(0x0000EE));
        let tokens = ColorTokens::light().with_overrides(&overrides);
        assert_eq!(tokens.primary, Color::from_hex(0x0000EE));
        assert_eq!(tokens.background, ColorTokens::light().background);
    }

    #[test]
    fn css_names_use_camel_case_keys() {
        let vars = ColorTokens::dark().css_variables();
        assert!(vars.contains(&("color-primaryLight".to_string(), "#a5b9f3".to_string())));
        assert!(vars.contains(&("color-background".to_string(), "#121212".to_string())));
    }
}
