//! Theme presets: named bundles of color overrides
//!
//! Six presets ship built in. Applications add their own through
//! [`PresetRegistry::add_custom`]; built-ins can neither be replaced nor
//! removed.

mod registry;

pub use registry::{PresetConfig, PresetRegistry};

use flex_core::Color;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::tokens::{ColorToken, ColorTokens};

/// Which base palette a preset builds on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    #[default]
    Light,
    Dark,
    Custom,
}

impl PresetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Custom => "custom",
        }
    }

    fn base_colors(self) -> ColorTokens {
        match self {
            Self::Dark => ColorTokens::dark(),
            Self::Light | Self::Custom => ColorTokens::light(),
        }
    }
}

/// A named set of color overrides
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PresetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub colors: IndexMap<ColorToken, Color>,
    #[serde(default)]
    pub built_in: bool,
}

impl Preset {
    /// Custom preset with no overrides yet
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: PresetKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: None,
            colors: IndexMap::new(),
            built_in: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, token: ColorToken, color: Color) -> Self {
        self.colors.insert(token, color);
        self
    }

    /// Full color table: the kind's base palette with this preset's overrides
    pub fn resolved_colors(&self) -> ColorTokens {
        self.kind.base_colors().with_overrides(&self.colors)
    }

    /// Non-empty id and name
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("preset id must not be empty".into());
        }
        if self.name.trim().is_empty() {
            return Err(format!("preset `{}` has an empty name", self.id));
        }
        Ok(())
    }
}

fn built_in(
    id: &str,
    name: &str,
    kind: PresetKind,
    description: &str,
    overrides: &[(ColorToken, u32)],
) -> Preset {
    let mut colors = kind.base_colors().to_map();
    for &(token, hex) in overrides {
        colors.insert(token, Color::from_hex(hex));
    }
    Preset {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        description: Some(description.to_string()),
        colors,
        built_in: true,
    }
}

/// The presets shipped with flex-theme, in display order
pub fn built_in_presets() -> Vec<Preset> {
    use ColorToken::*;

    vec![
        built_in("light", "Light", PresetKind::Light, "Default light theme", &[]),
        built_in("dark", "Dark", PresetKind::Dark, "Default dark theme", &[]),
        built_in(
            "high-contrast-light",
            "High Contrast Light",
            PresetKind::Light,
            "High contrast light theme for better accessibility",
            &[
                (Primary, 0x0000EE),
                (PrimaryDark, 0x00008B),
                (PrimaryLight, 0x6666FF),
                (TextPrimary, 0x000000),
                (TextSecondary, 0x333333),
                (Background, 0xFFFFFF),
                (Surface, 0xF8F8F8),
                (Border, 0x000000),
            ],
        ),
        built_in(
            "high-contrast-dark",
            "High Contrast Dark",
            PresetKind::Dark,
            "High contrast dark theme for better accessibility",
            &[
                (Primary, 0xFFFF00),
                (PrimaryDark, 0xCCCC00),
                (PrimaryLight, 0xFFFF66),
                (TextPrimary, 0xFFFFFF),
                (TextSecondary, 0xCCCCCC),
                (Background, 0x000000),
                (Surface, 0x121212),
                (Border, 0xFFFFFF),
            ],
        ),
        built_in(
            "sepia",
            "Sepia",
            PresetKind::Light,
            "Sepia theme for reduced eye strain",
            &[
                (Primary, 0x704214),
                (PrimaryDark, 0x5A350F),
                (PrimaryLight, 0x9C7A50),
                (TextPrimary, 0x5F4B32),
                (TextSecondary, 0x7F6542),
                (Background, 0xF5EFE0),
                (Surface, 0xF0E6D2),
                (Border, 0xD3C4A8),
            ],
        ),
        built_in(
            "blue-light-filter",
            "Blue Light Filter",
            PresetKind::Light,
            "Reduced blue light for evening use",
            &[
                (Primary, 0xD48E3C),
                (PrimaryDark, 0xB06E1C),
                (PrimaryLight, 0xF4AD5C),
                (TextPrimary, 0x4D3B27),
                (TextSecondary, 0x6D5B47),
                (Background, 0xFFF2E2),
                (Surface, 0xFFF8ED),
                (Border, 0xE8D5B9),
            ],
        ),
    ]
}
