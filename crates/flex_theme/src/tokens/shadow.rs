//! Shadow tokens for theming

use flex_core::Color;

use super::{format_number, CssTokens};

/// Shadow token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ShadowToken {
    Sm,
    Md,
    Lg,
    Xl,
}

impl ShadowToken {
    pub const ALL: [ShadowToken; 4] = [
        ShadowToken::Sm,
        ShadowToken::Md,
        ShadowToken::Lg,
        ShadowToken::Xl,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

/// A single box-shadow layer, lengths in px
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowLayer {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

impl ShadowLayer {
    pub const fn new(offset_x: f32, offset_y: f32, blur: f32, spread: f32, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread,
            color,
        }
    }

    pub fn to_css(&self) -> String {
        let px = |v: f32| {
            if v == 0.0 {
                "0".to_string()
            } else {
                format!("{}px", format_number(v))
            }
        };
        format!(
            "{} {} {} {} {}",
            px(self.offset_x),
            px(self.offset_y),
            px(self.blur),
            px(self.spread),
            self.color.to_css()
        )
    }
}

/// A box shadow made of one or more layers
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shadow {
    pub layers: Vec<ShadowLayer>,
}

impl Shadow {
    pub fn new(layers: impl IntoIterator<Item = ShadowLayer>) -> Self {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Comma-separated `box-shadow` value, `none` without layers
    pub fn to_css(&self) -> String {
        if self.layers.is_empty() {
            return "none".to_string();
        }
        self.layers
            .iter()
            .map(ShadowLayer::to_css)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Complete set of shadow tokens
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowTokens {
    pub shadow_sm: Shadow,
    pub shadow_md: Shadow,
    pub shadow_lg: Shadow,
    pub shadow_xl: Shadow,
}

impl ShadowTokens {
    /// Get shadow by token key
    pub fn get(&self, token: ShadowToken) -> &Shadow {
        match token {
            ShadowToken::Sm => &self.shadow_sm,
            ShadowToken::Md => &self.shadow_md,
            ShadowToken::Lg => &self.shadow_lg,
            ShadowToken::Xl => &self.shadow_xl,
        }
    }

    /// Shadows for the light scheme
    pub fn light() -> Self {
        Self::with_alphas([0.05, 0.1, 0.1, 0.1], [0.06, 0.05, 0.04])
    }

    /// Shadows for the dark scheme: same geometry, denser
    pub fn dark() -> Self {
        Self::with_alphas([0.5, 0.3, 0.3, 0.3], [0.26, 0.25, 0.24])
    }

    fn with_alphas(key: [f32; 4], ambient: [f32; 3]) -> Self {
        let black = Color::BLACK;
        Self {
            shadow_sm: Shadow::new([ShadowLayer::new(0.0, 1.0, 2.0, 0.0, black.with_alpha(key[0]))]),
            shadow_md: Shadow::new([
                ShadowLayer::new(0.0, 4.0, 6.0, -1.0, black.with_alpha(key[1])),
                ShadowLayer::new(0.0, 2.0, 4.0, -1.0, black.with_alpha(ambient[0])),
            ]),
            shadow_lg: Shadow::new([
                ShadowLayer::new(0.0, 10.0, 15.0, -3.0, black.with_alpha(key[2])),
                ShadowLayer::new(0.0, 4.0, 6.0, -2.0, black.with_alpha(ambient[1])),
            ]),
            shadow_xl: Shadow::new([
                ShadowLayer::new(0.0, 20.0, 25.0, -5.0, black.with_alpha(key[3])),
                ShadowLayer::new(0.0, 10.0, 10.0, -5.0, black.with_alpha(ambient[2])),
            ]),
        }
    }
}

impl Default for ShadowTokens {
    fn default() -> Self {
        Self::light()
    }
}

impl CssTokens for ShadowTokens {
    fn css_variables(&self) -> Vec<(String, String)> {
        ShadowToken::ALL
            .iter()
            .map(|&t| (format!("shadow-{}", t.key()), self.get(t).to_css()))
            .collect()
    }
}
