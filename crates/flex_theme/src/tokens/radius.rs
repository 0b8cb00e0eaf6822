//! Border radius tokens

use super::{CssTokens, Length};

/// Radius token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum RadiusToken {
    None,
    Sm,
    Md,
    Lg,
    Xl,
    Full,
}

impl RadiusToken {
    pub const ALL: [RadiusToken; 6] = [
        RadiusToken::None,
        RadiusToken::Sm,
        RadiusToken::Md,
        RadiusToken::Lg,
        RadiusToken::Xl,
        RadiusToken::Full,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Full => "full",
        }
    }
}

/// Complete set of border radius tokens
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusTokens {
    pub radius_none: Length,
    pub radius_sm: Length,
    pub radius_md: Length,
    pub radius_lg: Length,
    pub radius_xl: Length,
    pub radius_full: Length,
}

impl RadiusTokens {
    pub fn get(&self, token: RadiusToken) -> Length {
        match token {
            RadiusToken::None => self.radius_none,
            RadiusToken::Sm => self.radius_sm,
            RadiusToken::Md => self.radius_md,
            RadiusToken::Lg => self.radius_lg,
            RadiusToken::Xl => self.radius_xl,
            RadiusToken::Full => self.radius_full,
        }
    }
}

impl Default for RadiusTokens {
    fn default() -> Self {
        Self {
            radius_none: Length::Zero,
            radius_sm: Length::Rem(0.125),
            radius_md: Length::Rem(0.25),
            radius_lg: Length::Rem(0.5),
            radius_xl: Length::Rem(1.0),
            radius_full: Length::Px(9999.0),
        }
    }
}

impl CssTokens for RadiusTokens {
    fn css_variables(&self) -> Vec<(String, String)> {
        RadiusToken::ALL
            .iter()
            .map(|&t| (format!("radius-{}", t.key()), self.get(t).to_css()))
            .collect()
    }
}
