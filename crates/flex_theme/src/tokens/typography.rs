//! Typography tokens: families, sizes, weights and line heights

use super::{format_number, CssTokens, Length};

/// Font size scale keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FontSizeToken {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
    Display,
}

impl FontSizeToken {
    pub const ALL: [FontSizeToken; 7] = [
        FontSizeToken::Xs,
        FontSizeToken::Sm,
        FontSizeToken::Md,
        FontSizeToken::Lg,
        FontSizeToken::Xl,
        FontSizeToken::Xxl,
        FontSizeToken::Display,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "xxl",
            Self::Display => "display",
        }
    }
}

/// Font weight keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FontWeight {
    Regular,
    Medium,
    Bold,
}

impl FontWeight {
    pub const ALL: [FontWeight; 3] = [FontWeight::Regular, FontWeight::Medium, FontWeight::Bold];

    pub fn key(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Medium => "medium",
            Self::Bold => "bold",
        }
    }

    /// Numeric CSS weight
    pub fn value(self) -> u16 {
        match self {
            Self::Regular => 400,
            Self::Medium => 500,
            Self::Bold => 700,
        }
    }
}

/// Line height keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum LineHeight {
    Tight,
    Normal,
    Relaxed,
}

impl LineHeight {
    pub const ALL: [LineHeight; 3] = [LineHeight::Tight, LineHeight::Normal, LineHeight::Relaxed];

    pub fn key(self) -> &'static str {
        match self {
            Self::Tight => "tight",
            Self::Normal => "normal",
            Self::Relaxed => "relaxed",
        }
    }
}

/// Complete set of typography tokens
#[derive(Clone, Debug, PartialEq)]
pub struct TypographyTokens {
    // Font families
    pub font_base: String,
    pub font_mono: String,

    // Font sizes
    pub text_xs: Length,
    pub text_sm: Length,
    pub text_md: Length,
    pub text_lg: Length,
    pub text_xl: Length,
    pub text_xxl: Length,
    pub text_display: Length,

    // Line heights (unitless multipliers)
    pub leading_tight: f32,
    pub leading_normal: f32,
    pub leading_relaxed: f32,
}

impl TypographyTokens {
    /// Get font size by token
    pub fn font_size(&self, token: FontSizeToken) -> Length {
        match token {
            FontSizeToken::Xs => self.text_xs,
            FontSizeToken::Sm => self.text_sm,
            FontSizeToken::Md => self.text_md,
            FontSizeToken::Lg => self.text_lg,
            FontSizeToken::Xl => self.text_xl,
            FontSizeToken::Xxl => self.text_xxl,
            FontSizeToken::Display => self.text_display,
        }
    }

    pub fn line_height(&self, token: LineHeight) -> f32 {
        match token {
            LineHeight::Tight => self.leading_tight,
            LineHeight::Normal => self.leading_normal,
            LineHeight::Relaxed => self.leading_relaxed,
        }
    }
}

impl Default for TypographyTokens {
    fn default() -> Self {
        Self {
            font_base: r#"system-ui, -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif"#
                .to_string(),
            font_mono: "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace".to_string(),

            text_xs: Length::Rem(0.75),
            text_sm: Length::Rem(0.875),
            text_md: Length::Rem(1.0),
            text_lg: Length::Rem(1.125),
            text_xl: Length::Rem(1.25),
            text_xxl: Length::Rem(1.5),
            text_display: Length::Rem(2.0),

            leading_tight: 1.2,
            leading_normal: 1.5,
            leading_relaxed: 1.75,
        }
    }
}

impl CssTokens for TypographyTokens {
    fn css_variables(&self) -> Vec<(String, String)> {
        let mut vars = vec![
            ("font-family-base".to_string(), self.font_base.clone()),
            ("font-family-mono".to_string(), self.font_mono.clone()),
        ];
        vars.extend(FontSizeToken::ALL.iter().map(|&t| {
            (format!("font-size-{}", t.key()), self.font_size(t).to_css())
        }));
        vars.extend(LineHeight::ALL.iter().map(|&t| {
            (
                format!("line-height-{}", t.key()),
                format_number(self.line_height(t)),
            )
        }));
        vars.extend(
            FontWeight::ALL
                .iter()
                .map(|&w| (format!("font-weight-{}", w.key()), w.value().to_string())),
        );
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_variable_groups_in_order() {
        let vars = TypographyTokens::default().css_variables();
        let names: Vec<&str> = vars.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names.first(), Some(&"font-family-base"));
        assert!(names.contains(&"font-size-display"));
        assert!(vars.contains(&("line-height-relaxed".to_string(), "1.75".to_string())));
        assert!(vars.contains(&("font-weight-bold".to_string(), "700".to_string())));
        assert!(vars.contains(&("font-size-sm".to_string(), "0.875rem".to_string())));
    }
}
