//! CSS keyframe animations
//!
//! Every built-in animation is described as data ([`Keyframes`]) and
//! rendered to an `@keyframes flex-*` rule on demand.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AnimationError;

/// Distance covered by the slide animations, in px
pub const SLIDE_DISTANCE: f32 = 20.0;

/// Starting scale of the zoom animations
pub const ZOOM_SCALE: f32 = 0.95;

/// A single CSS transform function
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    /// px
    TranslateX(f32),
    /// px
    TranslateY(f32),
    Scale(f32),
    /// degrees
    Rotate(f32),
}

impl Transform {
    pub fn to_css(&self) -> String {
        match *self {
            Transform::TranslateX(v) => format!("translateX({})", px(v)),
            Transform::TranslateY(v) => format!("translateY({})", px(v)),
            Transform::Scale(v) => format!("scale({v})"),
            Transform::Rotate(v) => format!("rotate({v}deg)"),
        }
    }
}

fn px(v: f32) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        format!("{v}px")
    }
}

/// Properties set by one keyframe
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyframeProperties {
    pub transform: Option<Transform>,
    pub opacity: Option<f32>,
}

impl KeyframeProperties {
    pub fn opacity(opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            ..Default::default()
        }
    }

    pub fn transform(transform: Transform) -> Self {
        Self {
            transform: Some(transform),
            ..Default::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// One keyframe block, applying to one or more offsets
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    /// Offsets in percent (0 to 100)
    pub offsets: Vec<u8>,
    pub properties: KeyframeProperties,
}

/// A named `@keyframes` rule
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframes {
    pub name: String,
    pub frames: Vec<Keyframe>,
}

impl Keyframes {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
        }
    }

    /// Add a keyframe at the given percent offsets
    pub fn frame(mut self, offsets: &[u8], properties: KeyframeProperties) -> Self {
        self.frames.push(Keyframe {
            offsets: offsets.to_vec(),
            properties,
        });
        self
    }

    /// Shorthand for a two-frame `from`/`to` rule
    pub fn from_to(name: impl Into<String>, from: KeyframeProperties, to: KeyframeProperties) -> Self {
        Self::new(name).frame(&[0], from).frame(&[100], to)
    }

    fn is_from_to(&self) -> bool {
        matches!(
            self.frames.as_slice(),
            [a, b] if a.offsets == [0] && b.offsets == [100]
        )
    }

    pub fn to_css(&self) -> String {
        let from_to = self.is_from_to();
        let mut css = format!("@keyframes {} {{\n", self.name);
        for frame in &self.frames {
            let selector = if from_to {
                let edge = if frame.offsets == [0] { "from" } else { "to" };
                edge.to_string()
            } else {
                frame
                    .offsets
                    .iter()
                    .map(|o| format!("{o}%"))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            css.push_str(&format!("  {selector} {{\n"));
            if let Some(transform) = frame.properties.transform {
                css.push_str(&format!("    transform: {};\n", transform.to_css()));
            }
            if let Some(opacity) = frame.properties.opacity {
                css.push_str(&format!("    opacity: {opacity};\n"));
            }
            css.push_str("  }\n");
        }
        css.push_str("}\n");
        css
    }
}

// ============================================================================
// Built-in animations
// ============================================================================

/// Edge an element slides from or to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    Top,
    Bottom,
    Left,
    Right,
}

impl SlideDirection {
    pub const ALL: [SlideDirection; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Offset of the hidden position
    fn offset(self) -> Transform {
        match self {
            Self::Top => Transform::TranslateY(-SLIDE_DISTANCE),
            Self::Bottom => Transform::TranslateY(SLIDE_DISTANCE),
            Self::Left => Transform::TranslateX(-SLIDE_DISTANCE),
            Self::Right => Transform::TranslateX(SLIDE_DISTANCE),
        }
    }

    fn rest(self) -> Transform {
        match self {
            Self::Top | Self::Bottom => Transform::TranslateY(0.0),
            Self::Left | Self::Right => Transform::TranslateX(0.0),
        }
    }
}

/// Built-in animations shipped as `flex-*` keyframes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Animation {
    FadeIn,
    FadeOut,
    SlideIn(SlideDirection),
    SlideOut(SlideDirection),
    ZoomIn,
    ZoomOut,
    Spin,
    Pulse,
    Bounce,
}

impl Animation {
    pub const ALL: [Animation; 15] = [
        Animation::FadeIn,
        Animation::FadeOut,
        Animation::SlideIn(SlideDirection::Top),
        Animation::SlideOut(SlideDirection::Top),
        Animation::SlideIn(SlideDirection::Bottom),
        Animation::SlideOut(SlideDirection::Bottom),
        Animation::SlideIn(SlideDirection::Left),
        Animation::SlideOut(SlideDirection::Left),
        Animation::SlideIn(SlideDirection::Right),
        Animation::SlideOut(SlideDirection::Right),
        Animation::ZoomIn,
        Animation::ZoomOut,
        Animation::Spin,
        Animation::Pulse,
        Animation::Bounce,
    ];

    /// Keyframes name, e.g. `flex-slide-in-left`
    pub fn name(self) -> String {
        match self {
            Animation::FadeIn => "flex-fade-in".to_string(),
            Animation::FadeOut => "flex-fade-out".to_string(),
            Animation::SlideIn(d) => format!("flex-slide-in-{}", d.as_str()),
            Animation::SlideOut(d) => format!("flex-slide-out-{}", d.as_str()),
            Animation::ZoomIn => "flex-zoom-in".to_string(),
            Animation::ZoomOut => "flex-zoom-out".to_string(),
            Animation::Spin => "flex-spin".to_string(),
            Animation::Pulse => "flex-pulse".to_string(),
            Animation::Bounce => "flex-bounce".to_string(),
        }
    }

    pub fn keyframes(self) -> Keyframes {
        use KeyframeProperties as P;

        let name = self.name();
        match self {
            Animation::FadeIn => Keyframes::from_to(name, P::opacity(0.0), P::opacity(1.0)),
            Animation::FadeOut => Keyframes::from_to(name, P::opacity(1.0), P::opacity(0.0)),
            Animation::SlideIn(d) => Keyframes::from_to(
                name,
                P::transform(d.offset()).with_opacity(0.0),
                P::transform(d.rest()).with_opacity(1.0),
            ),
            Animation::SlideOut(d) => Keyframes::from_to(
                name,
                P::transform(d.rest()).with_opacity(1.0),
                P::transform(d.offset()).with_opacity(0.0),
            ),
            Animation::ZoomIn => Keyframes::from_to(
                name,
                P::transform(Transform::Scale(ZOOM_SCALE)).with_opacity(0.0),
                P::transform(Transform::Scale(1.0)).with_opacity(1.0),
            ),
            Animation::ZoomOut => Keyframes::from_to(
                name,
                P::transform(Transform::Scale(1.0)).with_opacity(1.0),
                P::transform(Transform::Scale(ZOOM_SCALE)).with_opacity(0.0),
            ),
            Animation::Spin => Keyframes::from_to(
                name,
                P::transform(Transform::Rotate(0.0)),
                P::transform(Transform::Rotate(360.0)),
            ),
            Animation::Pulse => Keyframes::new(name)
                .frame(&[0], P::transform(Transform::Scale(1.0)))
                .frame(&[50], P::transform(Transform::Scale(1.05)))
                .frame(&[100], P::transform(Transform::Scale(1.0))),
            Animation::Bounce => Keyframes::new(name)
                .frame(&[0, 20, 50, 80, 100], P::transform(Transform::TranslateY(0.0)))
                .frame(&[40], P::transform(Transform::TranslateY(-10.0)))
                .frame(&[60], P::transform(Transform::TranslateY(-5.0))),
        }
    }
}

impl Display for Animation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Animation {
    type Err = AnimationError;

    /// Accepts the keyframes name with or without the `flex-` prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = if s.starts_with("flex-") {
            s.to_string()
        } else {
            format!("flex-{s}")
        };
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| AnimationError::UnknownAnimation(s.to_string()))
    }
}

/// Every built-in `@keyframes` rule, in catalog order
pub fn all_keyframes_css() -> String {
    Animation::ALL
        .iter()
        .map(|a| a.keyframes().to_css())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fade_in_css() {
        assert_eq!(
            Animation::FadeIn.keyframes().to_css(),
            "@keyframes flex-fade-in {\n  from {\n    opacity: 0;\n  }\n  to {\n    opacity: 1;\n  }\n}\n"
        );
    }

    #[test]
    fn slide_in_top_starts_above() {
        let css = Animation::SlideIn(SlideDirection::Top).keyframes().to_css();
        assert!(css.starts_with("@keyframes flex-slide-in-top {"));
        assert!(css.contains("from {\n    transform: translateY(-20px);\n    opacity: 0;"));
        assert!(css.contains("to {\n    transform: translateY(0);\n    opacity: 1;"));
    }

    #[test]
    fn bounce_uses_percent_selectors() {
        let css = Animation::Bounce.keyframes().to_css();
        assert!(css.contains("  0%, 20%, 50%, 80%, 100% {\n    transform: translateY(0);"));
        assert!(css.contains("  40% {\n    transform: translateY(-10px);"));
    }

    #[test]
    fn names_are_unique_and_parse_back() {
        let names: Vec<String> = Animation::ALL.iter().map(|a| a.name()).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name), "{name}");
            assert_eq!(name.parse::<Animation>().unwrap(), Animation::ALL[i]);
        }
        assert_eq!("spin".parse::<Animation>().unwrap(), Animation::Spin);
        assert!("wobble".parse::<Animation>().is_err());
    }

    #[test]
    fn catalog_contains_every_rule() {
        let css = all_keyframes_css();
        assert_eq!(css.matches("@keyframes ").count(), Animation::ALL.len());
        assert!(css.contains("transform: scale(0.95);"));
        assert!(css.contains("transform: rotate(360deg);"));
        assert!(css.contains("transform: scale(1.05);"));
    }
}
