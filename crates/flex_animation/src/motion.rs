//! Reduced-motion aware transition and animation values

use std::fmt::{self, Display, Formatter};

use flex_platform::{Host, HostError, SharedHost};
use tracing::debug;

use crate::keyframe::all_keyframes_css;
use crate::transition::TransitionPreset;

/// Id of the `<style>` element holding the built-in keyframes
pub const KEYFRAMES_STYLE_ID: &str = "flex-theme-keyframes";

/// Neutralizes animations and transitions for reduced-motion users
pub const REDUCED_MOTION_CSS: &str = "@media (prefers-reduced-motion: reduce) {
  *, ::before, ::after {
    animation-duration: 0.01ms !important;
    animation-iteration-count: 1 !important;
    transition-duration: 0.01ms !important;
    scroll-behavior: auto !important;
  }
}
";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IterationCount {
    Count(f32),
    Infinite,
}

impl Default for IterationCount {
    fn default() -> Self {
        Self::Count(1.0)
    }
}

impl Display for IterationCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Infinite => f.write_str("infinite"),
        }
    }
}

/// An `animation` shorthand value.
///
/// Defaults: 0.3s, `ease`, no delay, one iteration, `normal`, `both`.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSpec {
    pub name: String,
    /// Seconds
    pub duration: f32,
    pub timing_function: String,
    /// Seconds
    pub delay: f32,
    pub iteration_count: IterationCount,
    pub direction: String,
    pub fill_mode: String,
}

impl AnimationSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: 0.3,
            timing_function: "ease".to_string(),
            delay: 0.0,
            iteration_count: IterationCount::default(),
            direction: "normal".to_string(),
            fill_mode: "both".to_string(),
        }
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn timing_function(mut self, timing: impl Into<String>) -> Self {
        self.timing_function = timing.into();
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    pub fn iteration_count(mut self, count: IterationCount) -> Self {
        self.iteration_count = count;
        self
    }

    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    pub fn fill_mode(mut self, fill_mode: impl Into<String>) -> Self {
        self.fill_mode = fill_mode.into();
        self
    }

    pub fn to_css(&self) -> String {
        format!(
            "{} {}s {} {}s {} {} {}",
            self.name,
            self.duration,
            self.timing_function,
            self.delay,
            self.iteration_count,
            self.direction,
            self.fill_mode
        )
    }
}

/// Motion values that respect the host's reduced-motion preference
#[derive(Clone)]
pub struct Motion {
    host: SharedHost,
}

impl Motion {
    pub fn new(host: SharedHost) -> Self {
        Self { host }
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.host.prefers_reduced_motion()
    }

    /// The preset's value, or `none` under reduced motion
    pub fn accessible_transition(&self, preset: TransitionPreset) -> String {
        if self.prefers_reduced_motion() {
            return TransitionPreset::None.to_css();
        }
        preset.to_css()
    }

    /// The animation shorthand, or `none` under reduced motion
    pub fn accessible_animation(&self, spec: &AnimationSpec) -> String {
        if self.prefers_reduced_motion() {
            return "none".to_string();
        }
        spec.to_css()
    }
}

impl std::fmt::Debug for Motion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Motion").finish_non_exhaustive()
    }
}

/// Stylesheet with every built-in keyframe rule and the reduced-motion block
pub fn keyframes_stylesheet() -> String {
    format!("{}\n{}", all_keyframes_css(), REDUCED_MOTION_CSS)
}

/// Install [`keyframes_stylesheet`] as `<style id="flex-theme-keyframes">`,
/// replacing any earlier copy. Unavailable hosts are skipped.
pub fn inject_keyframes(host: &dyn Host) -> Result<(), HostError> {
    if !host.is_available() {
        debug!("inject_keyframes: host unavailable, skipping");
        return Ok(());
    }
    host.install_style_sheet(KEYFRAMES_STYLE_ID, &keyframes_stylesheet())
}
