//! flex-theme motion helpers
//!
//! - **Keyframes**: the `flex-*` `@keyframes` catalog (fade, slide, zoom,
//!   spin, pulse, bounce)
//! - **Transitions**: named `transition` presets
//! - **Motion**: values that collapse to `none` when the user prefers
//!   reduced motion

pub mod easing;
mod error;
pub mod keyframe;
pub mod motion;
pub mod transition;

pub use easing::Easing;
pub use error::AnimationError;
pub use keyframe::{all_keyframes_css, Animation, Keyframe, KeyframeProperties, Keyframes, SlideDirection, Transform};
pub use motion::{
    inject_keyframes, keyframes_stylesheet, AnimationSpec, IterationCount, Motion, KEYFRAMES_STYLE_ID,
    REDUCED_MOTION_CSS,
};
pub use transition::{Transition, TransitionPreset};
