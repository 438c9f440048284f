//! Easing curves
//!
//! The host picks one of these per transaction; sub-animations apply it
//! to their local progress. Curve authoring beyond this fixed set is out
//! of scope.

/// Easing function applied to normalized progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInEaseOut,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] through the curve
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInEaseOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    (4.0 - 2.0 * t) * t - 1.0
                }
            }
        }
    }
}
