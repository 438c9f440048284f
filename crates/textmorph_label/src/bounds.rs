//! Bounds transition
//!
//! When the label resizes inside an animated transaction, the drawing
//! rect tweens from the old bounds to the new ones on the same clock as
//! the text morph.

use textmorph_animation::Easing;
use textmorph_core::Rect;

/// A rect tween in flight
#[derive(Clone, Copy, Debug)]
pub struct BoundsTransition {
    from: Rect,
    to: Rect,
    duration: f32,
    easing: Easing,
    elapsed: f32,
}

impl BoundsTransition {
    pub fn new(from: Rect, to: Rect, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            easing,
            elapsed: 0.0,
        }
    }

    /// Sample at time `t` (seconds from the transition's start)
    pub fn advance(&mut self, t: f32) {
        self.elapsed = t.clamp(0.0, self.duration);
    }

    /// The interpolated rect at the current time
    pub fn current(&self) -> Rect {
        if self.duration <= 0.0 {
            return self.to;
        }
        let progress = self.easing.apply(self.elapsed / self.duration);
        Rect::lerp(&self.from, &self.to, progress)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
