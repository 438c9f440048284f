//! Host clock transaction parameters

use textmorph_animation::Easing;

/// Duration and easing the host clock assigns to one change.
///
/// A non-positive duration means "apply immediately" everywhere these
/// parameters are consumed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transaction {
    /// Total animation duration, in seconds
    pub duration: f32,
    pub easing: Easing,
}

impl Transaction {
    pub const fn new(duration: f32, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// The zero-duration transaction
    pub const fn immediate() -> Self {
        Self::new(0.0, Easing::Linear)
    }

    pub fn is_animated(&self) -> bool {
        self.duration > 0.0
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new(0.25, Easing::EaseInEaseOut)
    }
}
