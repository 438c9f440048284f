//! One running text-change animation
//!
//! A `TextAnimation` owns everything one morph needs: the two endpoint
//! texts, the timeline, the interpolation state, and the two alpha
//! channels. The host clock drives it by calling [`TextAnimation::advance`]
//! with the current time; reconstruction of the drawable snapshots is
//! pure, so a frame may sample them zero or many times.
//!
//! Starting a new animation means building a new instance; the previous
//! one is simply dropped, state and all.

use std::ops::Range;

use textmorph_core::{AttributeKind, RichText};

use crate::diff::{TextDiff, TweenValue};
use crate::easing::Easing;
use crate::snapshot::reconstruct;
use crate::state::InterpolationState;
use crate::timeline::{AnimationTarget, Timeline};

/// A text morph in flight
#[derive(Clone, Debug)]
pub struct TextAnimation {
    from_text: RichText,
    to_text: RichText,
    timeline: Timeline,
    state: InterpolationState,
    from_alpha: f32,
    to_alpha: f32,
    elapsed: f32,
}

impl TextAnimation {
    /// Diff the endpoints and build the animation.
    ///
    /// Returns `None` when there is nothing to animate: the texts are
    /// equal, or the duration is non-positive (the caller shows the end
    /// state directly in both cases).
    pub fn new(
        from_text: RichText,
        to_text: RichText,
        duration: f32,
        easing: Easing,
    ) -> Option<Self> {
        let diff = TextDiff::between(&from_text, &to_text);
        if diff.is_empty() {
            return None;
        }
        let timeline = Timeline::build(&diff, duration, easing);
        if timeline.is_immediate() {
            return None;
        }

        let mut state = InterpolationState::new();
        for (kind, range, entry) in &diff.seeds {
            state.seed(*kind, range, entry.clone());
        }
        // Until the first frame, the stable side is fully opaque: the
        // outgoing text when a cross-fade is coming, the incoming text
        // otherwise.
        let (from_alpha, to_alpha) = if diff.text_changed { (1.0, 0.0) } else { (0.0, 1.0) };

        Some(Self {
            from_text,
            to_text,
            timeline,
            state,
            from_alpha,
            to_alpha,
            elapsed: 0.0,
        })
    }

    /// Sample the timeline at time `t` (seconds from the animation's
    /// start) and update alphas and interpolation state.
    ///
    /// Times clamp to `[0, duration]`. Among entries that have begun,
    /// later ones override earlier ones per target.
    pub fn advance(&mut self, t: f32) {
        let t = t.clamp(0.0, self.timeline.duration());
        self.elapsed = t;
        for entry in self.timeline.entries() {
            if entry.begin > t {
                continue;
            }
            let value = entry.value_at(t);
            match &entry.target {
                AnimationTarget::FromAlpha => {
                    if let Some(TweenValue::Number(alpha)) = value {
                        self.from_alpha = alpha.clamp(0.0, 1.0);
                    }
                }
                AnimationTarget::ToAlpha => {
                    if let Some(TweenValue::Number(alpha)) = value {
                        self.to_alpha = alpha.clamp(0.0, 1.0);
                    }
                }
                AnimationTarget::Field { kind, range, path } => {
                    self.state.set(*kind, range, path, value);
                }
            }
        }
    }

    /// Report one interpolated field value into the state store.
    ///
    /// Hook for hosts whose own animation runtime produces the values
    /// instead of [`TextAnimation::advance`].
    pub fn report_field(
        &mut self,
        kind: AttributeKind,
        range: &Range<usize>,
        path: &[String],
        value: Option<TweenValue>,
    ) {
        self.state.set(kind, range, path, value);
    }

    /// Report externally computed alphas (clamped to [0, 1])
    pub fn report_alphas(&mut self, from_alpha: f32, to_alpha: f32) {
        self.from_alpha = from_alpha.clamp(0.0, 1.0);
        self.to_alpha = to_alpha.clamp(0.0, 1.0);
    }

    pub fn from_text(&self) -> &RichText {
        &self.from_text
    }

    pub fn to_text(&self) -> &RichText {
        &self.to_text
    }

    pub fn from_alpha(&self) -> f32 {
        self.from_alpha
    }

    pub fn to_alpha(&self) -> f32 {
        self.to_alpha
    }

    /// Read-only view of the live interpolation state
    pub fn state(&self) -> &InterpolationState {
        &self.state
    }

    pub fn duration(&self) -> f32 {
        self.timeline.duration()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.timeline.duration()
    }

    /// The outgoing rendering, with live values applied.
    ///
    /// `None` while the outgoing side is fully transparent - there is
    /// nothing to draw, so no snapshot is built.
    pub fn interpolated_from_text(&self) -> Option<RichText> {
        (self.from_alpha > 0.0).then(|| reconstruct(&self.from_text, &self.state))
    }

    /// The incoming rendering, with live values applied
    pub fn interpolated_to_text(&self) -> Option<RichText> {
        (self.to_alpha > 0.0).then(|| reconstruct(&self.to_text, &self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textmorph_core::{AttributeValue, Color};

    fn colored(text: &str, color: Color) -> RichText {
        RichText::styled(text, AttributeKind::ForegroundColor, color.into())
    }

    #[test]
    fn test_equal_texts_do_not_animate() {
        let text = colored("Hi", Color::RED);
        assert!(TextAnimation::new(text.clone(), text, 1.0, Easing::Linear).is_none());
    }

    #[test]
    fn test_non_positive_duration_does_not_animate() {
        let from = colored("Hi", Color::RED);
        let to = colored("Hi", Color::BLUE);
        assert!(TextAnimation::new(from, to, 0.0, Easing::Linear).is_none());
    }

    #[test]
    fn test_attribute_only_change_keeps_to_side_opaque() {
        let from = colored("Hi", Color::RED);
        let to = colored("Hi", Color::BLUE);
        let mut animation = TextAnimation::new(from, to, 2.0, Easing::Linear).unwrap();

        assert_eq!(animation.from_alpha(), 0.0);
        assert_eq!(animation.to_alpha(), 1.0);
        animation.advance(1.0);
        assert_eq!(animation.from_alpha(), 0.0);
        assert_eq!(animation.to_alpha(), 1.0);
        assert!(animation.interpolated_from_text().is_none());
    }

    #[test]
    fn test_color_midpoint() {
        let from = colored("Hi", Color::RED);
        let to = colored("Hi", Color::BLUE);
        let mut animation = TextAnimation::new(from, to, 2.0, Easing::Linear).unwrap();

        animation.advance(1.0);
        let snapshot = animation.interpolated_to_text().unwrap();
        let color = snapshot
            .value_at(AttributeKind::ForegroundColor, 0)
            .and_then(AttributeValue::as_color)
            .copied()
            .unwrap();
        assert!((color.r - 0.5).abs() < 1e-4);
        assert!((color.g - 0.0).abs() < 1e-4);
        assert!((color.b - 0.5).abs() < 1e-4);
        assert!((color.a - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_cross_fade_alphas_over_time() {
        let from = RichText::new("Hello");
        let to = RichText::new("World");
        let mut animation = TextAnimation::new(from, to, 4.0, Easing::Linear).unwrap();

        assert_eq!(animation.from_alpha(), 1.0);
        assert_eq!(animation.to_alpha(), 0.0);

        animation.advance(0.0);
        assert_eq!(animation.from_alpha(), 1.0);
        assert_eq!(animation.to_alpha(), 0.0);

        // Mid-swap: swap = 1.0, persist = 1.5, so t = 2.0 is halfway.
        animation.advance(2.0);
        assert!((animation.from_alpha() - 0.5).abs() < 1e-4);
        assert!((animation.to_alpha() - 0.5).abs() < 1e-4);

        animation.advance(4.0);
        assert_eq!(animation.from_alpha(), 0.0);
        assert_eq!(animation.to_alpha(), 1.0);
        assert!(animation.is_finished());
        assert!(animation.interpolated_from_text().is_none());
        assert_eq!(
            animation.interpolated_to_text().unwrap().as_str(),
            "World"
        );
    }

    #[test]
    fn test_advance_clamps_and_resamples() {
        let from = colored("Hi", Color::RED);
        let to = colored("Hi", Color::BLUE);
        let mut animation = TextAnimation::new(from, to, 2.0, Easing::Linear).unwrap();

        animation.advance(50.0);
        assert!(animation.is_finished());
        let snapshot = animation.interpolated_to_text().unwrap();
        assert_eq!(
            snapshot
                .value_at(AttributeKind::ForegroundColor, 0)
                .and_then(AttributeValue::as_color),
            Some(&Color::BLUE)
        );

        // Sampling twice at the same time is idempotent.
        animation.advance(50.0);
        let again = animation.interpolated_to_text().unwrap();
        assert_eq!(again, snapshot);
    }

    #[test]
    fn test_shrinking_text_clips_snapshot() {
        // From a longer styled text to a shorter one: state ranges
        // recorded against the longer text must clip when applied to it.
        let from = colored("Hello there", Color::RED);
        let to = colored("Hi", Color::BLUE);
        let mut animation = TextAnimation::new(from, to, 2.0, Easing::Linear).unwrap();
        animation.advance(1.0);
        // Both sides reconstruct without panicking mid-swap.
        let _ = animation.interpolated_from_text();
        let _ = animation.interpolated_to_text();
    }
}
