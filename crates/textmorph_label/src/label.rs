//! The morphing label driver
//!
//! `MorphLabel` is the piece the host widget talks to. It owns the
//! committed text and at most one running [`TextAnimation`]; every text
//! change diffs against what is currently on screen and supersedes the
//! previous animation wholesale. Drawing composites the outgoing and
//! incoming renderings through their alphas.

use textmorph_animation::TextAnimation;
use textmorph_core::{AttributeKind, Insets, ParagraphStyle, Rect, RichText, Size, TextAlign};

use crate::backend::{DrawOptions, TextBackend};
use crate::bounds::BoundsTransition;
use crate::transaction::Transaction;

/// A read-only text view that animates between its states
#[derive(Clone, Debug, Default)]
pub struct MorphLabel {
    text: Option<RichText>,
    animation: Option<TextAnimation>,
    bounds: Rect,
    bounds_transition: Option<BoundsTransition>,
    alignment: TextAlign,
    padding: Insets,
}

impl MorphLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alignment(mut self, alignment: TextAlign) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn text(&self) -> Option<&RichText> {
        self.text.as_ref()
    }

    pub fn alignment(&self) -> TextAlign {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: TextAlign) {
        self.alignment = alignment;
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The running text animation, if any
    pub fn animation(&self) -> Option<&TextAnimation> {
        self.animation.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some() || self.bounds_transition.is_some()
    }

    /// Commit a new text, animating per the transaction.
    ///
    /// The outgoing side of the new animation is whatever is currently
    /// committed on screen: with an animation in flight, the
    /// interpolated snapshot of the side with the greater alpha. A text
    /// equal to that, or an immediate transaction, cancels any running
    /// animation and just commits.
    pub fn set_text(&mut self, text: Option<RichText>, transaction: Transaction) {
        let new_text = text.map(|text| self.aligned(text));
        let from_text = match self.animation.take() {
            Some(animation) => {
                tracing::debug!("superseding running text animation");
                if animation.from_alpha() > animation.to_alpha() {
                    animation.interpolated_from_text()
                } else {
                    animation.interpolated_to_text()
                }
            }
            None => self.text.clone(),
        };
        self.text = new_text.clone();
        self.animation = match new_text {
            Some(to_text) if transaction.is_animated() => TextAnimation::new(
                from_text.unwrap_or_default(),
                to_text,
                transaction.duration,
                transaction.easing,
            ),
            _ => None,
        };
    }

    /// Resize the label, tweening the drawing rect when animated
    pub fn set_bounds(&mut self, bounds: Rect, transaction: Transaction) {
        if bounds == self.bounds {
            return;
        }
        let from = self
            .bounds_transition
            .map_or(self.bounds, |transition| transition.current());
        self.bounds = bounds;
        self.bounds_transition = transaction.is_animated().then(|| {
            BoundsTransition::new(from, bounds, transaction.duration, transaction.easing)
        });
    }

    /// Advance all running transitions by `dt` seconds.
    ///
    /// Finished transitions are dropped; their end state is the
    /// committed text and bounds, so nothing changes visually.
    pub fn tick(&mut self, dt: f32) {
        let text_finished = self.animation.as_mut().is_some_and(|animation| {
            animation.advance(animation.elapsed() + dt);
            animation.is_finished()
        });
        if text_finished {
            self.animation = None;
        }

        let bounds_finished = self.bounds_transition.as_mut().is_some_and(|transition| {
            transition.advance(transition.elapsed() + dt);
            transition.is_finished()
        });
        if bounds_finished {
            self.bounds_transition = None;
        }
    }

    /// The rich text to show right now, for synchronous rendering.
    ///
    /// Mid-animation this is the interpolated snapshot of the dominant
    /// side; otherwise the committed text.
    pub fn current_snapshot(&self) -> Option<RichText> {
        match &self.animation {
            Some(animation) => {
                let dominant = if animation.from_alpha() > animation.to_alpha() {
                    animation.interpolated_from_text()
                } else {
                    animation.interpolated_to_text()
                };
                dominant.or_else(|| self.text.clone())
            }
            None => self.text.clone(),
        }
    }

    /// Draw the label into its current rect.
    ///
    /// Each side paints through its own alpha; a fully transparent side
    /// is skipped entirely, and an empty rect draws nothing.
    pub fn draw(&self, backend: &mut dyn TextBackend) {
        let rect = self.draw_rect();
        if rect.is_empty() {
            return;
        }
        match &self.animation {
            Some(animation) => {
                let from_alpha = animation.from_alpha();
                let to_alpha = animation.to_alpha();
                if from_alpha <= 0.0 && to_alpha <= 0.0 {
                    return;
                }
                if from_alpha > 0.0 {
                    if let Some(text) = animation.interpolated_from_text() {
                        backend.draw(&text, rect, &DrawOptions::with_alpha(from_alpha));
                    }
                }
                if to_alpha > 0.0 {
                    if let Some(text) = animation.interpolated_to_text() {
                        backend.draw(&text, rect, &DrawOptions::with_alpha(to_alpha));
                    }
                }
            }
            None => {
                if let Some(text) = &self.text {
                    backend.draw(text, rect, &DrawOptions::default());
                }
            }
        }
    }

    /// Size the label wants for its committed text.
    ///
    /// Measured size plus a 1pt safety margin, ceiled, plus padding.
    pub fn preferred_size(&self, backend: &dyn TextBackend, max_width: f32) -> Size {
        let Some(text) = &self.text else {
            return Size::ZERO;
        };
        let measured = backend.measure(text, max_width);
        Size::new(
            (measured.width + 1.0).ceil() + self.padding.horizontal(),
            (measured.height + 1.0).ceil() + self.padding.vertical(),
        )
    }

    fn draw_rect(&self) -> Rect {
        let bounds = self
            .bounds_transition
            .map_or(self.bounds, |transition| transition.current());
        bounds.inset(self.padding)
    }

    /// Inject a whole-string paragraph style carrying the label's
    /// alignment when the text has none, so alignment participates in
    /// diffs like any other attribute.
    fn aligned(&self, text: RichText) -> RichText {
        if text.is_empty() || text.has_attribute(AttributeKind::ParagraphStyle) {
            return text;
        }
        let mut text = text;
        let len = text.len();
        text.apply_clipped(
            AttributeKind::ParagraphStyle,
            0..len,
            Some(ParagraphStyle::aligned(self.alignment).into()),
        );
        text
    }
}
