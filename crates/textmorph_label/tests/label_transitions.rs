//! End-to-end label transition scenarios

use textmorph_animation::Easing;
use textmorph_core::{AttributeKind, AttributeValue, Color, Insets, Rect, RichText, Size};
use textmorph_label::{DrawOptions, MorphLabel, TextBackend, Transaction};

/// Backend that records every draw call instead of painting
#[derive(Default)]
struct RecordingBackend {
    draws: Vec<(String, f32)>,
}

impl RecordingBackend {
    fn clear(&mut self) {
        self.draws.clear();
    }
}

impl TextBackend for RecordingBackend {
    fn measure(&self, text: &RichText, max_width: f32) -> Size {
        // 8pt per byte, single line, clamped to the available width.
        let width = (text.len() as f32 * 8.0).min(max_width);
        Size::new(width, 16.0)
    }

    fn draw(&mut self, text: &RichText, _rect: Rect, options: &DrawOptions) {
        self.draws.push((text.as_str().to_string(), options.alpha));
    }
}

fn sized_label() -> MorphLabel {
    let mut label = MorphLabel::new();
    label.set_bounds(Rect::new(0.0, 0.0, 200.0, 40.0), Transaction::immediate());
    label
}

fn colored(text: &str, color: Color) -> RichText {
    RichText::styled(text, AttributeKind::ForegroundColor, color.into())
}

#[test]
fn color_change_interpolates_without_cross_fade() {
    let mut label = sized_label();
    label.set_text(Some(colored("Hi", Color::RED)), Transaction::immediate());
    label.set_text(
        Some(colored("Hi", Color::BLUE)),
        Transaction::new(2.0, Easing::Linear),
    );

    let animation = label.animation().expect("attribute change should animate");
    // Same string: no cross-fade, incoming side fully opaque.
    assert_eq!(animation.from_alpha(), 0.0);
    assert_eq!(animation.to_alpha(), 1.0);

    label.tick(1.0);
    let snapshot = label.current_snapshot().unwrap();
    let color = snapshot
        .value_at(AttributeKind::ForegroundColor, 0)
        .and_then(AttributeValue::as_color)
        .copied()
        .unwrap();
    assert!((color.r - 0.5).abs() < 1e-4);
    assert!((color.b - 0.5).abs() < 1e-4);

    // Only the opaque incoming side draws.
    let mut backend = RecordingBackend::default();
    label.draw(&mut backend);
    assert_eq!(backend.draws.len(), 1);
    assert_eq!(backend.draws[0], ("Hi".to_string(), 1.0));
}

#[test]
fn string_change_runs_three_phase_cross_fade() {
    let mut label = sized_label();
    label.set_text(Some(RichText::new("Hello")), Transaction::immediate());
    label.set_text(
        Some(RichText::new("World")),
        Transaction::new(4.0, Easing::Linear),
    );

    let animation = label.animation().unwrap();
    assert_eq!(animation.from_alpha(), 1.0);
    assert_eq!(animation.to_alpha(), 0.0);

    // During the leading persist phase only the outgoing text draws.
    let mut backend = RecordingBackend::default();
    label.tick(1.0);
    label.draw(&mut backend);
    assert_eq!(backend.draws.len(), 1);
    assert_eq!(backend.draws[0].0, "Hello");

    // Mid-swap both sides draw, each through a partial alpha.
    backend.clear();
    label.tick(1.0); // t = 2.0, center of the swap window
    label.draw(&mut backend);
    assert_eq!(backend.draws.len(), 2);
    let (ref from_text, from_alpha) = backend.draws[0];
    let (ref to_text, to_alpha) = backend.draws[1];
    assert_eq!(from_text, "Hello");
    assert_eq!(to_text, "World");
    assert!((from_alpha - 0.5).abs() < 1e-4);
    assert!((to_alpha - 0.5).abs() < 1e-4);
    assert!((0.0..=1.0).contains(&from_alpha));
    assert!((0.0..=1.0).contains(&to_alpha));

    // Finished: animation dropped, committed text draws opaque.
    backend.clear();
    label.tick(2.0);
    assert!(!label.is_animating());
    label.draw(&mut backend);
    assert_eq!(backend.draws.len(), 1);
    assert_eq!(backend.draws[0], ("World".to_string(), 1.0));
}

#[test]
fn superseding_mid_flight_restarts_from_dominant_side() {
    let mut label = sized_label();
    label.set_text(Some(RichText::new("Hello")), Transaction::immediate());
    label.set_text(
        Some(RichText::new("World")),
        Transaction::new(4.0, Easing::Linear),
    );

    // Early on, the outgoing "Hello" still dominates.
    label.tick(0.5);
    label.set_text(
        Some(RichText::new("Again")),
        Transaction::new(4.0, Easing::Linear),
    );
    let animation = label.animation().unwrap();
    assert_eq!(animation.from_text().as_str(), "Hello");
    assert_eq!(animation.to_text().as_str(), "Again");

    // Past the swap the incoming side dominates instead.
    label.tick(3.5);
    label.set_text(
        Some(RichText::new("More")),
        Transaction::new(4.0, Easing::Linear),
    );
    let animation = label.animation().unwrap();
    assert_eq!(animation.from_text().as_str(), "Again");
}

#[test]
fn zero_duration_applies_end_state_at_once() {
    let mut label = sized_label();
    label.set_text(Some(colored("Hi", Color::RED)), Transaction::immediate());
    label.set_text(Some(colored("Hi", Color::BLUE)), Transaction::immediate());

    assert!(!label.is_animating());
    let snapshot = label.current_snapshot().unwrap();
    assert_eq!(
        snapshot
            .value_at(AttributeKind::ForegroundColor, 0)
            .and_then(AttributeValue::as_color),
        Some(&Color::BLUE)
    );
}

#[test]
fn shrinking_text_never_overruns() {
    let mut label = sized_label();
    label.set_text(
        Some(colored("A much longer headline", Color::RED)),
        Transaction::immediate(),
    );
    label.set_text(
        Some(colored("Ok", Color::BLUE)),
        Transaction::new(2.0, Easing::Linear),
    );

    // Drive through the whole animation, reconstructing both sides
    // every frame; ranges from the longer text must clip silently.
    let mut backend = RecordingBackend::default();
    for _ in 0..25 {
        label.tick(0.1);
        label.draw(&mut backend);
    }
    assert!(!label.is_animating());
}

#[test]
fn empty_bounds_draw_nothing() {
    let mut label = MorphLabel::new();
    label.set_text(Some(RichText::new("Hello")), Transaction::immediate());

    let mut backend = RecordingBackend::default();
    label.draw(&mut backend);
    assert!(backend.draws.is_empty());

    // Padding larger than the bounds collapses the rect as well.
    label.set_bounds(Rect::new(0.0, 0.0, 10.0, 10.0), Transaction::immediate());
    label.set_padding(Insets::uniform(20.0));
    label.draw(&mut backend);
    assert!(backend.draws.is_empty());
}

#[test]
fn preferred_size_rounds_up_and_pads() {
    let mut label = MorphLabel::new().with_padding(Insets::new(2.0, 4.0, 2.0, 4.0));
    label.set_text(Some(RichText::new("Hi")), Transaction::immediate());

    let backend = RecordingBackend::default();
    let size = label.preferred_size(&backend, 500.0);
    // measure = 16x16; +1 ceiled, plus 8 horizontal / 4 vertical padding.
    assert_eq!(size, Size::new(25.0, 21.0));

    let empty = MorphLabel::new();
    assert_eq!(empty.preferred_size(&backend, 500.0), Size::ZERO);
}

#[test]
fn bounds_changes_tween_the_draw_rect() {
    let mut label = sized_label();
    label.set_text(Some(RichText::new("Hello")), Transaction::immediate());
    label.set_bounds(
        Rect::new(0.0, 0.0, 400.0, 80.0),
        Transaction::new(2.0, Easing::Linear),
    );
    assert!(label.is_animating());

    label.tick(1.0);
    assert!(label.is_animating());
    label.tick(1.0);
    assert!(!label.is_animating());
    assert_eq!(label.bounds(), Rect::new(0.0, 0.0, 400.0, 80.0));
}
