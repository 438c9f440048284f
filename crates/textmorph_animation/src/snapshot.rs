//! Snapshot reconstruction
//!
//! Rebuilds a drawable rich text from a base text plus the live
//! interpolation state. Ranges recorded against a longer text clip to
//! the base text; an entry that decodes to nothing removes the attribute
//! over its range instead of applying a null.

use textmorph_core::{AttributeKind, RichText};

use crate::codec;
use crate::state::{InterpolationState, StateEntry};

/// Apply the state's interpolated values onto a copy of `base`.
///
/// Kinds iterate in canonical order and ranges in seeding order, so the
/// same state always produces the same snapshot. Never fails: ranges
/// clip, decode falls back to defaults, and absent values remove.
pub fn reconstruct(base: &RichText, state: &InterpolationState) -> RichText {
    let mut result = base.clone();
    for kind in AttributeKind::ALL {
        for (range, entry) in state.ranges(kind) {
            if range.start >= result.len() {
                continue;
            }
            let value = match entry {
                StateEntry::Encoded(encoded) => codec::decode(kind, encoded),
                StateEntry::Raw(value) => value.clone(),
            };
            result.apply_clipped(kind, range, value);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::TweenValue;
    use textmorph_core::{AttributeValue, Color};

    #[test]
    fn test_reconstruct_applies_decoded_state() {
        let base = RichText::new("Hello");
        let mut state = InterpolationState::new();
        let encoded =
            codec::encode(AttributeKind::ForegroundColor, Some(&Color::RED.into())).unwrap();
        state.seed(
            AttributeKind::ForegroundColor,
            &(0..5),
            StateEntry::Encoded(encoded),
        );

        let snapshot = reconstruct(&base, &state);
        assert_eq!(
            snapshot
                .value_at(AttributeKind::ForegroundColor, 2)
                .and_then(AttributeValue::as_color),
            Some(&Color::RED)
        );
        // The base text is untouched.
        assert!(!base.has_attribute(AttributeKind::ForegroundColor));
    }

    #[test]
    fn test_reconstruct_clips_overlong_ranges() {
        let base = RichText::new("Hi");
        let mut state = InterpolationState::new();
        state.seed(
            AttributeKind::Kerning,
            &(0..40),
            StateEntry::Raw(Some(AttributeValue::Number(2.0))),
        );
        state.seed(
            AttributeKind::Kerning,
            &(10..20),
            StateEntry::Raw(Some(AttributeValue::Number(3.0))),
        );

        let snapshot = reconstruct(&base, &state);
        // The straddling range applies over what exists; the one past
        // the end applies nowhere.
        assert_eq!(
            snapshot
                .value_at(AttributeKind::Kerning, 1)
                .and_then(|value| value.as_number()),
            Some(2.0)
        );
        assert_eq!(snapshot.runs(AttributeKind::Kerning).len(), 1);
    }

    #[test]
    fn test_raw_none_removes_attribute() {
        let base = RichText::styled("Hello", AttributeKind::Kerning, 2.0.into());
        let mut state = InterpolationState::new();
        state.set(AttributeKind::Kerning, &(0..5), &[], None);

        let snapshot = reconstruct(&base, &state);
        assert!(!snapshot.has_attribute(AttributeKind::Kerning));
    }

    #[test]
    fn test_snapshot_reflects_live_field_updates() {
        let base = RichText::styled("Hi", AttributeKind::ForegroundColor, Color::RED.into());
        let mut state = InterpolationState::new();
        let encoded =
            codec::encode(AttributeKind::ForegroundColor, Some(&Color::RED.into())).unwrap();
        state.seed(
            AttributeKind::ForegroundColor,
            &(0..2),
            StateEntry::Encoded(encoded),
        );
        state.set(
            AttributeKind::ForegroundColor,
            &(0..2),
            &["r".to_string()],
            Some(TweenValue::Number(0.5)),
        );

        let snapshot = reconstruct(&base, &state);
        let color = snapshot
            .value_at(AttributeKind::ForegroundColor, 0)
            .and_then(AttributeValue::as_color)
            .unwrap();
        assert!((color.r - 0.5).abs() < 1e-6);
        assert!((color.a - 1.0).abs() < 1e-6);
    }
}
