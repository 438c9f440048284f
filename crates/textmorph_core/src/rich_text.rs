//! Rich text: a string plus per-range style attributes
//!
//! Spans for a given attribute kind are kept sorted, non-overlapping, and
//! coalesced (adjacent spans with equal values merge). Run enumeration
//! yields maximal runs over the whole string, including the gaps that
//! carry no value, which is the shape the diff engine walks.
//!
//! Ranges are byte ranges into the string and must land on `char`
//! boundaries; `floor_char_boundary` is the clipping helper used wherever
//! a range from one text is applied to a shorter one.

use std::ops::Range;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::attr::{AttributeKind, AttributeValue};

/// Rich text range errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("invalid range {start}..{end}: start > end")]
    InvalidRange { start: usize, end: usize },

    #[error("range {start}..{end} out of bounds for text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("index {index} is not a char boundary")]
    NotOnCharBoundary { index: usize },
}

/// Largest index `<= index` that lands on a `char` boundary of `text`
pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[derive(Clone, Debug, PartialEq)]
struct Span {
    range: Range<usize>,
    value: AttributeValue,
}

/// A string plus per-range style attributes.
///
/// Equality is structural: two texts are equal when their strings match
/// and, for every attribute kind, their normalized spans match.
#[derive(Clone, Debug, Default)]
pub struct RichText {
    text: String,
    spans: FxHashMap<AttributeKind, Vec<Span>>,
}

impl RichText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: FxHashMap::default(),
        }
    }

    /// A text with one attribute applied over the whole string
    pub fn styled(text: impl Into<String>, kind: AttributeKind, value: AttributeValue) -> Self {
        let mut result = Self::new(text);
        let len = result.len();
        if len > 0 {
            result.apply_clipped(kind, 0..len, Some(value));
        }
        result
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the underlying string, in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether any span of the given kind exists
    pub fn has_attribute(&self, kind: AttributeKind) -> bool {
        self.spans.get(&kind).is_some_and(|spans| !spans.is_empty())
    }

    /// The attribute value in effect at a byte index
    pub fn value_at(&self, kind: AttributeKind, index: usize) -> Option<&AttributeValue> {
        self.spans_for(kind)
            .iter()
            .find(|span| span.range.contains(&index))
            .map(|span| &span.value)
    }

    /// Apply `value` over `range`, replacing whatever the range held.
    ///
    /// The range must be ordered, in bounds, and on `char` boundaries.
    pub fn set_attribute(
        &mut self,
        kind: AttributeKind,
        range: Range<usize>,
        value: AttributeValue,
    ) -> Result<(), TextError> {
        self.check_range(&range)?;
        self.apply_clipped(kind, range, Some(value));
        Ok(())
    }

    /// Remove the attribute over `range`.
    pub fn remove_attribute(
        &mut self,
        kind: AttributeKind,
        range: Range<usize>,
    ) -> Result<(), TextError> {
        self.check_range(&range)?;
        self.apply_clipped(kind, range, None);
        Ok(())
    }

    /// Apply (or remove, when `value` is `None`) an attribute over `range`,
    /// clipping the range to the text instead of failing.
    ///
    /// Out-of-bounds endpoints are clamped and floored to `char`
    /// boundaries; a range that clips to nothing is a no-op. This is the
    /// entry point for callers replaying ranges recorded against a
    /// different (possibly longer) text.
    pub fn apply_clipped(
        &mut self,
        kind: AttributeKind,
        range: Range<usize>,
        value: Option<AttributeValue>,
    ) {
        let start = floor_char_boundary(&self.text, range.start);
        let end = floor_char_boundary(&self.text, range.end.min(self.len()));
        if start >= end {
            return;
        }
        let spans = self.spans.entry(kind).or_default();
        splice(spans, start..end, value);
        if spans.is_empty() {
            self.spans.remove(&kind);
        }
    }

    /// Maximal runs of the given kind covering the whole string.
    ///
    /// Gaps with no value are yielded as runs carrying `None`, so the
    /// result always partitions `0..len` (and is empty only for an empty
    /// string).
    pub fn runs(&self, kind: AttributeKind) -> Vec<(Range<usize>, Option<&AttributeValue>)> {
        let len = self.len();
        let mut runs = Vec::new();
        if len == 0 {
            return runs;
        }
        let mut cursor = 0;
        for span in self.spans_for(kind) {
            if span.range.start > cursor {
                runs.push((cursor..span.range.start, None));
            }
            runs.push((span.range.clone(), Some(&span.value)));
            cursor = span.range.end;
        }
        if cursor < len {
            runs.push((cursor..len, None));
        }
        runs
    }

    /// Runs of the given kind clipped to `range`
    pub fn runs_in(
        &self,
        kind: AttributeKind,
        range: Range<usize>,
    ) -> Vec<(Range<usize>, Option<&AttributeValue>)> {
        self.runs(kind)
            .into_iter()
            .filter_map(|(run, value)| {
                let start = run.start.max(range.start);
                let end = run.end.min(range.end);
                (start < end).then_some((start..end, value))
            })
            .collect()
    }

    fn spans_for(&self, kind: AttributeKind) -> &[Span] {
        self.spans.get(&kind).map_or(&[], |spans| spans.as_slice())
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), TextError> {
        if range.start > range.end {
            return Err(TextError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.len() {
            return Err(TextError::OutOfBounds {
                start: range.start,
                end: range.end,
                len: self.len(),
            });
        }
        for index in [range.start, range.end] {
            if !self.text.is_char_boundary(index) {
                return Err(TextError::NotOnCharBoundary { index });
            }
        }
        Ok(())
    }
}

impl PartialEq for RichText {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && AttributeKind::ALL
                .iter()
                .all(|kind| self.spans_for(*kind) == other.spans_for(*kind))
    }
}

/// Replace `range` within `spans` with `value`, splitting overlapped
/// spans and re-coalescing adjacent equal values.
fn splice(spans: &mut Vec<Span>, range: Range<usize>, value: Option<AttributeValue>) {
    let mut split: SmallVec<[Span; 8]> = SmallVec::new();
    for span in spans.drain(..) {
        if span.range.end <= range.start || span.range.start >= range.end {
            split.push(span);
            continue;
        }
        if span.range.start < range.start {
            split.push(Span {
                range: span.range.start..range.start,
                value: span.value.clone(),
            });
        }
        if span.range.end > range.end {
            split.push(Span {
                range: range.end..span.range.end,
                value: span.value,
            });
        }
    }
    if let Some(value) = value {
        split.push(Span { range, value });
    }
    split.sort_by_key(|span| span.range.start);

    for span in split {
        if let Some(last) = spans.last_mut() {
            if last.range.end == span.range.start && last.value == span.value {
                last.range.end = span.range.end;
                continue;
            }
        }
        spans.push(span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;
    use crate::style::FontDesc;

    #[test]
    fn test_structural_equality() {
        let mut a = RichText::new("Hello");
        a.set_attribute(AttributeKind::ForegroundColor, 0..5, Color::RED.into())
            .unwrap();
        let b = RichText::styled("Hello", AttributeKind::ForegroundColor, Color::RED.into());
        assert_eq!(a, b);

        let c = RichText::styled("Hello", AttributeKind::ForegroundColor, Color::BLUE.into());
        assert_ne!(a, c);
        assert_ne!(a, RichText::new("Hello"));
    }

    #[test]
    fn test_runs_include_gaps() {
        let mut text = RichText::new("Hello world");
        text.set_attribute(AttributeKind::ForegroundColor, 2..5, Color::RED.into())
            .unwrap();

        let runs = text.runs(AttributeKind::ForegroundColor);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], (0..2, None));
        assert_eq!(runs[1].0, 2..5);
        assert!(runs[1].1.is_some());
        assert_eq!(runs[2], (5..11, None));
    }

    #[test]
    fn test_runs_empty_text() {
        let text = RichText::new("");
        assert!(text.runs(AttributeKind::Font).is_empty());
    }

    #[test]
    fn test_overlapping_set_splits_spans() {
        let mut text = RichText::new("abcdef");
        text.set_attribute(AttributeKind::ForegroundColor, 0..6, Color::RED.into())
            .unwrap();
        text.set_attribute(AttributeKind::ForegroundColor, 2..4, Color::BLUE.into())
            .unwrap();

        let runs = text.runs(AttributeKind::ForegroundColor);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].1.unwrap().as_color(), Some(&Color::RED));
        assert_eq!(runs[1].1.unwrap().as_color(), Some(&Color::BLUE));
        assert_eq!(runs[2].1.unwrap().as_color(), Some(&Color::RED));
    }

    #[test]
    fn test_adjacent_equal_spans_coalesce() {
        let mut text = RichText::new("abcdef");
        text.set_attribute(AttributeKind::ForegroundColor, 0..3, Color::RED.into())
            .unwrap();
        text.set_attribute(AttributeKind::ForegroundColor, 3..6, Color::RED.into())
            .unwrap();
        assert_eq!(text.runs(AttributeKind::ForegroundColor).len(), 1);
    }

    #[test]
    fn test_remove_attribute() {
        let mut text = RichText::styled("abcdef", AttributeKind::Kerning, 2.0.into());
        text.remove_attribute(AttributeKind::Kerning, 1..3).unwrap();
        assert!(text.value_at(AttributeKind::Kerning, 1).is_none());
        assert!(text.value_at(AttributeKind::Kerning, 0).is_some());
        assert!(text.value_at(AttributeKind::Kerning, 4).is_some());
    }

    #[test]
    fn test_range_validation() {
        let mut text = RichText::new("Hello");
        #[allow(clippy::reversed_empty_ranges)]
        let err = text
            .set_attribute(AttributeKind::Font, 4..3, FontDesc::body().into())
            .unwrap_err();
        assert_eq!(err, TextError::InvalidRange { start: 4, end: 3 });

        let err = text
            .set_attribute(AttributeKind::Font, 0..9, FontDesc::body().into())
            .unwrap_err();
        assert_eq!(
            err,
            TextError::OutOfBounds {
                start: 0,
                end: 9,
                len: 5
            }
        );
    }

    #[test]
    fn test_char_boundary_validation() {
        // "é" is 2 bytes; index 1 is inside it.
        let mut text = RichText::new("éclair");
        let err = text
            .set_attribute(AttributeKind::ForegroundColor, 1..3, Color::RED.into())
            .unwrap_err();
        assert_eq!(err, TextError::NotOnCharBoundary { index: 1 });
        assert!(text
            .set_attribute(AttributeKind::ForegroundColor, 0..2, Color::RED.into())
            .is_ok());
    }

    #[test]
    fn test_apply_clipped_overrun() {
        let mut text = RichText::new("Hi");
        text.apply_clipped(AttributeKind::ForegroundColor, 0..40, Some(Color::RED.into()));
        let runs = text.runs(AttributeKind::ForegroundColor);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, 0..2);

        // Entirely out of bounds clips to nothing.
        let mut text = RichText::new("Hi");
        text.apply_clipped(AttributeKind::ForegroundColor, 5..9, Some(Color::RED.into()));
        assert!(!text.has_attribute(AttributeKind::ForegroundColor));
    }

    #[test]
    fn test_floor_char_boundary() {
        let text = "éclair";
        assert_eq!(floor_char_boundary(text, 1), 0);
        assert_eq!(floor_char_boundary(text, 2), 2);
        assert_eq!(floor_char_boundary(text, 100), text.len());
    }
}
