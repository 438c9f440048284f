//! Interpolation state
//!
//! The live field values of one running animation, keyed by attribute
//! kind and range. Seeded with the encoded "from" baselines when the
//! animation starts, then overwritten field by field as the timeline
//! reports interpolated values each frame.
//!
//! The store belongs to exactly one animation instance. A new text
//! change builds a fresh store; nothing is shared across instances.

use std::ops::Range;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use textmorph_core::{AttributeKind, AttributeValue};

use crate::codec::{EncodedAttribute, FieldValue};
use crate::diff::TweenValue;

/// Stored value for one (kind, range) slot.
///
/// Codec-aware kinds keep an encoded field map whose field set stays
/// stable for the kind; everything else keeps the raw value whole
/// (`None` meaning "attribute absent").
#[derive(Clone, Debug, PartialEq)]
pub enum StateEntry {
    Encoded(EncodedAttribute),
    Raw(Option<AttributeValue>),
}

/// Per-kind, per-range store of interpolated values.
///
/// Ranges iterate in seeding order, which matches diff emission order,
/// so reconstruction applies values in the same order every frame.
#[derive(Clone, Debug, Default)]
pub struct InterpolationState {
    entries: FxHashMap<AttributeKind, IndexMap<(usize, usize), StateEntry>>,
}

impl InterpolationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(IndexMap::is_empty)
    }

    /// Install the baseline entry for a (kind, range) slot
    pub fn seed(&mut self, kind: AttributeKind, range: &Range<usize>, entry: StateEntry) {
        self.entries
            .entry(kind)
            .or_default()
            .insert((range.start, range.end), entry);
    }

    /// Report an interpolated value into a slot.
    ///
    /// An empty path replaces the slot's raw value whole; a non-empty
    /// path writes one field of the slot's encoded map (`None` removes
    /// the field). Slots are created on demand so a report can arrive
    /// before its seed.
    pub fn set(
        &mut self,
        kind: AttributeKind,
        range: &Range<usize>,
        path: &[String],
        value: Option<TweenValue>,
    ) {
        let ranges = self.entries.entry(kind).or_default();
        let key = (range.start, range.end);

        if path.is_empty() {
            ranges.insert(key, StateEntry::Raw(value.and_then(tween_to_value)));
            return;
        }

        let entry = ranges
            .entry(key)
            .or_insert_with(|| StateEntry::Encoded(EncodedAttribute::new()));
        if !matches!(entry, StateEntry::Encoded(_)) {
            *entry = StateEntry::Encoded(EncodedAttribute::new());
        }
        if let StateEntry::Encoded(encoded) = entry {
            encoded.set_path(path, value.and_then(tween_to_field));
        }
    }

    /// The current entry for a (kind, range) slot
    pub fn entry(&self, kind: AttributeKind, range: &Range<usize>) -> Option<&StateEntry> {
        self.entries.get(&kind)?.get(&(range.start, range.end))
    }

    /// All (range, entry) pairs for one kind, in seeding order
    pub fn ranges(&self, kind: AttributeKind) -> impl Iterator<Item = (Range<usize>, &StateEntry)> {
        self.entries
            .get(&kind)
            .into_iter()
            .flat_map(|ranges| ranges.iter().map(|((start, end), entry)| (*start..*end, entry)))
    }
}

fn tween_to_value(value: TweenValue) -> Option<AttributeValue> {
    match value {
        TweenValue::Value(value) => Some(value),
        TweenValue::Number(number) => Some(AttributeValue::Number(number)),
        TweenValue::Text(text) => Some(AttributeValue::Text(text)),
    }
}

fn tween_to_field(value: TweenValue) -> Option<FieldValue> {
    match value {
        TweenValue::Number(number) => Some(FieldValue::Number(number)),
        TweenValue::Text(text) => Some(FieldValue::Text(text)),
        TweenValue::Value(AttributeValue::Number(number)) => Some(FieldValue::Number(number)),
        TweenValue::Value(AttributeValue::Text(text)) => Some(FieldValue::Text(text)),
        TweenValue::Value(_) => None,
    }
}
