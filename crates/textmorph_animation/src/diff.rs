//! Range-aware attribute diffing
//!
//! Walks two rich texts kind by kind and produces the field-level
//! differences that need animating, plus the encoded "from" baselines
//! that seed the interpolation state. The walk is deterministic: kinds
//! in canonical order, runs in text order, fields in codec order.
//!
//! The run walk follows the longer of the two texts. Runs that begin at
//! or past the shorter text's end are ignored; a run that straddles the
//! boundary is compared within the overlap and, for its trailing
//! overhang, against no value at all.

use std::ops::Range;

use textmorph_core::{floor_char_boundary, AttributeKind, AttributeValue, RichText};

use crate::codec::{self, EncodedAttribute, FieldValue};
use crate::state::StateEntry;

/// A value travelling through a tween.
///
/// Numbers interpolate; text and opaque whole values step discretely.
#[derive(Clone, Debug, PartialEq)]
pub enum TweenValue {
    Number(f32),
    Text(String),
    /// A whole attribute value for kinds without a codec
    Value(AttributeValue),
}

impl TweenValue {
    /// Interpolate between two optional endpoints at eased progress `t`.
    ///
    /// Numeric pairs (including opaque numeric attribute values) lerp;
    /// anything else cannot be blended, so it holds the "from" endpoint
    /// until the midpoint and the "to" endpoint after it. An absent
    /// endpoint stays absent when chosen.
    pub fn interpolate(
        from: Option<&TweenValue>,
        to: Option<&TweenValue>,
        t: f32,
    ) -> Option<TweenValue> {
        match (from, to) {
            (Some(TweenValue::Number(a)), Some(TweenValue::Number(b))) => {
                Some(TweenValue::Number(a + (b - a) * t))
            }
            (
                Some(TweenValue::Value(AttributeValue::Number(a))),
                Some(TweenValue::Value(AttributeValue::Number(b))),
            ) => Some(TweenValue::Value(AttributeValue::Number(a + (b - a) * t))),
            _ => {
                if t < 0.5 {
                    from.cloned()
                } else {
                    to.cloned()
                }
            }
        }
    }
}

/// One field-level difference between the two texts
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDiff {
    pub kind: AttributeKind,
    pub range: Range<usize>,
    /// Path into the encoded field map; empty for opaque whole-value
    /// diffs
    pub path: Vec<String>,
    pub from: Option<TweenValue>,
    pub to: Option<TweenValue>,
}

/// The full difference between two rich texts
#[derive(Clone, Debug, Default)]
pub struct TextDiff {
    /// Field-level differences, in deterministic emission order
    pub diffs: Vec<AttributeDiff>,
    /// Encoded "from" baseline per touched (kind, range), used to seed
    /// the interpolation state before any frame runs
    pub seeds: Vec<(AttributeKind, Range<usize>, StateEntry)>,
    /// Whether the plain string content differs (triggers the alpha
    /// cross-fade independently of attribute diffs)
    pub text_changed: bool,
}

impl TextDiff {
    /// Diff `from_text` against `to_text`.
    ///
    /// Equal texts produce an empty diff. Attribute values of mismatched
    /// types for one kind always differ and fall back to opaque
    /// comparison when neither side fits the kind's codec.
    pub fn between(from_text: &RichText, to_text: &RichText) -> Self {
        let text_changed = from_text.as_str() != to_text.as_str();
        let swapped = to_text.len() > from_text.len();
        let (longer, shorter) = if swapped {
            (to_text, from_text)
        } else {
            (from_text, to_text)
        };

        let mut diff = Self {
            diffs: Vec::new(),
            seeds: Vec::new(),
            text_changed,
        };

        for kind in AttributeKind::ALL {
            for (run, longer_value) in longer.runs(kind) {
                if run.start >= shorter.len() {
                    continue;
                }
                let clip_end = floor_char_boundary(shorter.as_str(), run.end.min(shorter.len()));
                for (range, shorter_value) in shorter.runs_in(kind, run.start..clip_end) {
                    if values_differ(longer_value, shorter_value) {
                        let (from_value, to_value) = orient(swapped, longer_value, shorter_value);
                        diff.push(kind, range, from_value, to_value);
                    }
                }
                if run.end > shorter.len() && values_differ(longer_value, None) {
                    let (from_value, to_value) = orient(swapped, longer_value, None);
                    diff.push(kind, run.clone(), from_value, to_value);
                }
            }
        }

        tracing::debug!(
            diffs = diff.diffs.len(),
            text_changed,
            "diffed rich texts"
        );
        diff
    }

    /// True when there is nothing to animate at all
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty() && !self.text_changed
    }

    fn push(
        &mut self,
        kind: AttributeKind,
        range: Range<usize>,
        from: Option<&AttributeValue>,
        to: Option<&AttributeValue>,
    ) {
        let codec_capable = [from, to]
            .into_iter()
            .flatten()
            .any(|value| codec::value_matches(kind, value));

        if codec_capable {
            let from_encoded = codec::encode(kind, from).unwrap_or_default();
            let to_encoded = codec::encode(kind, to).unwrap_or_default();
            self.seeds
                .push((kind, range.clone(), StateEntry::Encoded(from_encoded.clone())));
            let mut prefix = Vec::new();
            field_diffs(&from_encoded, &to_encoded, &mut prefix, &mut |path, from, to| {
                self.diffs.push(AttributeDiff {
                    kind,
                    range: range.clone(),
                    path,
                    from,
                    to,
                });
            });
        } else {
            self.seeds
                .push((kind, range.clone(), StateEntry::Raw(from.cloned())));
            self.diffs.push(AttributeDiff {
                kind,
                range,
                path: Vec::new(),
                from: from.map(|value| TweenValue::Value(value.clone())),
                to: to.map(|value| TweenValue::Value(value.clone())),
            });
        }
    }
}

fn orient<'a>(
    swapped: bool,
    longer: Option<&'a AttributeValue>,
    shorter: Option<&'a AttributeValue>,
) -> (Option<&'a AttributeValue>, Option<&'a AttributeValue>) {
    if swapped {
        (shorter, longer)
    } else {
        (longer, shorter)
    }
}

fn values_differ(a: Option<&AttributeValue>, b: Option<&AttributeValue>) -> bool {
    (a.is_some() || b.is_some()) && a != b
}

/// Recursively emit leaf differences over the union of both field sets.
///
/// A key absent on both sides is no change; a nested map missing on one
/// side diffs against an empty map.
fn field_diffs(
    left: &EncodedAttribute,
    right: &EncodedAttribute,
    prefix: &mut Vec<String>,
    emit: &mut impl FnMut(Vec<String>, Option<TweenValue>, Option<TweenValue>),
) {
    let mut keys: Vec<&str> = left.keys().collect();
    for key in right.keys() {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    let empty = EncodedAttribute::new();
    for key in keys {
        let from = left.get(key);
        let to = right.get(key);
        if from == to {
            continue;
        }
        match (from, to) {
            (Some(FieldValue::Nested(from_nested)), Some(FieldValue::Nested(to_nested))) => {
                prefix.push(key.to_string());
                field_diffs(from_nested, to_nested, prefix, emit);
                prefix.pop();
            }
            (Some(FieldValue::Nested(from_nested)), _) => {
                prefix.push(key.to_string());
                field_diffs(from_nested, &empty, prefix, emit);
                prefix.pop();
            }
            (_, Some(FieldValue::Nested(to_nested))) => {
                prefix.push(key.to_string());
                field_diffs(&empty, to_nested, prefix, emit);
                prefix.pop();
            }
            _ => {
                let mut path = prefix.clone();
                path.push(key.to_string());
                emit(path, from.and_then(leaf), to.and_then(leaf));
            }
        }
    }
}

fn leaf(field: &FieldValue) -> Option<TweenValue> {
    match field {
        FieldValue::Number(number) => Some(TweenValue::Number(*number)),
        FieldValue::Text(text) => Some(TweenValue::Text(text.clone())),
        FieldValue::Nested(_) => None,
    }
}
