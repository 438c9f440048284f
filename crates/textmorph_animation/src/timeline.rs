//! Animation timeline
//!
//! Turns a text diff into timed sub-animations on one shared clock. A
//! string change produces a three-phase alpha chain per side
//! (persist, swap, persist) whose swap windows coincide; every attribute
//! diff becomes a property tween spanning the whole duration. Sampling
//! is pure: the same time always yields the same values.

use std::ops::Range;

use smallvec::SmallVec;
use textmorph_core::AttributeKind;

use crate::diff::{TextDiff, TweenValue};
use crate::easing::Easing;

/// Upper bound on the alpha swap window, in seconds
pub const ALPHA_SWAP_MAX_DURATION: f32 = 1.0;

/// What a sub-animation drives
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationTarget {
    /// Opacity of the outgoing text rendering
    FromAlpha,
    /// Opacity of the incoming text rendering
    ToAlpha,
    /// One field of one attribute over one range
    Field {
        kind: AttributeKind,
        range: Range<usize>,
        /// Path into the encoded field map; empty for opaque values
        path: Vec<String>,
    },
}

/// One timed tween within a timeline
#[derive(Clone, Debug)]
pub struct SubAnimation {
    pub target: AnimationTarget,
    pub from: Option<TweenValue>,
    pub to: Option<TweenValue>,
    /// Start offset from the timeline's origin, in seconds
    pub begin: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl SubAnimation {
    pub fn end(&self) -> f32 {
        self.begin + self.duration
    }

    /// Sampled value at absolute timeline time `t`.
    ///
    /// Progress clamps to the sub-animation's window, so times before
    /// `begin` yield the "from" endpoint and times past `end()` the "to"
    /// endpoint.
    pub fn value_at(&self, t: f32) -> Option<TweenValue> {
        let local = if self.duration <= 0.0 {
            1.0
        } else {
            ((t - self.begin) / self.duration).clamp(0.0, 1.0)
        };
        TweenValue::interpolate(self.from.as_ref(), self.to.as_ref(), self.easing.apply(local))
    }
}

/// The set of sub-animations for one text change.
///
/// Entries for one target are ordered chronologically; when several have
/// begun at a given time, the latest begun one governs. A timeline with
/// zero duration is the immediate-apply timeline: it has no entries and
/// consumers show the end state directly.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: SmallVec<[SubAnimation; 8]>,
    duration: f32,
}

impl Timeline {
    /// The no-op timeline for non-positive durations
    pub fn immediate() -> Self {
        Self::default()
    }

    /// Build the timeline for a diff over a shared total duration.
    ///
    /// Every emitted sub-animation fits the total window:
    /// `begin + duration <= total_duration`.
    pub fn build(diff: &TextDiff, total_duration: f32, easing: Easing) -> Self {
        if total_duration <= 0.0 {
            tracing::debug!("non-positive duration, applying end state immediately");
            return Self::immediate();
        }

        let mut entries = SmallVec::new();
        if diff.text_changed {
            let swap = ALPHA_SWAP_MAX_DURATION.min(0.5 * total_duration);
            let persist = (total_duration - swap) / 2.0;
            alpha_chain(&mut entries, AnimationTarget::FromAlpha, 1.0, 0.0, persist, swap, easing);
            alpha_chain(&mut entries, AnimationTarget::ToAlpha, 0.0, 1.0, persist, swap, easing);
        }

        for change in &diff.diffs {
            entries.push(SubAnimation {
                target: AnimationTarget::Field {
                    kind: change.kind,
                    range: change.range.clone(),
                    path: change.path.clone(),
                },
                from: change.from.clone(),
                to: change.to.clone(),
                begin: 0.0,
                duration: total_duration,
                easing,
            });
        }

        tracing::debug!(
            entries = entries.len(),
            duration = total_duration,
            cross_fade = diff.text_changed,
            "built timeline"
        );
        Self {
            entries,
            duration: total_duration,
        }
    }

    pub fn entries(&self) -> &[SubAnimation] {
        &self.entries
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Whether this is the immediate-apply timeline
    pub fn is_immediate(&self) -> bool {
        self.duration <= 0.0
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Push the persist/swap/persist chain for one alpha channel.
///
/// The persist segments hold a constant value, so they stay linear; the
/// swap segment carries the transaction's easing.
fn alpha_chain(
    entries: &mut SmallVec<[SubAnimation; 8]>,
    target: AnimationTarget,
    from: f32,
    to: f32,
    persist: f32,
    swap: f32,
    easing: Easing,
) {
    let number = |value: f32| Some(TweenValue::Number(value));
    entries.push(SubAnimation {
        target: target.clone(),
        from: number(from),
        to: number(from),
        begin: 0.0,
        duration: persist,
        easing: Easing::Linear,
    });
    entries.push(SubAnimation {
        target: target.clone(),
        from: number(from),
        to: number(to),
        begin: persist,
        duration: swap,
        easing,
    });
    entries.push(SubAnimation {
        target,
        from: number(to),
        to: number(to),
        begin: persist + swap,
        duration: persist,
        easing: Easing::Linear,
    });
}
