//! Textmorph Animation Engine
//!
//! Morphs one rich text into another by animating the differences
//! instead of cross-fading bitmaps:
//!
//! - **Attribute Codec**: breaks structured attribute values (fonts,
//!   colors, paragraph styles, shadows) into flat field maps so fields
//!   interpolate independently
//! - **Diff Engine**: range-aware, field-level diff of two rich texts
//! - **Timeline**: timed sub-animations on one shared clock - a
//!   three-phase alpha cross-fade when the string changes, plus
//!   full-window property tweens for attribute changes
//! - **Interpolation State**: the live field values of one running
//!   animation, updated every frame
//! - **Snapshot Reconstruction**: rebuilds a drawable rich text from the
//!   base text and the live state at any point in the animation
//!
//! All of it runs synchronously on the caller's thread; the host
//! animation clock drives progress through [`TextAnimation::advance`].
//!
//! # Example
//!
//! ```rust
//! use textmorph_animation::{Easing, TextAnimation};
//! use textmorph_core::{AttributeKind, Color, RichText};
//!
//! let from = RichText::styled("Hi", AttributeKind::ForegroundColor, Color::RED.into());
//! let to = RichText::styled("Hi", AttributeKind::ForegroundColor, Color::BLUE.into());
//!
//! let mut animation = TextAnimation::new(from, to, 2.0, Easing::Linear).unwrap();
//! animation.advance(1.0);
//!
//! let snapshot = animation.interpolated_to_text().unwrap();
//! let color = snapshot
//!     .value_at(AttributeKind::ForegroundColor, 0)
//!     .and_then(|value| value.as_color().copied())
//!     .unwrap();
//! assert!((color.r - 0.5).abs() < 1e-4);
//! ```

pub mod animation;
pub mod codec;
pub mod diff;
pub mod easing;
pub mod snapshot;
pub mod state;
pub mod timeline;

pub use animation::TextAnimation;
pub use codec::{decode, encode, value_matches, EncodedAttribute, FieldValue};
pub use diff::{AttributeDiff, TextDiff, TweenValue};
pub use easing::Easing;
pub use snapshot::reconstruct;
pub use state::{InterpolationState, StateEntry};
pub use timeline::{AnimationTarget, SubAnimation, Timeline, ALPHA_SWAP_MAX_DURATION};
