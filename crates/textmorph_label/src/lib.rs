//! Textmorph Label
//!
//! The label-facing driver around the morphing engine:
//!
//! - **MorphLabel**: owns the committed text and the running animation,
//!   builds a new morph on every text change, and draws both sides
//!   through their alphas
//! - **TextBackend**: the pluggable measure/draw seam the host's
//!   renderer implements
//! - **Transaction**: the host clock's duration and easing for one
//!   change
//! - **BoundsTransition**: tweens the drawing rect when the label
//!   resizes inside an animated transaction
//!
//! # Example
//!
//! ```rust,ignore
//! use textmorph_label::{MorphLabel, Transaction};
//! use textmorph_core::{AttributeKind, Color, RichText};
//!
//! let mut label = MorphLabel::new();
//! label.set_text(
//!     Some(RichText::styled("Hi", AttributeKind::ForegroundColor, Color::RED.into())),
//!     Transaction::immediate(),
//! );
//! label.set_text(
//!     Some(RichText::styled("Hi", AttributeKind::ForegroundColor, Color::BLUE.into())),
//!     Transaction::new(0.3, Easing::EaseInEaseOut),
//! );
//! // each frame:
//! label.tick(dt);
//! label.draw(&mut backend);
//! ```

pub mod backend;
pub mod bounds;
pub mod label;
pub mod transaction;

pub use backend::{DrawOptions, TextBackend};
pub use bounds::BoundsTransition;
pub use label::MorphLabel;
pub use transaction::Transaction;

pub use textmorph_animation::Easing;
