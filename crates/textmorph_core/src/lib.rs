//! Textmorph Core
//!
//! This crate provides the data model shared by the Textmorph crates:
//!
//! - **Rich Text**: a string plus per-range style attributes, with run
//!   enumeration and span algebra
//! - **Attribute Kinds**: the closed set of stylable properties a text
//!   range can carry
//! - **Styling Values**: fonts, colors, paragraph styles, and shadows
//! - **Geometry**: points, sizes, rects, and edge insets
//!
//! # Example
//!
//! ```rust
//! use textmorph_core::{AttributeKind, AttributeValue, Color, RichText};
//!
//! let mut text = RichText::new("Hello");
//! text.set_attribute(
//!     AttributeKind::ForegroundColor,
//!     0..5,
//!     AttributeValue::Color(Color::RED),
//! )
//! .unwrap();
//!
//! assert_eq!(text.runs(AttributeKind::ForegroundColor).len(), 1);
//! ```

pub mod attr;
pub mod geometry;
pub mod rich_text;
pub mod style;

pub use attr::{AttributeKind, AttributeValue};
pub use geometry::{Color, Insets, Point, Rect, Size};
pub use rich_text::{floor_char_boundary, RichText, TextError};
pub use style::{
    FontDesc, FontWeight, LineBreakMode, ParagraphStyle, TextAlign, TextShadow, WritingDirection,
};
