//! Attribute kinds and values
//!
//! The closed set of per-range text attributes the morphing engine
//! understands, and the tagged union of values they carry.

use crate::geometry::Color;
use crate::style::{FontDesc, ParagraphStyle, TextShadow};

/// A stylable per-range text property.
///
/// The set is closed. `ALL` fixes the iteration order used everywhere an
/// attribute walk must be deterministic (diffing, state iteration,
/// snapshot reconstruction).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Font,
    ForegroundColor,
    ParagraphStyle,
    BackgroundColor,
    StrokeColor,
    StrokeWidth,
    Ligature,
    Kerning,
    StrikethroughStyle,
    UnderlineStyle,
    TextEffect,
    Attachment,
    Shadow,
    Link,
    BaselineOffset,
    UnderlineColor,
    StrikethroughColor,
    Obliqueness,
    Expansion,
    WritingDirection,
    VerticalGlyphForm,
}

impl AttributeKind {
    /// Every attribute kind, in canonical order
    pub const ALL: [AttributeKind; 21] = [
        AttributeKind::Font,
        AttributeKind::ForegroundColor,
        AttributeKind::ParagraphStyle,
        AttributeKind::BackgroundColor,
        AttributeKind::StrokeColor,
        AttributeKind::StrokeWidth,
        AttributeKind::Ligature,
        AttributeKind::Kerning,
        AttributeKind::StrikethroughStyle,
        AttributeKind::UnderlineStyle,
        AttributeKind::TextEffect,
        AttributeKind::Attachment,
        AttributeKind::Shadow,
        AttributeKind::Link,
        AttributeKind::BaselineOffset,
        AttributeKind::UnderlineColor,
        AttributeKind::StrikethroughColor,
        AttributeKind::Obliqueness,
        AttributeKind::Expansion,
        AttributeKind::WritingDirection,
        AttributeKind::VerticalGlyphForm,
    ];
}

/// The value carried by one attribute span.
///
/// A closed tagged union over the heterogeneous value types: structured
/// values (font, color, paragraph style, shadow) that the codec can break
/// into fields, and scalar/opaque values compared only by equality.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Font(FontDesc),
    Color(Color),
    Paragraph(ParagraphStyle),
    Shadow(TextShadow),
    Number(f32),
    Text(String),
}

impl AttributeValue {
    pub fn as_font(&self) -> Option<&FontDesc> {
        match self {
            Self::Font(font) => Some(font),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Self::Color(color) => Some(color),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&ParagraphStyle> {
        match self {
            Self::Paragraph(style) => Some(style),
            _ => None,
        }
    }

    pub fn as_shadow(&self) -> Option<&TextShadow> {
        match self {
            Self::Shadow(shadow) => Some(shadow),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<FontDesc> for AttributeValue {
    fn from(font: FontDesc) -> Self {
        Self::Font(font)
    }
}

impl From<Color> for AttributeValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<ParagraphStyle> for AttributeValue {
    fn from(style: ParagraphStyle) -> Self {
        Self::Paragraph(style)
    }
}

impl From<TextShadow> for AttributeValue {
    fn from(shadow: TextShadow) -> Self {
        Self::Shadow(shadow)
    }
}

impl From<f32> for AttributeValue {
    fn from(number: f32) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
