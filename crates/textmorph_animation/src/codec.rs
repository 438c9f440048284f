//! Attribute codec
//!
//! Converts structured attribute values into flat field maps of
//! primitives so the diff engine can compare them field by field and the
//! timeline can tween each field independently. Decoding is total:
//! missing numeric fields read as 0, a missing color reads as
//! transparent, and a font missing either field falls back to the body
//! font.
//!
//! Kinds without a codec (kerning, links, attachments and the like) never
//! pass through here; their values are compared whole, by equality.

use indexmap::IndexMap;
use textmorph_core::{
    AttributeKind, AttributeValue, Color, FontDesc, FontWeight, LineBreakMode, ParagraphStyle,
    TextAlign, TextShadow, WritingDirection,
};

/// One field of an encoded attribute
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Number(f32),
    Text(String),
    Nested(EncodedAttribute),
}

/// Flat field-map representation of a structured attribute value.
///
/// Field order is the codec's insertion order, which keeps every walk
/// over the fields deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EncodedAttribute {
    fields: IndexMap<String, FieldValue>,
}

impl EncodedAttribute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn insert_number(&mut self, name: impl Into<String>, value: f32) {
        self.insert(name, FieldValue::Number(value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f32> {
        match self.get(name) {
            Some(FieldValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn nested(&self, name: &str) -> Option<&EncodedAttribute> {
        match self.get(name) {
            Some(FieldValue::Nested(nested)) => Some(nested),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value at a nested field path
    pub fn get_path(&self, path: &[String]) -> Option<&FieldValue> {
        let (first, rest) = path.split_first()?;
        let field = self.get(first)?;
        if rest.is_empty() {
            return Some(field);
        }
        match field {
            FieldValue::Nested(nested) => nested.get_path(rest),
            _ => None,
        }
    }

    /// Write (or remove, when `value` is `None`) the field at a nested
    /// path, creating intermediate nested maps as needed.
    pub fn set_path(&mut self, path: &[String], value: Option<FieldValue>) {
        let Some((first, rest)) = path.split_first() else {
            return;
        };
        if rest.is_empty() {
            match value {
                Some(value) => self.insert(first.clone(), value),
                None => {
                    self.fields.shift_remove(first);
                }
            }
            return;
        }
        let entry = self
            .fields
            .entry(first.clone())
            .or_insert_with(|| FieldValue::Nested(EncodedAttribute::new()));
        if !matches!(entry, FieldValue::Nested(_)) {
            *entry = FieldValue::Nested(EncodedAttribute::new());
        }
        if let FieldValue::Nested(nested) = entry {
            nested.set_path(rest, value);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Codec {
    Font,
    Color,
    Paragraph,
    Shadow,
}

fn codec_for(kind: AttributeKind) -> Option<Codec> {
    match kind {
        AttributeKind::Font => Some(Codec::Font),
        AttributeKind::ForegroundColor
        | AttributeKind::BackgroundColor
        | AttributeKind::StrokeColor
        | AttributeKind::UnderlineColor
        | AttributeKind::StrikethroughColor => Some(Codec::Color),
        AttributeKind::ParagraphStyle => Some(Codec::Paragraph),
        AttributeKind::Shadow => Some(Codec::Shadow),
        _ => None,
    }
}

/// Whether `value` is the structured type this kind's codec expects.
///
/// A mismatch on both sides of a diff makes the diff fall back to whole
/// opaque-value comparison.
pub fn value_matches(kind: AttributeKind, value: &AttributeValue) -> bool {
    match codec_for(kind) {
        Some(Codec::Font) => matches!(value, AttributeValue::Font(_)),
        Some(Codec::Color) => matches!(value, AttributeValue::Color(_)),
        Some(Codec::Paragraph) => matches!(value, AttributeValue::Paragraph(_)),
        Some(Codec::Shadow) => matches!(value, AttributeValue::Shadow(_)),
        None => false,
    }
}

/// Encode an attribute value for a codec-aware kind.
///
/// Returns `None` when the kind has no codec. An absent or mismatched
/// value encodes to the kind's default so both sides of a diff always
/// have a complete field set.
pub fn encode(kind: AttributeKind, value: Option<&AttributeValue>) -> Option<EncodedAttribute> {
    let codec = codec_for(kind)?;
    Some(match codec {
        Codec::Font => {
            let font = value
                .and_then(AttributeValue::as_font)
                .copied()
                .unwrap_or_default();
            encode_font(&font)
        }
        Codec::Color => {
            let color = value
                .and_then(AttributeValue::as_color)
                .copied()
                .unwrap_or(Color::TRANSPARENT);
            encode_color(&color)
        }
        Codec::Paragraph => {
            let style = value
                .and_then(AttributeValue::as_paragraph)
                .copied()
                .unwrap_or_default();
            encode_paragraph(&style)
        }
        Codec::Shadow => {
            let shadow = value
                .and_then(AttributeValue::as_shadow)
                .copied()
                .unwrap_or_default();
            encode_shadow(&shadow)
        }
    })
}

/// Decode an encoded attribute back into a value.
///
/// Returns `None` when the kind has no codec; never fails for a kind
/// that has one - missing fields take their documented defaults.
pub fn decode(kind: AttributeKind, encoded: &EncodedAttribute) -> Option<AttributeValue> {
    let codec = codec_for(kind)?;
    Some(match codec {
        Codec::Font => AttributeValue::Font(decode_font(encoded)),
        Codec::Color => AttributeValue::Color(decode_color(encoded)),
        Codec::Paragraph => AttributeValue::Paragraph(decode_paragraph(encoded)),
        Codec::Shadow => AttributeValue::Shadow(decode_shadow(encoded)),
    })
}

fn encode_font(font: &FontDesc) -> EncodedAttribute {
    let mut encoded = EncodedAttribute::new();
    encoded.insert_number("point_size", font.point_size);
    encoded.insert_number("weight", font.weight.value());
    encoded
}

fn decode_font(encoded: &EncodedAttribute) -> FontDesc {
    match (encoded.number("point_size"), encoded.number("weight")) {
        (Some(point_size), Some(weight)) => {
            FontDesc::new(point_size, FontWeight::from_value(weight))
        }
        _ => FontDesc::body(),
    }
}

fn encode_color(color: &Color) -> EncodedAttribute {
    let mut encoded = EncodedAttribute::new();
    encoded.insert_number("r", color.r);
    encoded.insert_number("g", color.g);
    encoded.insert_number("b", color.b);
    encoded.insert_number("a", color.a);
    encoded
}

fn decode_color(encoded: &EncodedAttribute) -> Color {
    Color::rgba(
        encoded.number("r").unwrap_or(0.0),
        encoded.number("g").unwrap_or(0.0),
        encoded.number("b").unwrap_or(0.0),
        encoded.number("a").unwrap_or(0.0),
    )
}

fn encode_paragraph(style: &ParagraphStyle) -> EncodedAttribute {
    let mut encoded = EncodedAttribute::new();
    encoded.insert_number("line_spacing", style.line_spacing);
    encoded.insert_number("paragraph_spacing", style.paragraph_spacing);
    encoded.insert_number("alignment", align_index(style.alignment));
    encoded.insert_number("head_indent", style.head_indent);
    encoded.insert_number("tail_indent", style.tail_indent);
    encoded.insert_number("first_line_head_indent", style.first_line_head_indent);
    encoded.insert_number("minimum_line_height", style.minimum_line_height);
    encoded.insert_number("maximum_line_height", style.maximum_line_height);
    encoded.insert_number("line_break_mode", line_break_index(style.line_break_mode));
    encoded.insert_number(
        "base_writing_direction",
        writing_direction_index(style.base_writing_direction),
    );
    encoded.insert_number("line_height_multiple", style.line_height_multiple);
    encoded.insert_number("paragraph_spacing_before", style.paragraph_spacing_before);
    encoded.insert_number("hyphenation_factor", style.hyphenation_factor);
    encoded.insert_number("default_tab_interval", style.default_tab_interval);
    encoded.insert_number(
        "allows_tightening",
        if style.allows_tightening { 1.0 } else { 0.0 },
    );
    encoded
}

fn decode_paragraph(encoded: &EncodedAttribute) -> ParagraphStyle {
    let number = |name: &str| encoded.number(name).unwrap_or(0.0);
    ParagraphStyle {
        line_spacing: number("line_spacing"),
        paragraph_spacing: number("paragraph_spacing"),
        alignment: align_from_index(number("alignment")),
        head_indent: number("head_indent"),
        tail_indent: number("tail_indent"),
        first_line_head_indent: number("first_line_head_indent"),
        minimum_line_height: number("minimum_line_height"),
        maximum_line_height: number("maximum_line_height"),
        line_break_mode: line_break_from_index(number("line_break_mode")),
        base_writing_direction: writing_direction_from_index(number("base_writing_direction")),
        line_height_multiple: number("line_height_multiple"),
        paragraph_spacing_before: number("paragraph_spacing_before"),
        hyphenation_factor: number("hyphenation_factor"),
        default_tab_interval: number("default_tab_interval"),
        allows_tightening: number("allows_tightening") >= 0.5,
    }
}

fn encode_shadow(shadow: &TextShadow) -> EncodedAttribute {
    let mut encoded = EncodedAttribute::new();
    encoded.insert_number("offset_x", shadow.offset_x);
    encoded.insert_number("offset_y", shadow.offset_y);
    encoded.insert_number("blur_radius", shadow.blur_radius);
    encoded.insert("color", FieldValue::Nested(encode_color(&shadow.color)));
    encoded
}

fn decode_shadow(encoded: &EncodedAttribute) -> TextShadow {
    let color = encoded
        .nested("color")
        .map(decode_color)
        .unwrap_or(Color::TRANSPARENT);
    TextShadow::new(
        encoded.number("offset_x").unwrap_or(0.0),
        encoded.number("offset_y").unwrap_or(0.0),
        encoded.number("blur_radius").unwrap_or(0.0),
        color,
    )
}

// Interpolated enum fields arrive as fractional numbers; decoding rounds
// to the nearest variant index.

fn align_index(align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => 1.0,
        TextAlign::Right => 2.0,
        TextAlign::Justified => 3.0,
    }
}

fn align_from_index(index: f32) -> TextAlign {
    match index.round() as i64 {
        1 => TextAlign::Center,
        2 => TextAlign::Right,
        3 => TextAlign::Justified,
        _ => TextAlign::Left,
    }
}

fn line_break_index(mode: LineBreakMode) -> f32 {
    match mode {
        LineBreakMode::WordWrap => 0.0,
        LineBreakMode::CharWrap => 1.0,
        LineBreakMode::Clip => 2.0,
        LineBreakMode::TruncateHead => 3.0,
        LineBreakMode::TruncateTail => 4.0,
        LineBreakMode::TruncateMiddle => 5.0,
    }
}

fn line_break_from_index(index: f32) -> LineBreakMode {
    match index.round() as i64 {
        1 => LineBreakMode::CharWrap,
        2 => LineBreakMode::Clip,
        3 => LineBreakMode::TruncateHead,
        4 => LineBreakMode::TruncateTail,
        5 => LineBreakMode::TruncateMiddle,
        _ => LineBreakMode::WordWrap,
    }
}

fn writing_direction_index(direction: WritingDirection) -> f32 {
    match direction {
        WritingDirection::Natural => 0.0,
        WritingDirection::LeftToRight => 1.0,
        WritingDirection::RightToLeft => 2.0,
    }
}

fn writing_direction_from_index(index: f32) -> WritingDirection {
    match index.round() as i64 {
        1 => WritingDirection::LeftToRight,
        2 => WritingDirection::RightToLeft,
        _ => WritingDirection::Natural,
    }
}
