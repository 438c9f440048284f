//! Rendering backend seam
//!
//! The engine never rasterizes text itself. The host supplies an
//! implementation of [`TextBackend`] - typically wrapping its text
//! layout and paint stack - and the label hands it fully resolved rich
//! text snapshots each frame.

use textmorph_core::{Rect, RichText, Size};

/// Per-draw parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawOptions {
    /// Opacity the whole rendering is composited with
    pub alpha: f32,
    /// Truncate the last visible line instead of clipping mid-glyph
    pub truncate_last_line: bool,
}

impl DrawOptions {
    pub fn with_alpha(alpha: f32) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            truncate_last_line: true,
        }
    }
}

/// Measures and draws rich text.
///
/// Both operations are synchronous and must not call back into the
/// label. `measure` is side-effect free; `draw`'s only effect is pixels.
pub trait TextBackend {
    /// Size the text occupies when laid out within `max_width`
    fn measure(&self, text: &RichText, max_width: f32) -> Size;

    /// Rasterize the text into `rect`
    fn draw(&mut self, text: &RichText, rect: Rect, options: &DrawOptions);
}
