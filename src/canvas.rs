use euclid::default::Point2D;

use crate::style::{Color, Font};

/// Pixel-width measurement for a font class.
///
/// Implementations must be pure: the same text and font always yield the same
/// non-negative width.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: Font) -> i32;
}

/// A surface that can draw a string with its baseline at `(x, y)`.
///
/// Drawing outside the physical surface must clip or do nothing.
pub trait TextCanvas: TextMeasure {
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: Font, fg: Color, bg: Color);
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn text_width(&self, text: &str, font: Font) -> i32 {
        (**self).text_width(text, font)
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for &mut M {
    fn text_width(&self, text: &str, font: Font) -> i32 {
        (**self).text_width(text, font)
    }
}

impl<C: TextCanvas + ?Sized> TextCanvas for &mut C {
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: Font, fg: Color, bg: Color) {
        (**self).draw_text(x, y, text, font, fg, bg)
    }
}

/// A single positioned draw call.
///
/// **Y is the baseline**, matching what [`TextCanvas::draw_text`] receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRun {
    pub origin: Point2D<i32>,
    pub text: String,
    pub font: Font,
    pub fg: Color,
    pub bg: Color,
}

/// Canvas that remembers every draw call instead of painting pixels.
///
/// Measuring is forwarded to the wrapped measurer, so a layout pass through a
/// recording canvas places runs exactly where a real display would.
pub struct RecordingCanvas<M> {
    measure: M,
    runs: Vec<GlyphRun>,
}

impl<M: TextMeasure> RecordingCanvas<M> {
    pub fn new(measure: M) -> Self {
        Self {
            measure,
            runs: Vec::new(),
        }
    }

    /// Runs recorded so far, in draw order.
    pub fn runs(&self) -> &[GlyphRun] {
        &self.runs
    }

    pub fn into_runs(self) -> Vec<GlyphRun> {
        self.runs
    }
}

impl<M: TextMeasure> TextMeasure for RecordingCanvas<M> {
    fn text_width(&self, text: &str, font: Font) -> i32 {
        self.measure.text_width(text, font)
    }
}

impl<M: TextMeasure> TextCanvas for RecordingCanvas<M> {
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: Font, fg: Color, bg: Color) {
        self.runs.push(GlyphRun {
            origin: Point2D::new(x, y),
            text: text.to_owned(),
            font,
            fg,
            bg,
        });
    }
}
