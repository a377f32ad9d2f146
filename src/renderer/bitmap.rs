use euclid::default::{Box2D, Point2D};

use crate::{
    canvas::{TextCanvas, TextMeasure},
    font_system::FontSystem,
    style::{Color, Font},
};

/// RGB565 frame buffer standing in for the panel's memory.
///
/// Pixels are arranged in row-major order with the origin at the top-left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width.saturating_mul(height)],
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn bounds(&self) -> Box2D<i32> {
        Box2D::new(
            Point2D::zero(),
            Point2D::new(self.width as i32, self.height as i32),
        )
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(Point2D::new(x, y)).map(|idx| self.pixels[idx])
    }

    /// Writes a pixel; coordinates outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(Point2D::new(x, y)) {
            self.pixels[idx] = color;
        }
    }

    fn index(&self, point: Point2D<i32>) -> Option<usize> {
        self.bounds()
            .contains(point)
            .then(|| point.y as usize * self.width + point.x as usize)
    }

    /// Expands to packed 8-bit RGB, e.g. for saving a screenshot.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|color| color.to_rgb()).collect()
    }
}

/// [`TextCanvas`] that rasterizes with the faces bound in a [`FontSystem`].
///
/// Glyph coverage is blended between the foreground and background colors;
/// pixels without coverage are left untouched.
pub struct BitmapCanvas<'a> {
    system: &'a FontSystem,
    target: &'a mut Framebuffer,
}

impl<'a> BitmapCanvas<'a> {
    pub fn new(system: &'a FontSystem, target: &'a mut Framebuffer) -> Self {
        Self { system, target }
    }
}

impl TextMeasure for BitmapCanvas<'_> {
    fn text_width(&self, text: &str, font: Font) -> i32 {
        self.system.text_width(text, font)
    }
}

impl TextCanvas for BitmapCanvas<'_> {
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: Font, fg: Color, bg: Color) {
        let Some((face, size)) = self.system.font_storage.lock().resolve(font) else {
            return;
        };

        let mut pen_x = x as f32;
        let mut prev: Option<u16> = None;
        for ch in text.chars() {
            let glyph_idx = face.lookup_glyph_index(ch);
            if let Some(prev) = prev {
                pen_x += face
                    .horizontal_kern_indexed(prev, glyph_idx, size)
                    .unwrap_or(0.0);
            }

            let (metrics, coverage) = face.rasterize_indexed(glyph_idx, size);
            // fontdue reports the bitmap relative to the baseline, Y up
            let origin_x = (pen_x + metrics.xmin as f32).round() as i32;
            let origin_y = y - metrics.ymin - metrics.height as i32;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let alpha = coverage[row * metrics.width + col];
                    if alpha == 0 {
                        continue;
                    }
                    let px = origin_x + col as i32;
                    let py = origin_y + row as i32;
                    self.target.set_pixel(px, py, Color::blend(fg, bg, alpha));
                }
            }

            pen_x += metrics.advance_width;
            prev = Some(glyph_idx);
        }
    }
}
