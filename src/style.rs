/// One of the three font classes the panel firmware ships.
///
/// A class is resolved to a concrete face and pixel size by whatever
/// implements [`TextMeasure`](crate::canvas::TextMeasure); the layout code only
/// ever switches between classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Font {
    #[default]
    Normal,
    Bold,
    Mono,
}

/// RGB565 color, the native pixel format of the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    pub const GREY: Self = Self::rgb(0x9E, 0x9E, 0x9E);
    pub const RED: Self = Self::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Self = Self::rgb(0x00, 0xAE, 0x0B);
    pub const ORANGE: Self = Self::rgb(0xF5, 0x7C, 0x00);
    pub const BLUE: Self = Self::rgb(0x21, 0x96, 0xF3);

    /// Packs 8-bit channels, dropping the low bits RGB565 cannot hold.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }

    /// Expands back to 8-bit channels.
    pub const fn to_rgb(self) -> [u8; 3] {
        let r = ((self.0 >> 11) & 0x1F) as u8;
        let g = ((self.0 >> 5) & 0x3F) as u8;
        let b = (self.0 & 0x1F) as u8;
        [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
    }

    /// Mixes `fg` over `bg` by glyph coverage (`0` keeps `bg`, `255` gives `fg`).
    pub fn blend(fg: Color, bg: Color, coverage: u8) -> Color {
        match coverage {
            0 => bg,
            255 => fg,
            alpha => {
                let [fr, fg_, fb] = fg.to_rgb();
                let [br, bg_, bb] = bg.to_rgb();
                let mix = |f: u8, b: u8| -> u8 {
                    let a = alpha as u32;
                    ((f as u32 * a + b as u32 * (255 - a) + 127) / 255) as u8
                };
                Color::rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
            }
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
