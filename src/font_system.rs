use std::path::PathBuf;

use parking_lot::Mutex;

use crate::{
    canvas::TextMeasure,
    font_storage::FontStorage,
    style::Font,
    text::{RenderConfig, TextContent, TextLayout, layout_text},
};

/// Pixel size used for every class by [`FontSystem::bind_default_faces`].
pub const DEFAULT_FONT_SIZE: f32 = 20.0;

/// Shared entry point for measuring and laying out text with real fonts.
///
/// Measuring goes through `&self`, so the storage sits behind a `Mutex`; a
/// window framework can hand the same system to every screen.
///
/// The field is public to allow batching several calls under one lock.
pub struct FontSystem {
    /// The underlying font storage.
    pub font_storage: Mutex<FontStorage>,
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSystem {
    pub fn new() -> Self {
        Self {
            font_storage: Mutex::new(FontStorage::new()),
        }
    }
}

/// font storage initialization
impl FontSystem {
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.font_storage.lock().load_font_binary(data);
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_storage.lock().load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: PathBuf) {
        self.font_storage.lock().load_fonts_dir(dir)
    }

    pub fn bind(&self, font: Font, query: &fontdb::Query, size: f32) -> Option<fontdb::ID> {
        self.font_storage.lock().bind(font, query, size)
    }

    /// Binds sans-serif regular, sans-serif bold and monospace faces.
    ///
    /// Returns `true` only if all three classes got a face.
    pub fn bind_default_faces(&self, size: f32) -> bool {
        let sans = [fontdb::Family::SansSerif];
        let mono = [fontdb::Family::Monospace];
        let queries = [
            (Font::Normal, &sans, fontdb::Weight::NORMAL),
            (Font::Bold, &sans, fontdb::Weight::BOLD),
            (Font::Mono, &mono, fontdb::Weight::NORMAL),
        ];

        let mut storage = self.font_storage.lock();
        let mut all_bound = true;
        for (font, families, weight) in queries {
            let query = fontdb::Query {
                families,
                weight,
                ..fontdb::Query::default()
            };
            if storage.bind(font, &query, size).is_none() {
                log::warn!("No face found for font class {font:?}.");
                all_bound = false;
            }
        }
        all_bound
    }
}

/// text layout
impl FontSystem {
    /// Lays out `content` with its own `max_lines`, without drawing.
    pub fn layout(&self, content: &TextContent, config: &RenderConfig) -> TextLayout {
        let config = config.clone().with_max_lines(content.max_lines);
        layout_text(content.tokens(), &config, self)
    }
}

impl TextMeasure for FontSystem {
    fn text_width(&self, text: &str, font: Font) -> i32 {
        self.font_storage.lock().text_width(text, font)
    }
}
