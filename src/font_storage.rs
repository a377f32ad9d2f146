use std::{collections::HashMap, path::PathBuf, sync::Arc};

use fxhash::FxBuildHasher;

use crate::style::Font;

/// Concrete face and pixel size a [`Font`] class renders with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBinding {
    pub id: fontdb::ID,
    pub size: f32,
}

#[derive(Clone, Copy, Debug)]
struct CachedGlyph {
    index: u16,
    advance: f32,
}

/// Font faces backing the three font classes.
///
/// Faces are registered in a `fontdb` database and parsed with `fontdue` the
/// first time a bound class is measured or drawn. Advances are cached per
/// class and character since the same handful of glyphs is measured over and
/// over during wrapping.
pub struct FontStorage {
    /// This is the font set that has been loaded by fontdb.
    font_db: fontdb::Database,
    /// Faces parsed by fontdue, a subset of `font_db`.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, FxBuildHasher>,
    bindings: [Option<FaceBinding>; 3],
    glyphs: HashMap<(Font, char), CachedGlyph, FxBuildHasher>,
    warned_unbound: [bool; 3],
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(FxBuildHasher::default()),
            bindings: [None; 3],
            glyphs: HashMap::with_hasher(FxBuildHasher::default()),
            warned_unbound: [false; 3],
        }
    }
}

/// Loading fonts into fontdb.
impl FontStorage {
    /// Loads a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&mut self, path: PathBuf) -> Result<(), std::io::Error> {
        self.font_db.load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        self.font_db.load_fonts_dir(dir)
    }

    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
    }

    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of registered faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }
}

/// Binding font classes.
impl FontStorage {
    /// Binds `font` to the best face matching `query`.
    ///
    /// Returns the chosen face, or `None` (leaving the old binding) when nothing
    /// matches or the face cannot be parsed.
    pub fn bind(&mut self, font: Font, query: &fontdb::Query, size: f32) -> Option<fontdb::ID> {
        let id = self.font_db.query(query)?;
        self.face(id)?;
        self.bind_id(font, id, size);
        Some(id)
    }

    /// Binds `font` to a known face.
    pub fn bind_id(&mut self, font: Font, id: fontdb::ID, size: f32) {
        self.bindings[font as usize] = Some(FaceBinding { id, size });
        self.warned_unbound[font as usize] = false;
        self.glyphs.retain(|(cached_font, _), _| *cached_font != font);
    }

    pub fn binding(&self, font: Font) -> Option<FaceBinding> {
        self.bindings[font as usize]
    }

    /// Parsed face and pixel size for `font`.
    pub fn resolve(&mut self, font: Font) -> Option<(Arc<fontdue::Font>, f32)> {
        let Some(binding) = self.binding(font) else {
            if !self.warned_unbound[font as usize] {
                log::warn!("Font class {font:?} used before a face was bound.");
                self.warned_unbound[font as usize] = true;
            }
            return None;
        };
        self.face(binding.id).map(|face| (face, binding.size))
    }

    /// Retrieves a parsed face by ID, parsing it if necessary.
    pub fn face(&mut self, id: fontdb::ID) -> Option<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self.font_db.with_face_data(id, |data, index| {
                    fontdue::Font::from_bytes(
                        data,
                        fontdue::FontSettings {
                            collection_index: index,
                            scale: 40.0,
                            load_substitutions: true,
                        },
                    )
                })?;

                match font_result {
                    Ok(font) => {
                        let r: &mut Arc<fontdue::Font> = entry.insert(Arc::new(font));
                        Some(Arc::clone(r))
                    }
                    Err(e) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, e);
                        None
                    }
                }
            }
        }
    }
}

/// Measuring.
impl FontStorage {
    /// Pixel width of `text` set in `font`, kerning included.
    ///
    /// Unbound classes measure as zero so layout still terminates.
    pub fn text_width(&mut self, text: &str, font: Font) -> i32 {
        let Some((face, size)) = self.resolve(font) else {
            return 0;
        };

        let mut width = 0.0;
        let mut prev: Option<u16> = None;
        for ch in text.chars() {
            let glyph = *self.glyphs.entry((font, ch)).or_insert_with(|| {
                let index = face.lookup_glyph_index(ch);
                CachedGlyph {
                    index,
                    advance: face.metrics_indexed(index, size).advance_width,
                }
            });
            if let Some(prev) = prev {
                width += face
                    .horizontal_kern_indexed(prev, glyph.index, size)
                    .unwrap_or(0.0);
            }
            width += glyph.advance;
            prev = Some(glyph.index);
        }

        width.round().max(0.0) as i32
    }
}
