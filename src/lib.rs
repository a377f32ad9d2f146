//! # Tanzaku
//!
//! Word-wrapped, multi-font text for small fixed-size displays.
//!
//! ## Overview
//!
//! A screen's text is composed as a [`TextContent`]: an ordered stream of words,
//! font and color markers, and line breaks. [`render_text`] then walks the
//! stream once, wrapping greedily, splitting over-long words with a hyphen, and
//! cutting off with an ellipsis when the available lines run out.
//!
//! Measuring and drawing go through the [`TextMeasure`] and [`TextCanvas`]
//! traits, so the same layout drives a real panel, a [`RecordingCanvas`] used
//! for capacity checks, or the bundled fontdue-backed [`BitmapCanvas`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tanzaku::{Font, FontSystem, RenderConfig, TextContent};
//! use tanzaku::renderer::{BitmapCanvas, Framebuffer};
//! use tanzaku::style::Color;
//!
//! // 1. Bind faces to the three font classes
//! let font_system = FontSystem::new();
//! font_system.load_system_fonts();
//! font_system.bind_default_faces(20.0);
//!
//! // 2. Compose the content
//! let mut content = TextContent::new();
//! content.bold(["Send"]);
//! content.normal(["0.001", "BTC"]);
//! content.br();
//! content
//!     .format_parametrized("Fee: {}", &["0.0001"], Font::Normal, Font::Bold)
//!     .unwrap();
//!
//! // 3. Render
//! let mut framebuffer = Framebuffer::new(240, 240, Color::BLACK);
//! let mut canvas = BitmapCanvas::new(&font_system, &mut framebuffer);
//! content.render(&mut canvas, &RenderConfig::default());
//! ```
//!
//! ## Features
//!
//! *   **`introspection`**: enables [`TextContent::read_content`] outside of tests.

pub mod canvas;
pub mod error;
pub mod font_storage;
pub mod font_system;
pub mod renderer;
pub mod style;
pub mod text;

// common re-exports
pub use canvas::{GlyphRun, RecordingCanvas, TextCanvas, TextMeasure};
pub use error::{Result, TextError};
pub use font_storage::FontStorage;
pub use font_system::FontSystem;
pub use renderer::BitmapCanvas;
pub use style::{Color, Font};
pub use text::{
    RenderConfig, RenderOutcome, TextContent, TextLayout, Token, layout_text, render_text,
};

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use parking_lot;
