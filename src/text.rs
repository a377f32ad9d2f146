/// The token stream and its builder.
pub mod content;
/// The greedy line-wrap renderer.
pub mod layout;
/// Parametrized line templates appended to a content stream.
pub mod template;

pub use content::{TEXT_MAX_LINES, TextContent, Token};
pub use layout::{RenderConfig, RenderOutcome, TextLayout, layout_text, render_text};
pub use template::PLACEHOLDER;
