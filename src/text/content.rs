use crate::{
    canvas::TextCanvas,
    style::{Color, Font},
    text::layout::{RenderConfig, RenderOutcome, render_text},
};

/// Number of text lines that fit below the header on the panel.
pub const TEXT_MAX_LINES: usize = 5;

/// One element of a content stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A word or fragment; consecutive `Text` tokens are separate words.
    Text(String),
    /// Switches the font for every following `Text` token.
    Font(Font),
    /// Switches the foreground color for every following `Text` token.
    Color(Color),
    LineBreak,
    HalfLineBreak,
}

impl Token {
    pub fn is_text(&self) -> bool {
        matches!(self, Token::Text(_))
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::Text(value.to_owned())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::Text(value)
    }
}

/// Ordered, append-only stream of styled text for one screen.
///
/// Tokens are kept in reading order and handed to [`render_text`] as a slice,
/// so the same content can be rendered any number of times. The header and
/// `max_lines` travel with the stream for callers deciding whether the content
/// fits; the renderer itself does not read them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextContent {
    pub(crate) tokens: Vec<Token>,
    pub header: Option<String>,
    pub max_lines: usize,
}

impl Default for TextContent {
    fn default() -> Self {
        Self::new()
    }
}

impl TextContent {
    pub fn new() -> Self {
        Self {
            tokens: vec![],
            header: None,
            max_lines: TEXT_MAX_LINES,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Removes all tokens so the builder can be reused for another screen.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

/// Appending runs and breaks.
impl TextContent {
    /// Pushes a font marker followed by each fragment as its own word.
    pub fn append_run<I>(&mut self, font: Font, fragments: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.tokens.push(Token::Font(font));
        self.tokens
            .extend(fragments.into_iter().map(|f| Token::Text(f.into())));
    }

    pub fn normal<I>(&mut self, fragments: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.append_run(Font::Normal, fragments);
    }

    pub fn bold<I>(&mut self, fragments: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.append_run(Font::Bold, fragments);
    }

    pub fn mono<I>(&mut self, fragments: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.append_run(Font::Mono, fragments);
    }

    /// Changes the foreground color of the words that follow.
    pub fn set_color(&mut self, color: Color) {
        self.tokens.push(Token::Color(color));
    }

    pub fn br(&mut self) {
        self.tokens.push(Token::LineBreak);
    }

    pub fn br_half(&mut self) {
        self.tokens.push(Token::HalfLineBreak);
    }
}

/// Capacity checks.
impl TextContent {
    /// Counts pre-broken lines.
    ///
    /// Every `LineBreak` closes a line, and text after the last break counts as
    /// one more line. Half breaks neither count nor close a line. Wrapping is
    /// not simulated; use [`layout_text`](crate::text::layout_text) for that.
    pub fn count_lines(&self) -> usize {
        let mut line_count = 0;
        let mut item_on_this_line = false;
        for token in &self.tokens {
            match token {
                Token::Text(_) => item_on_this_line = true,
                Token::LineBreak => {
                    line_count += 1;
                    item_on_this_line = false;
                }
                _ => {}
            }
        }

        if item_on_this_line {
            line_count += 1;
        }

        line_count
    }

    /// Whether the pre-broken lines fit within `max_lines`.
    pub fn fits(&self) -> bool {
        self.count_lines() <= self.max_lines
    }

    /// Renders the stream bounded by this content's own `max_lines`.
    pub fn render<C: TextCanvas>(&self, canvas: &mut C, config: &RenderConfig) -> RenderOutcome {
        let config = config.clone().with_max_lines(self.max_lines);
        render_text(&self.tokens, &config, canvas)
    }

    /// Header followed by the first `max_lines` words, for debugging screens.
    ///
    /// Words do not map one-to-one to rendered lines, so this is only a rough
    /// view of what the screen shows.
    #[cfg(any(test, feature = "introspection"))]
    pub fn read_content(&self) -> Vec<String> {
        self.header
            .iter()
            .cloned()
            .chain(
                self.tokens
                    .iter()
                    .filter_map(|token| match token {
                        Token::Text(text) => Some(text.clone()),
                        _ => None,
                    })
                    .take(self.max_lines),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_run_starts_with_font_marker() {
        let mut content = TextContent::new();
        content.bold(["Send"]);
        content.normal([" ", "0.001"]);
        content.mono(Vec::<String>::new());

        assert_eq!(
            content.tokens(),
            &[
                Token::Font(Font::Bold),
                Token::from("Send"),
                Token::Font(Font::Normal),
                Token::from(" "),
                Token::from("0.001"),
                Token::Font(Font::Mono),
            ]
        );
    }

    #[test]
    fn test_count_lines_trailing_line_without_break() {
        let mut content = TextContent::new();
        assert_eq!(content.count_lines(), 0);

        content.normal(["one"]);
        assert_eq!(content.count_lines(), 1);

        content.br();
        assert_eq!(content.count_lines(), 1);

        content.normal(["two"]);
        assert_eq!(content.count_lines(), 2);
    }

    #[test]
    fn test_count_lines_ignores_half_breaks_and_markers() {
        let mut content = TextContent::new();
        content.normal(["a"]);
        content.br_half();
        content.normal(["b"]);
        content.set_color(Color::RED);
        assert_eq!(content.count_lines(), 1);

        // markers alone after a break do not open a new line
        content.br();
        content.bold(Vec::<&str>::new());
        assert_eq!(content.count_lines(), 1);
    }

    #[test]
    fn test_fits_uses_max_lines() {
        let mut content = TextContent::new().with_max_lines(2);
        content.normal(["a"]);
        content.br();
        content.normal(["b"]);
        assert!(content.fits());
        content.br();
        content.normal(["c"]);
        assert!(!content.fits());
    }

    #[test]
    fn test_clear_keeps_header_and_limit() {
        let mut content = TextContent::new().with_header("Fee").with_max_lines(3);
        content.normal(["a"]);
        content.br();
        content.clear();

        assert!(content.is_empty());
        assert_eq!(content.count_lines(), 0);
        assert_eq!(content.header.as_deref(), Some("Fee"));
        assert_eq!(content.max_lines, 3);
    }

    #[test]
    fn test_read_content_header_and_limit() {
        let mut content = TextContent::new().with_header("Confirm").with_max_lines(2);
        content.normal(["a", "b"]);
        content.br();
        content.bold(["c"]);

        assert_eq!(content.read_content(), vec!["Confirm", "a", "b"]);
    }
}
