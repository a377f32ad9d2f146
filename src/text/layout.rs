use crate::{
    canvas::{GlyphRun, RecordingCanvas, TextCanvas, TextMeasure},
    style::{Color, Font},
    text::content::{TEXT_MAX_LINES, Token},
};

/// Height of the screen header reserved above the text area.
pub const TEXT_HEADER_HEIGHT: i32 = 48;
pub const TEXT_LINE_HEIGHT: i32 = 26;
pub const TEXT_LINE_HEIGHT_HALF: i32 = 13;
pub const TEXT_MARGIN_LEFT: i32 = 14;
/// Width of the panel in pixels.
pub const DISPLAY_WIDTH: i32 = 240;

const HYPHEN: &str = "-";
const ELLIPSIS: &str = "...";

/// Geometry and style defaults for a single render pass.
///
/// The defaults describe the text area of the 240x240 panel below its header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Put every word on its own line instead of joining words with a space.
    pub new_lines: bool,
    pub max_lines: usize,
    pub font: Font,
    pub fg: Color,
    pub bg: Color,
    pub left_margin: i32,
    /// Top of the text area; the first baseline sits one line below it.
    pub top_offset: i32,
    /// Exclusive right bound for drawn text.
    pub right_edge: i32,
    pub line_height: i32,
    pub line_height_half: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            new_lines: false,
            max_lines: TEXT_MAX_LINES,
            font: Font::Normal,
            fg: Color::WHITE,
            bg: Color::BLACK,
            left_margin: TEXT_MARGIN_LEFT,
            top_offset: TEXT_HEADER_HEIGHT,
            right_edge: DISPLAY_WIDTH,
            line_height: TEXT_LINE_HEIGHT,
            line_height_half: TEXT_LINE_HEIGHT_HALF,
        }
    }
}

impl RenderConfig {
    pub fn with_new_lines(mut self, new_lines: bool) -> Self {
        self.new_lines = new_lines;
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    pub fn with_bounds(mut self, left_margin: i32, top_offset: i32, right_edge: i32) -> Self {
        self.left_margin = left_margin;
        self.top_offset = top_offset;
        self.right_edge = right_edge;
        self
    }

    pub fn with_line_height(mut self, line_height: i32, line_height_half: i32) -> Self {
        self.line_height = line_height;
        self.line_height_half = line_height_half;
        self
    }

    /// Baseline below which nothing but a truncation marker may be drawn.
    pub fn y_max(&self) -> i32 {
        let lines = i32::try_from(self.max_lines).unwrap_or(i32::MAX);
        self.top_offset.saturating_add(self.line_height.saturating_mul(lines))
    }
}

/// How a render pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every token was processed.
    Complete,
    /// Vertical space ran out; an ellipsis was drawn and the rest was dropped.
    Truncated,
}

/// Draws `tokens` word by word with greedy wrapping.
///
/// Words that do not fit on the current line move to the next one. A word
/// wider than a whole line, or any word once the last line is reached while
/// more tokens follow, is split: the prefix that fits is drawn with a hyphen
/// (or an ellipsis on the last line) and the remainder continues below.
/// Running out of lines draws an ellipsis and stops for good.
///
/// Nothing is buffered besides the current word, and every drawn run is final.
pub fn render_text<C: TextCanvas + ?Sized>(
    tokens: &[Token],
    config: &RenderConfig,
    canvas: &mut C,
) -> RenderOutcome {
    let left = config.left_margin;
    let right = config.right_edge;
    let y_max = config.y_max();
    let bg = config.bg;

    let mut x = left;
    let mut y = config.top_offset.saturating_add(config.line_height);
    let mut font = config.font;
    let mut fg = config.fg;

    // sizes of common glyphs
    let space_w = canvas.text_width(" ", config.font);
    let hyphen_w = canvas.text_width(HYPHEN, Font::Bold);
    let ellipsis_w = canvas.text_width(ELLIPSIS, Font::Bold);

    for (index, token) in tokens.iter().enumerate() {
        let has_next = index + 1 < tokens.len();

        let mut word = match token {
            Token::LineBreak | Token::HalfLineBreak => {
                if y > y_max {
                    log::debug!("text truncated at a line break (y = {y}, y_max = {y_max})");
                    draw_marker(canvas, x, y, ELLIPSIS, bg);
                    return RenderOutcome::Truncated;
                }
                x = left;
                y += if matches!(token, Token::LineBreak) {
                    config.line_height
                } else {
                    config.line_height_half
                };
                continue;
            }
            Token::Font(next) => {
                font = *next;
                continue;
            }
            Token::Color(next) => {
                fg = *next;
                continue;
            }
            Token::Text(text) => text.as_str(),
        };

        let mut width = canvas.text_width(word, font);

        while x + width > right || (has_next && y >= y_max) {
            let beginning_of_line = x == left;
            let fits_in_one_line = width < right - left;
            if y < y_max && fits_in_one_line && !beginning_of_line {
                x = left;
                y += config.line_height;
                break;
            }

            let (marker, marker_w) = if y < y_max {
                (HYPHEN, hyphen_w)
            } else {
                (ELLIPSIS, ellipsis_w)
            };
            let (split_at, span_w) = split_point(&*canvas, word, font, x, width, marker_w, right);
            canvas.draw_text(x, y, &word[..split_at], font, fg, bg);
            draw_marker(canvas, x + span_w, y, marker, bg);

            if y >= y_max {
                log::debug!("text truncated inside word {word:?} (y = {y})");
                return RenderOutcome::Truncated;
            }
            x = left;
            y += config.line_height;

            word = &word[split_at..];
            width = canvas.text_width(word, font);
        }

        canvas.draw_text(x, y, word, font, fg, bg);

        if config.new_lines && has_next {
            if y >= y_max {
                log::debug!("text truncated after word {word:?} (y = {y})");
                draw_marker(canvas, x, y, ELLIPSIS, bg);
                return RenderOutcome::Truncated;
            }
            x = left;
            y += config.line_height;
        } else {
            x += width + space_w;
        }
    }

    RenderOutcome::Complete
}

/// Finds where to cut `word` so the prefix plus a marker fits before `right`.
///
/// Trailing characters are peeled off one by one, subtracting their own width
/// from `width`. Returns the byte offset of the cut and the reduced width.
/// When no non-empty prefix fits the cut is at `0`, while the width still
/// covers the first character.
fn split_point<M: TextMeasure + ?Sized>(
    measure: &M,
    word: &str,
    font: Font,
    x: i32,
    mut width: i32,
    marker_w: i32,
    right: i32,
) -> (usize, i32) {
    let mut buf = [0u8; 4];
    for (index, ch) in word.char_indices().rev().take_while(|(i, _)| *i > 0) {
        width -= measure.text_width(ch.encode_utf8(&mut buf), font);
        if x + width + marker_w < right {
            return (index, width);
        }
    }
    (0, width)
}

fn draw_marker<C: TextCanvas + ?Sized>(canvas: &mut C, x: i32, y: i32, marker: &str, bg: Color) {
    canvas.draw_text(x, y, marker, Font::Bold, Color::GREY, bg);
}

/// Result of a layout-only render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLayout {
    /// Draw calls in the order the renderer issued them.
    pub runs: Vec<GlyphRun>,
    pub outcome: RenderOutcome,
}

impl TextLayout {
    pub fn is_truncated(&self) -> bool {
        self.outcome == RenderOutcome::Truncated
    }

    /// Number of distinct baselines that received text.
    pub fn line_count(&self) -> usize {
        let mut count = 0;
        let mut last_y = None;
        for run in &self.runs {
            if last_y != Some(run.origin.y) {
                count += 1;
                last_y = Some(run.origin.y);
            }
        }
        count
    }

    /// Issues the recorded draw calls again on a real canvas.
    pub fn replay<C: TextCanvas + ?Sized>(&self, canvas: &mut C) {
        for run in &self.runs {
            canvas.draw_text(run.origin.x, run.origin.y, &run.text, run.font, run.fg, run.bg);
        }
    }
}

/// Runs [`render_text`] against `measure` without drawing anything.
pub fn layout_text<M: TextMeasure>(tokens: &[Token], config: &RenderConfig, measure: M) -> TextLayout {
    let mut canvas = RecordingCanvas::new(measure);
    let outcome = render_text(tokens, config, &mut canvas);
    TextLayout {
        runs: canvas.into_runs(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextContent;

    /// Every character is `advance` pixels wide; bold may be wider.
    struct FixedWidth {
        advance: i32,
        bold_advance: i32,
    }

    const TEN: FixedWidth = FixedWidth {
        advance: 10,
        bold_advance: 10,
    };

    impl TextMeasure for FixedWidth {
        fn text_width(&self, text: &str, font: Font) -> i32 {
            let advance = match font {
                Font::Bold => self.bold_advance,
                _ => self.advance,
            };
            text.chars().count() as i32 * advance
        }
    }

    /// 100px wide area, 10px lines, first baseline at y = 10.
    fn small_area(max_lines: usize) -> RenderConfig {
        RenderConfig::default()
            .with_bounds(0, 0, 100)
            .with_line_height(10, 5)
            .with_max_lines(max_lines)
    }

    fn texts(layout: &TextLayout) -> Vec<(&str, i32, i32)> {
        layout
            .runs
            .iter()
            .map(|run| (run.text.as_str(), run.origin.x, run.origin.y))
            .collect()
    }

    fn words(list: &[&str]) -> Vec<Token> {
        list.iter().map(|w| Token::from(*w)).collect()
    }

    #[test]
    fn test_single_line_send_amount() {
        let tokens = vec![
            Token::Font(Font::Bold),
            Token::from("Send"),
            Token::Font(Font::Normal),
            Token::from(" "),
            Token::from("0.001"),
            Token::from(" "),
            Token::from("BTC"),
            Token::LineBreak,
        ];
        let layout = layout_text(&tokens, &RenderConfig::default().with_max_lines(4), TEN);

        assert_eq!(layout.outcome, RenderOutcome::Complete);
        assert_eq!(
            texts(&layout),
            vec![
                ("Send", 14, 74),
                (" ", 64, 74),
                ("0.001", 84, 74),
                (" ", 144, 74),
                ("BTC", 164, 74),
            ]
        );
        assert_eq!(layout.runs[0].font, Font::Bold);
        assert_eq!(layout.runs[4].font, Font::Normal);
        assert_eq!(layout.line_count(), 1);
    }

    #[test]
    fn test_greedy_wrap_moves_word_to_next_line() {
        let layout = layout_text(&words(&["aaaa", "bbbb", "cccc"]), &small_area(3), TEN);

        assert_eq!(layout.outcome, RenderOutcome::Complete);
        assert_eq!(
            texts(&layout),
            vec![("aaaa", 0, 10), ("bbbb", 50, 10), ("cccc", 0, 20)]
        );
    }

    #[test]
    fn test_long_word_is_hyphenated_across_lines() {
        let layout = layout_text(
            &words(&["abcdefghijklmnopqrstuvwxy"]),
            &small_area(5),
            TEN,
        );

        assert_eq!(layout.outcome, RenderOutcome::Complete);
        assert_eq!(
            texts(&layout),
            vec![
                ("abcdefgh", 0, 10),
                ("-", 80, 10),
                ("ijklmnop", 0, 20),
                ("-", 80, 20),
                ("qrstuvwxy", 0, 30),
            ]
        );
        assert!(
            layout
                .runs
                .iter()
                .filter(|run| run.text == "-")
                .all(|run| run.font == Font::Bold && run.fg == Color::GREY)
        );
    }

    #[test]
    fn test_long_word_on_last_line_ends_with_ellipsis() {
        let layout = layout_text(
            &words(&["abcdefghijklmnopqrstuvwxy", "never"]),
            &small_area(1),
            TEN,
        );

        assert_eq!(layout.outcome, RenderOutcome::Truncated);
        assert_eq!(texts(&layout), vec![("abcdef", 0, 10), ("...", 60, 10)]);
    }

    #[test]
    fn test_last_line_with_following_token_is_cut() {
        // Once the last line is reached any word followed by another token is
        // split with an ellipsis, even if it would fit.
        let tokens = vec![
            Token::from("a"),
            Token::LineBreak,
            Token::from("b"),
            Token::LineBreak,
            Token::from("c"),
        ];
        let layout = layout_text(&tokens, &small_area(2), TEN);

        assert_eq!(layout.outcome, RenderOutcome::Truncated);
        assert_eq!(
            texts(&layout),
            vec![("a", 0, 10), ("", 0, 20), ("...", 10, 20)]
        );
    }

    #[test]
    fn test_break_past_limit_draws_ellipsis() {
        // A half break followed by a full break pushes the cursor below y_max
        // without any word being drawn there.
        let tokens = vec![
            Token::from("a"),
            Token::LineBreak,
            Token::HalfLineBreak,
            Token::LineBreak,
            Token::from("b"),
        ];
        let layout = layout_text(&tokens, &small_area(2), TEN);

        // y: 10 -> 20 -> 25 -> at the last break 25 > 20
        assert_eq!(layout.outcome, RenderOutcome::Truncated);
        assert_eq!(texts(&layout), vec![("a", 0, 10), ("...", 0, 25)]);
    }

    #[test]
    fn test_half_line_break_advances_half() {
        let tokens = vec![Token::from("a"), Token::HalfLineBreak, Token::from("b")];
        let layout = layout_text(&tokens, &small_area(3), TEN);

        assert_eq!(texts(&layout), vec![("a", 0, 10), ("b", 0, 15)]);
    }

    #[test]
    fn test_new_lines_puts_each_word_on_its_own_line() {
        let config = small_area(5).with_new_lines(true);
        let layout = layout_text(&words(&["a", "b", "c"]), &config, TEN);

        assert_eq!(layout.outcome, RenderOutcome::Complete);
        assert_eq!(texts(&layout), vec![("a", 0, 10), ("b", 0, 20), ("c", 0, 30)]);
        assert_eq!(layout.line_count(), 3);
    }

    #[test]
    fn test_markers_change_style_without_moving_cursor() {
        let tokens = vec![
            Token::Color(Color::RED),
            Token::from("a"),
            Token::Font(Font::Mono),
            Token::from("b"),
        ];
        let layout = layout_text(&tokens, &small_area(3), TEN);

        assert_eq!(texts(&layout), vec![("a", 0, 10), ("b", 20, 10)]);
        assert_eq!(layout.runs[0].fg, Color::RED);
        assert_eq!(layout.runs[0].font, Font::Normal);
        assert_eq!(layout.runs[1].fg, Color::RED);
        assert_eq!(layout.runs[1].font, Font::Mono);
    }

    #[test]
    fn test_space_uses_starting_font_width() {
        let measure = FixedWidth {
            advance: 10,
            bold_advance: 12,
        };
        let tokens = vec![Token::Font(Font::Bold), Token::from("ab"), Token::from("cd")];
        let layout = layout_text(&tokens, &small_area(3), measure);

        // "ab" is 24px in bold, the space is measured in the normal font
        assert_eq!(texts(&layout), vec![("ab", 0, 10), ("cd", 34, 10)]);
    }

    #[test]
    fn test_starting_style_applies_until_changed() {
        let measure = FixedWidth {
            advance: 10,
            bold_advance: 12,
        };
        let config = small_area(3)
            .with_font(Font::Bold)
            .with_colors(Color::RED, Color::BLUE);
        let tokens = vec![
            Token::from("ab"),
            Token::from("cd"),
            Token::Font(Font::Mono),
            Token::from("ef"),
        ];
        let layout = layout_text(&tokens, &config, measure);

        // spaces are 12px wide because the pass starts in bold
        assert_eq!(
            texts(&layout),
            vec![("ab", 0, 10), ("cd", 36, 10), ("ef", 72, 10)]
        );
        assert_eq!(layout.runs[0].font, Font::Bold);
        assert_eq!(layout.runs[2].font, Font::Mono);
        assert!(
            layout
                .runs
                .iter()
                .all(|run| run.fg == Color::RED && run.bg == Color::BLUE)
        );
    }

    #[test]
    fn test_huge_max_lines_does_not_overflow() {
        let tokens = words(&["a", "b"]);
        for max_lines in [100_000_000, usize::MAX] {
            let config = RenderConfig::default().with_max_lines(max_lines);
            assert_eq!(config.y_max(), i32::MAX);

            let layout = layout_text(&tokens, &config, TEN);
            assert_eq!(layout.outcome, RenderOutcome::Complete);
            assert_eq!(texts(&layout), vec![("a", 14, 74), ("b", 34, 74)]);
        }
    }

    #[test]
    fn test_degenerate_split_with_empty_prefix() {
        // Not even one character fits next to the marker.
        let config = small_area(2).with_bounds(0, 0, 15);
        let layout = layout_text(&words(&["abc"]), &config, TEN);

        assert_eq!(layout.outcome, RenderOutcome::Truncated);
        assert_eq!(
            texts(&layout),
            vec![("", 0, 10), ("-", 10, 10), ("", 0, 20), ("...", 10, 20)]
        );
    }

    #[test]
    fn test_split_respects_multibyte_characters() {
        let layout = layout_text(&words(&["ééééééééééééé"]), &small_area(3), TEN);

        assert_eq!(layout.outcome, RenderOutcome::Complete);
        assert_eq!(
            texts(&layout),
            vec![("éééééééé", 0, 10), ("-", 80, 10), ("ééééé", 0, 20)]
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut content = TextContent::new();
        content.normal(["one", "two", "three"]);
        content.br();
        content.bold(["four"]);

        let config = small_area(4);
        let first = layout_text(content.tokens(), &config, TEN);
        let second = layout_text(content.tokens(), &config, TEN);
        assert_eq!(first, second);
    }

    #[test]
    fn test_replay_reissues_runs() {
        let layout = layout_text(&words(&["aaaa", "bbbb", "cccc"]), &small_area(3), TEN);
        let mut canvas = RecordingCanvas::new(TEN);
        layout.replay(&mut canvas);

        assert_eq!(canvas.runs(), layout.runs.as_slice());
    }

    #[test]
    fn test_content_render_uses_own_max_lines() {
        let mut content = TextContent::new().with_max_lines(1);
        content.normal(["a"]);
        content.br();
        content.normal(["b"]);

        let mut canvas = RecordingCanvas::new(TEN);
        let outcome = content.render(&mut canvas, &small_area(5));
        assert_eq!(outcome, RenderOutcome::Truncated);
    }
}
