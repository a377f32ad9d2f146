use crate::{
    error::{Result, TextError},
    style::Font,
    text::content::{TextContent, Token},
};

/// Placeholder replaced by the next parameter.
pub const PLACEHOLDER: &str = "{}";

impl TextContent {
    /// Expands `format` line by line, substituting `params` in order.
    ///
    /// Each line of `format` becomes one pre-broken line: literals are set in
    /// `font` and the substituted value in `param_font`. Only the first `{}`
    /// of a line is a placeholder; any later one is kept as literal text.
    ///
    /// Fails without touching the content when the number of placeholder lines
    /// differs from the number of parameters.
    ///
    /// ```
    /// use tanzaku::{Font, TextContent};
    ///
    /// let mut content = TextContent::new();
    /// content
    ///     .format_parametrized("Fee: {}\nTotal: {}", &["0.0001", "1.0001"], Font::Normal, Font::Bold)
    ///     .unwrap();
    /// assert_eq!(content.count_lines(), 2);
    /// ```
    pub fn format_parametrized<S: AsRef<str>>(
        &mut self,
        format: &str,
        params: &[S],
        font: Font,
        param_font: Font,
    ) -> Result<()> {
        let placeholders = format
            .split('\n')
            .filter(|line| line.contains(PLACEHOLDER))
            .count();
        if placeholders != params.len() {
            return Err(TextError::Arity {
                placeholders,
                params: params.len(),
            });
        }

        let mut params = params.iter();
        let mut expanded = Vec::new();
        for line in format.split('\n') {
            expanded.push(Token::Font(font));
            let substitution = line
                .split_once(PLACEHOLDER)
                .and_then(|(left, right)| params.next().map(|param| (left, right, param)));
            match substitution {
                Some((left, right, param)) => {
                    if !left.is_empty() {
                        expanded.push(Token::from(left.trim_end()));
                    }
                    expanded.push(Token::Font(param_font));
                    expanded.push(Token::from(param.as_ref()));
                    expanded.push(Token::Font(font));
                    if !right.is_empty() {
                        expanded.push(Token::from(right.trim_start()));
                    }
                }
                None if !line.is_empty() => expanded.push(Token::from(line)),
                None => {}
            }
            expanded.push(Token::LineBreak);
        }

        self.tokens.extend(expanded);
        Ok(())
    }
}
