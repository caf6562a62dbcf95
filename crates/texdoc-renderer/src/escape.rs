//! Escaping of literal text for LaTeX output.

/// Escape a literal text run so LaTeX prints it verbatim.
///
/// Only the characters below are rewritten; everything else, including
/// non-ASCII text, passes through unchanged.
///
/// | input | output |
/// |---|---|
/// | `"` | `"'` |
/// | `_ % $ #` | `\_ \% \$ \#` |
/// | `^` | `$\wedge$` |
/// | `{` `}` | `$\{$` `$\}$` |
/// | `<` `>` | `\textless{}` `\textgreater{}` |
///
/// # Examples
///
/// ```
/// use texdoc_renderer::escape_tex;
///
/// assert_eq!(escape_tex("a_b < 100%"), r"a\_b \textless{} 100\%");
/// ```
#[must_use]
pub fn escape_tex(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => result.push_str("\"'"),
            '_' | '%' | '$' | '#' => {
                result.push('\\');
                result.push(c);
            }
            '^' => result.push_str(r"$\wedge$"),
            '{' => result.push_str(r"$\{$"),
            '}' => result.push_str(r"$\}$"),
            '<' => result.push_str(r"\textless{}"),
            '>' => result.push_str(r"\textgreater{}"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a URL for use as the first argument of `\href`.
///
/// `hyperref` reads the URL almost verbatim; only `%`, `#` and braces
/// need protecting.
#[must_use]
pub fn escape_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '%' | '#' | '{' | '}' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
