//! Markup to LaTeX translator.

use crate::escape::escape_tex;
use crate::scanner::{Attributes, Token, tokenize};
use crate::state::{Cell, Element, Frame, TableState};

/// Result of translating one run of markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Translation {
    /// LaTeX output.
    pub tex: String,
    /// Recoverable problems found in the markup (unsupported or unmatched tags).
    pub warnings: Vec<String>,
}

/// Translate markup with a fresh [`MarkupTranslator`].
#[must_use]
pub fn translate(markup: &str) -> Translation {
    MarkupTranslator::new().translate(markup)
}

/// Stack-based translator from the comment HTML subset to LaTeX.
///
/// Open elements live on a frame stack; each frame buffers its content and
/// wraps it when closed, so nested markup always yields nested macros.
/// Elements still open at the end of the input are closed implicitly.
#[derive(Debug, Default)]
pub struct MarkupTranslator {
    frames: Vec<Frame>,
    output: String,
    warnings: Vec<String>,
}

impl MarkupTranslator {
    /// Create a new translator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate markup and return the result.
    ///
    /// The translator is reset afterwards and can be reused.
    pub fn translate(&mut self, markup: &str) -> Translation {
        self.feed(markup);
        self.finish()
    }

    /// Translate one run of markup, keeping elements open across runs.
    ///
    /// A comment split into several runs (around cross-references, for
    /// example) is fed run by run and closed once with [`finish`](Self::finish).
    pub fn feed(&mut self, markup: &str) {
        for token in tokenize(markup) {
            self.process_token(token);
        }
    }

    /// Append already rendered LaTeX inside the innermost open element.
    pub fn push_raw(&mut self, tex: &str) {
        self.push_str(tex);
    }

    /// Close every open element and return the output since the last call.
    pub fn finish(&mut self) -> Translation {
        while !self.frames.is_empty() {
            self.close_top();
        }

        Translation {
            tex: std::mem::take(&mut self.output),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn process_token(&mut self, token: Token<'_>) {
        match token {
            Token::Text(text) => self.text(text),
            Token::Start { name, attrs, raw } => self.start_tag(&name, &attrs, raw),
            Token::End { name, raw } => self.end_tag(&name, raw),
            Token::Verbatim(content) => self.verbatim(content),
        }
    }

    fn start_tag(&mut self, name: &str, attrs: &Attributes, raw: &str) {
        match name {
            "p" => self.push_str("\n\n"),
            "br" => self.push_str("\\newline{}"),
            "hr" => self.push_str("\\par\\noindent\\rule{\\linewidth}{0.4pt}\\par "),
            "b" | "strong" => self.open(name, Element::Style("textbf")),
            "i" => self.open(name, Element::Style("textit")),
            "em" => self.open(name, Element::Style("emph")),
            "tt" | "code" => self.open(name, Element::Style("texttt")),
            "u" => self.open(name, Element::Style("underline")),
            "sup" => self.open(name, Element::Style("textsuperscript")),
            "sub" => self.open(name, Element::Style("textsubscript")),
            "font" => match attrs.get("color") {
                Some(color) if !color.trim().is_empty() => {
                    self.open(name, Element::Color(color.to_owned()));
                }
                _ => self.open(name, Element::Link(None)),
            },
            "a" => {
                let href = attrs.get("href").map(str::to_owned);
                self.open(name, Element::Link(href));
            }
            "ul" | "ol" => self.open(
                name,
                Element::List {
                    ordered: name == "ol",
                    items: 0,
                },
            ),
            "li" => self.list_item(raw),
            "dl" => self.open(
                name,
                Element::Description {
                    items: 0,
                    defs: None,
                },
            ),
            "dt" => self.definition_term(raw),
            "dd" => self.definition(raw),
            "table" => self.open(name, Element::Table(TableState::default())),
            "tr" => self.table_row(raw),
            "td" | "th" => self.table_cell(name, raw),
            "center" => self.open(name, Element::Environment("center")),
            "blockquote" => self.open(name, Element::Environment("quote")),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.open(name, Element::Heading),
            // Content arrives as a verbatim token.
            "pre" => {}
            _ => self.unsupported(raw),
        }
    }

    fn end_tag(&mut self, name: &str, raw: &str) {
        match name {
            "p" => self.push_str("\n\n"),
            // Items and definitions end where the next one starts.
            "li" | "dd" | "br" | "pre" => {}
            _ => match self.frames.iter().rposition(|f| f.tag == name) {
                Some(index) => {
                    while self.frames.len() > index {
                        self.close_top();
                    }
                }
                None => self.warn(format!("unmatched end tag {raw} ignored")),
            },
        }
    }

    fn text(&mut self, text: &str) {
        let decoded = html_escape::decode_html_entities(text);
        self.push_str(&escape_tex(&decoded));
    }

    fn verbatim(&mut self, content: &str) {
        let decoded = html_escape::decode_html_entities(content);
        let body = decoded.strip_prefix('\n').unwrap_or(&decoded);
        let body = body.trim_end();
        self.push_str(&format!("\n\\begin{{verbatim}}\n{body}\n\\end{{verbatim}}\n"));
    }

    fn unsupported(&mut self, raw: &str) {
        self.warn(format!("unsupported tag {raw} rendered as text"));
        self.push_str(&escape_tex(raw));
    }

    fn list_item(&mut self, raw: &str) {
        let Some(index) = self.innermost(|e| matches!(e, Element::List { .. })) else {
            self.warn(format!("{raw} outside of a list ignored"));
            return;
        };
        self.close_above(index);
        if let Some(Frame {
            element: Element::List { items, .. },
            buf,
            ..
        }) = self.frames.last_mut()
        {
            *items += 1;
            buf.push_str("\n\\item ");
        }
    }

    fn definition_term(&mut self, raw: &str) {
        let Some(index) = self.innermost(|e| matches!(e, Element::Description { .. })) else {
            self.warn(format!("{raw} outside of a definition list ignored"));
            return;
        };
        self.close_above(index);
        self.open("dt", Element::Term);
    }

    fn definition(&mut self, raw: &str) {
        let Some(index) = self.innermost(|e| matches!(e, Element::Description { .. })) else {
            self.warn(format!("{raw} outside of a definition list ignored"));
            return;
        };
        self.close_above(index);
        if let Some(Frame {
            element: Element::Description { items, defs },
            buf,
            ..
        }) = self.frames.last_mut()
        {
            match defs {
                None => {
                    // Definition without a term gets an empty label.
                    *items += 1;
                    buf.push_str("\n\\item[] ");
                    *defs = Some(1);
                }
                Some(count) => {
                    if *count > 0 {
                        buf.push_str("\n\n");
                    }
                    *count += 1;
                }
            }
        }
    }

    fn table_row(&mut self, raw: &str) {
        let Some(index) = self
            .frames
            .iter()
            .rposition(|f| matches!(f.element, Element::Table(_)))
        else {
            self.warn(format!("{raw} outside of a table ignored"));
            return;
        };
        self.close_above(index);
        self.open("tr", Element::Row(Vec::new()));
    }

    fn table_cell(&mut self, name: &str, raw: &str) {
        let Some(index) = self
            .frames
            .iter()
            .rposition(|f| f.element.is_table_structure())
        else {
            self.warn(format!("{raw} outside of a table ignored"));
            return;
        };
        self.close_above(index);
        if matches!(self.frames[index].element, Element::Table(_)) {
            self.open("tr", Element::Row(Vec::new()));
        }
        self.open(
            name,
            Element::Cell {
                header: name == "th",
            },
        );
    }

    /// Index of the innermost frame matching `pred`.
    ///
    /// The search stops at a table cell, so a list item inside a cell never
    /// attaches to a list outside the table.
    fn innermost(&self, pred: impl Fn(&Element) -> bool) -> Option<usize> {
        for (index, frame) in self.frames.iter().enumerate().rev() {
            if pred(&frame.element) {
                return Some(index);
            }
            if matches!(frame.element, Element::Cell { .. }) {
                return None;
            }
        }
        None
    }

    fn open(&mut self, tag: &str, element: Element) {
        self.frames.push(Frame::new(tag, element));
    }

    /// Close every frame above `index`, leaving `frames[index]` on top.
    fn close_above(&mut self, index: usize) {
        while self.frames.len() > index + 1 {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        let Some(Frame { tag, element, buf }) = self.frames.pop() else {
            return;
        };
        match element {
            Element::Cell { header } => {
                if let Some(Frame {
                    element: Element::Row(cells),
                    ..
                }) = self.frames.last_mut()
                {
                    cells.push(Cell {
                        content: buf,
                        header,
                    });
                    return;
                }
                self.push_str(&buf);
            }
            Element::Row(cells) => {
                if let Some(Frame {
                    element: Element::Table(table),
                    ..
                }) = self.frames.last_mut()
                {
                    table.push_row(cells);
                    return;
                }
                let rendered = Frame::new(tag, Element::Row(cells)).render();
                self.push_str(&rendered);
            }
            Element::Term => {
                if let Some(Frame {
                    element: Element::Description { items, defs },
                    buf: parent,
                    ..
                }) = self.frames.last_mut()
                {
                    *items += 1;
                    *defs = Some(0);
                    parent.push_str("\n\\item[{");
                    parent.push_str(buf.trim());
                    parent.push_str("}] ");
                    return;
                }
                let rendered = Frame { tag, element: Element::Term, buf }.render();
                self.push_str(&rendered);
            }
            element => {
                let rendered = Frame { tag, element, buf }.render();
                self.push_str(&rendered);
            }
        }
    }

    /// Append output to the innermost frame, or to the document.
    ///
    /// Non-blank text that lands directly in a table or row opens an
    /// implicit cell; blank text there is dropped.
    fn push_str(&mut self, content: &str) {
        match self.frames.last_mut() {
            Some(frame) if frame.element.is_table_structure() => {
                if content.trim().is_empty() {
                    return;
                }
                if matches!(frame.element, Element::Table(_)) {
                    self.open("tr", Element::Row(Vec::new()));
                }
                self.open("td", Element::Cell { header: false });
                self.push_str(content);
            }
            Some(frame) => frame.buf.push_str(content),
            None => self.output.push_str(content),
        }
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tex(markup: &str) -> String {
        let result = translate(markup);
        assert!(
            result.warnings.is_empty(),
            "unexpected warnings: {:?}",
            result.warnings
        );
        result.tex
    }

    /// Check that braces and environments pair up like a stack.
    fn assert_balanced(tex: &str) {
        let mut stack = Vec::new();
        let mut rest = tex;
        while let Some(c) = rest.chars().next() {
            if let Some(tail) = rest.strip_prefix("\\begin{") {
                let end = tail.find('}').unwrap();
                stack.push(format!("env:{}", &tail[..end]));
                rest = &tail[end + 1..];
                continue;
            }
            if let Some(tail) = rest.strip_prefix("\\end{") {
                let end = tail.find('}').unwrap();
                assert_eq!(stack.pop(), Some(format!("env:{}", &tail[..end])), "in {tex}");
                rest = &tail[end + 1..];
                continue;
            }
            match c {
                '{' => stack.push("{".to_owned()),
                '}' => assert_eq!(stack.pop().as_deref(), Some("{"), "in {tex}"),
                _ => {}
            }
            rest = &rest[c.len_utf8()..];
        }
        assert!(stack.is_empty(), "unclosed {stack:?} in {tex}");
    }

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(tex("50% of $x_1"), r"50\% of \$x\_1");
    }

    #[test]
    fn test_entities_are_decoded_then_escaped() {
        assert_eq!(tex("a &lt;b&gt; &amp; c"), r"a \textless{}b\textgreater{} & c");
    }

    #[test]
    fn test_bold_containing_italic_nests() {
        assert_eq!(
            tex("<b>bold <i>and italic</i></b>"),
            r"\textbf{bold \textit{and italic}}"
        );
    }

    #[test]
    fn test_inline_styles() {
        assert_eq!(
            tex("<em>e</em><strong>s</strong><tt>t</tt><code>c</code>"),
            r"\emph{e}\textbf{s}\texttt{t}\texttt{c}"
        );
        assert_eq!(tex("<b><tt>bold tt</tt></b>"), r"\textbf{\texttt{bold tt}}");
    }

    #[test]
    fn test_paragraphs_and_breaks() {
        assert_eq!(tex("a<p>b</p>c<br>d"), "a\n\nb\n\nc\\newline{}d");
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            tex("<ul><li>one</li><li>two</ul>"),
            "\\begin{itemize}\n\\item one\n\\item two\n\\end{itemize}\n"
        );
    }

    #[test]
    fn test_ordered_list_closes_open_inline() {
        let result = tex("<ol><li><b>one<li>two</ol>");
        assert_eq!(
            result,
            "\\begin{enumerate}\n\\item \\textbf{one}\n\\item two\n\\end{enumerate}\n"
        );
    }

    #[test]
    fn test_definition_list_pairs_terms_with_definitions() {
        assert_eq!(
            tex("<dl><dt>alpha</dt><dd>first</dd><dd>more</dd><dt>beta<dd>second</dl>"),
            "\\begin{description}\n\\item[{alpha}] first\n\nmore\n\\item[{beta}] second\n\\end{description}\n"
        );
    }

    #[test]
    fn test_definition_term_with_brackets_is_grouped() {
        assert_eq!(
            tex("<dl><dt>a[0]</dt><dd>first slot</dd></dl>"),
            "\\begin{description}\n\\item[{a[0]}] first slot\n\\end{description}\n"
        );
    }

    #[test]
    fn test_runs_share_open_elements() {
        let mut translator = MarkupTranslator::new();
        translator.feed("<ul><li>See ");
        translator.push_raw("\\ref{x}");
        translator.feed("</li><li>two</li></ul> and <b>use ");
        translator.push_raw("Bar");
        translator.feed(" here</b>");

        let result = translator.finish();

        assert_eq!(
            result.tex,
            "\\begin{itemize}\n\\item See \\ref{x}\n\\item two\n\\end{itemize}\n and \\textbf{use Bar here}"
        );
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_finish_resets_session() {
        let mut translator = MarkupTranslator::new();
        translator.feed("<code>open");
        assert_eq!(translator.finish().tex, "\\texttt{open}");

        translator.feed("plain");
        assert_eq!(translator.finish().tex, "plain");
    }

    #[test]
    fn test_definition_without_term() {
        assert_eq!(
            tex("<dl><dd>orphan</dd></dl>"),
            "\\begin{description}\n\\item[] orphan\n\\end{description}\n"
        );
    }

    #[test]
    fn test_table_columns_derived_from_rows() {
        let result = tex("<table><tr><th>k</th><th>v</th></tr><tr><td>a</td><td>1</td></tr></table>");
        assert_eq!(
            result,
            "\\begin{tabular}{|l|l|}\n\\hline\n\
             \\textbf{k} & \\textbf{v} \\\\ \\hline\n\
             a & 1 \\\\ \\hline\n\
             \\end{tabular}\n"
        );
    }

    #[test]
    fn test_table_with_implicit_rows_and_ragged_cells() {
        let result = tex("<table>\n  <td>a<td>b<td>c\n <tr><td>d</table>");
        assert!(result.starts_with("\\begin{tabular}{|l|l|l|}"));
        assert!(result.contains("a & b & c \\\\ \\hline"));
        assert!(result.contains("d &  &  \\\\ \\hline"));
    }

    #[test]
    fn test_nested_table_in_cell() {
        let result = tex("<table><tr><td><table><tr><td>x</td></tr></table></td><td>y</td></tr></table>");
        assert_balanced(&result);
        assert!(result.contains("& y \\\\"));
    }

    #[test]
    fn test_font_color() {
        assert_eq!(tex("<font color=red>hot</font>"), r"\textcolor{red}{hot}");
        assert_eq!(
            tex(r##"<font color="#00ff00">go</font>"##),
            r"\textcolor[HTML]{00FF00}{go}"
        );
        assert_eq!(tex("<font size=2>plain</font>"), "plain");
    }

    #[test]
    fn test_preformatted_block_is_verbatim() {
        assert_eq!(
            tex("<pre>\nint <b>x</b> = a &lt; b;\n</pre>"),
            "\n\\begin{verbatim}\nint <b>x</b> = a < b;\n\\end{verbatim}\n"
        );
    }

    #[test]
    fn test_hyperlink() {
        assert_eq!(
            tex(r#"see <a href="http://en.wikipedia.org/wiki/Integer_%28x%29">Wikipedia</a>"#),
            r"see \href{http://en.wikipedia.org/wiki/Integer_\%28x\%29}{Wikipedia}"
        );
        assert_eq!(tex(r#"<a name="top">anchor</a>"#), "anchor");
    }

    #[test]
    fn test_supplemental_blocks() {
        assert_eq!(
            tex("<center>mid</center>"),
            "\\begin{center}\nmid\n\\end{center}\n"
        );
        assert_eq!(tex("<h1>Title</h1>"), "\n\n\\paragraph{Title}\n");
        assert_eq!(tex("x<sup>2</sup>"), r"x\textsuperscript{2}");
    }

    #[test]
    fn test_unsupported_tag_is_escaped_with_warning() {
        let result = translate("a <img src=x> b");
        assert_eq!(result.tex, r"a \textless{}img src=x\textgreater{} b");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("<img src=x>"));
    }

    #[test]
    fn test_unmatched_end_tag_is_noop_with_warning() {
        let result = translate("a</b> c");
        assert_eq!(result.tex, "a c");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("</b>"));
    }

    #[test]
    fn test_misnested_end_tag_closes_inner_elements() {
        let result = translate("<b>x<i>y</b>z</i>");
        assert_eq!(result.tex, r"\textbf{x\textit{y}}z");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_unclosed_elements_close_at_end() {
        assert_eq!(tex("<b>open <i>more"), r"\textbf{open \textit{more}}");
    }

    #[test]
    fn test_list_item_outside_list_warns() {
        let result = translate("<li>stray");
        assert_eq!(result.tex, "stray");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_well_nested_markup_is_balanced() {
        let samples = [
            "<b>bold <i>and italic</i></b>",
            "<ul><li><em>a</em><li><ol><li>x</ol></ul>",
            "<dl><dt><b>t</b><dd><tt>d</tt></dl>",
            "<table><tr><th>h</th></tr><tr><td><font color=red>r</font></td></tr></table>",
            "<center><a href=\"u\">l</a></center><blockquote><i>q</i></blockquote>",
            "<p>para</p><h2>h</h2><u>u</u><sub>s</sub>",
        ];
        for sample in samples {
            assert_balanced(&tex(sample));
        }
    }

    #[test]
    fn test_translator_is_reusable() {
        let mut translator = MarkupTranslator::new();
        let first = translator.translate("<b>one");
        let second = translator.translate("two</b>");
        assert_eq!(first.tex, r"\textbf{one}");
        assert_eq!(second.tex, "two");
        assert_eq!(second.warnings.len(), 1);
    }
}
