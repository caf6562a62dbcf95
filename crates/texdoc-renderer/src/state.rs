//! Open-element frames tracked while translating markup.
//!
//! Every frame owns the output produced while it is open; closing a frame
//! wraps that output in the element's macro and hands it to the parent.

use std::fmt::Write;

use crate::escape::{escape_tex, escape_url};

/// An element that wraps its content when closed.
#[derive(Debug)]
pub(crate) enum Element {
    /// Inline style macro such as `textbf`.
    Style(&'static str),
    /// `<font color=...>`.
    Color(String),
    /// `<a>`, with its target when it has one.
    Link(Option<String>),
    /// `<ul>` / `<ol>`.
    List { ordered: bool, items: usize },
    /// `<dl>`; `defs` counts definitions since the last term, `None` before any term.
    Description { items: usize, defs: Option<usize> },
    /// `<dt>` content, becomes the `\item[...]` label.
    Term,
    /// `<table>`.
    Table(TableState),
    /// `<tr>` and the cells collected so far.
    Row(Vec<Cell>),
    /// `<td>` / `<th>`.
    Cell { header: bool },
    /// Block environment such as `center` or `quote`.
    Environment(&'static str),
    /// `<h1>`..`<h6>`.
    Heading,
}

impl Element {
    /// Whether loose text may not be written directly into this element.
    pub(crate) fn is_table_structure(&self) -> bool {
        matches!(self, Element::Table(_) | Element::Row(_))
    }
}

/// An open element with the tag that opened it and its buffered content.
#[derive(Debug)]
pub(crate) struct Frame {
    pub(crate) tag: String,
    pub(crate) element: Element,
    pub(crate) buf: String,
}

impl Frame {
    pub(crate) fn new(tag: impl Into<String>, element: Element) -> Self {
        Self {
            tag: tag.into(),
            element,
            buf: String::new(),
        }
    }

    /// Render a closed frame. Table structure frames are handled by the caller.
    pub(crate) fn render(self) -> String {
        let content = self.buf;
        match self.element {
            Element::Style(command) => format!("\\{command}{{{content}}}"),
            Element::Color(color) => render_color(&color, &content),
            Element::Link(Some(href)) => format!("\\href{{{}}}{{{content}}}", escape_url(&href)),
            Element::Link(None) => content,
            Element::List { ordered, items } => {
                let env = if ordered { "enumerate" } else { "itemize" };
                wrap_environment(env, &content, items)
            }
            Element::Description { items, .. } => wrap_environment("description", &content, items),
            Element::Term => format!("\\textbf{{{}}}", content.trim()),
            Element::Table(table) => table.render(),
            Element::Row(cells) => cells.into_iter().map(|c| c.content).collect(),
            Element::Cell { .. } => content,
            Element::Environment(env) => {
                format!("\\begin{{{env}}}\n{}\n\\end{{{env}}}\n", content.trim())
            }
            Element::Heading => format!("\n\n\\paragraph{{{}}}\n", content.trim()),
        }
    }
}

/// Lists without items render bare; an empty list environment does not compile.
fn wrap_environment(env: &str, content: &str, items: usize) -> String {
    if items == 0 {
        return content.to_owned();
    }
    format!("\\begin{{{env}}}\n{}\n\\end{{{env}}}\n", content.trim())
}

fn render_color(color: &str, content: &str) -> String {
    let hex = color.trim().strip_prefix('#');
    match hex {
        Some(hex) if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            format!("\\textcolor[HTML]{{{}}}{{{content}}}", hex.to_ascii_uppercase())
        }
        _ => format!("\\textcolor{{{}}}{{{content}}}", escape_tex(color.trim())),
    }
}

/// A finished table cell.
#[derive(Debug)]
pub(crate) struct Cell {
    pub(crate) content: String,
    pub(crate) header: bool,
}

/// Rows collected for a table; the column count is known only at the end.
#[derive(Debug, Default)]
pub(crate) struct TableState {
    rows: Vec<Vec<Cell>>,
}

impl TableState {
    pub(crate) fn push_row(&mut self, row: Vec<Cell>) {
        if !row.is_empty() {
            self.rows.push(row);
        }
    }

    /// Number of columns: the widest row.
    pub(crate) fn columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub(crate) fn render(self) -> String {
        let columns = self.columns();
        if columns == 0 {
            return String::new();
        }

        let mut out = String::new();
        let column_format = "|l".repeat(columns);
        let _ = writeln!(out, "\\begin{{tabular}}{{{column_format}|}}");
        out.push_str("\\hline\n");
        for row in self.rows {
            let missing = columns - row.len();
            let cells: Vec<String> = row
                .into_iter()
                .map(|cell| {
                    let content = cell.content.trim();
                    if cell.header {
                        format!("\\textbf{{{content}}}")
                    } else {
                        content.to_owned()
                    }
                })
                .chain(std::iter::repeat_n(String::new(), missing))
                .collect();
            let _ = writeln!(out, "{} \\\\ \\hline", cells.join(" & "));
        }
        out.push_str("\\end{tabular}\n");
        out
    }
}
