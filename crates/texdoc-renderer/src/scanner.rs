//! Permissive tokenizer for the HTML subset used in comments.
//!
//! Anything that does not look like a tag is text, so stray `<` characters
//! (`if a < b`) survive as literal text. `<pre>` content is captured raw.

use std::sync::LazyLock;

use regex::Regex;

/// Start tag, end tag or HTML comment.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)(?P<comment><!--.*?-->)|<(?P<close>/)?(?P<name>[A-Za-z][A-Za-z0-9]*)(?P<attrs>(?:\s[^<>]*?)?)\s*(?P<selfclose>/)?>",
    )
    .expect("invalid tag regex")
});

/// Attribute with an optional double-quoted, single-quoted or bare value.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("invalid attribute regex")
});

static PRE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</\s*pre\s*>").expect("invalid pre regex"));

/// A lexical unit of comment markup.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Literal text, entities not yet decoded.
    Text(&'a str),
    /// Opening (or self-closing) tag.
    Start {
        /// Lower-cased tag name.
        name: String,
        attrs: Attributes,
        /// Tag exactly as written.
        raw: &'a str,
    },
    /// Closing tag.
    End {
        /// Lower-cased tag name.
        name: String,
        raw: &'a str,
    },
    /// Raw content of a `<pre>` block.
    Verbatim(&'a str),
}

/// Tag attributes with lower-cased names, in source order.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Attributes(Vec<(String, String)>);

impl Attributes {
    fn parse(source: &str) -> Self {
        let attrs = ATTR_RE
            .captures_iter(source)
            .map(|caps| {
                let name = caps[1].to_ascii_lowercase();
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map(|m| html_escape::decode_html_entities(m.as_str()).into_owned())
                    .unwrap_or_default();
                (name, value)
            })
            .collect();
        Self(attrs)
    }

    /// Value of the first attribute with the given (lower-case) name.
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Split markup into tokens.
pub(crate) fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(caps) = TAG_RE.captures_at(input, pos) {
        let whole = caps.get(0).unwrap();
        if whole.start() > pos {
            tokens.push(Token::Text(&input[pos..whole.start()]));
        }
        pos = whole.end();

        if caps.name("comment").is_some() {
            continue;
        }

        let name = caps["name"].to_ascii_lowercase();
        let raw = whole.as_str();
        if caps.name("close").is_some() {
            tokens.push(Token::End { name, raw });
            continue;
        }

        let is_pre = name == "pre" && caps.name("selfclose").is_none();
        tokens.push(Token::Start {
            name,
            attrs: Attributes::parse(&caps["attrs"]),
            raw,
        });

        if is_pre {
            // Preformatted content is not tag-translated; an unterminated
            // block runs to the end of the input.
            match PRE_END_RE.find_at(input, pos) {
                Some(end) => {
                    tokens.push(Token::Verbatim(&input[pos..end.start()]));
                    tokens.push(Token::End {
                        name: "pre".to_owned(),
                        raw: end.as_str(),
                    });
                    pos = end.end();
                }
                None => {
                    tokens.push(Token::Verbatim(&input[pos..]));
                    pos = input.len();
                }
            }
        }
    }

    if pos < input.len() {
        tokens.push(Token::Text(&input[pos..]));
    }
    tokens
}
