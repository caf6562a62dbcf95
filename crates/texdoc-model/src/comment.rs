//! Segmented comments and cross-references.

use serde::Deserialize;

/// Marker text used when the model does not carry the original marker.
const INHERIT_DOC_MARKER: &str = "{@inheritDoc}";

/// One element of a parsed comment, in reading order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommentTag {
    /// Free text, possibly containing HTML-like markup.
    Text {
        /// Raw text run.
        text: String,
    },
    /// Inline cross-reference (`{@link ..}` / `{@see ..}`).
    See(SeeReference),
    /// Request to copy the documentation of the overridden member.
    InheritDoc {
        /// Raw marker text as written in the source.
        #[serde(default = "default_inherit_marker")]
        text: String,
    },
    /// Inline tag the engine does not understand.
    Unknown {
        /// Tag name, e.g. `@code`.
        name: String,
        /// Raw tag text.
        #[serde(default)]
        text: String,
    },
}

fn default_inherit_marker() -> String {
    INHERIT_DOC_MARKER.to_owned()
}

impl CommentTag {
    /// Create a text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an inherit marker with the conventional marker text.
    #[must_use]
    pub fn inherit_doc() -> Self {
        Self::InheritDoc {
            text: default_inherit_marker(),
        }
    }
}

/// Ordered sequence of comment tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Comment(Vec<CommentTag>);

impl Comment {
    /// Create an empty comment.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Tags in reading order.
    #[must_use]
    pub fn tags(&self) -> &[CommentTag] {
        &self.0
    }

    /// Whether the comment has no content a reader would see.
    ///
    /// Only whitespace text runs count as empty; any other tag is content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|tag| match tag {
            CommentTag::Text { text } => text.trim().is_empty(),
            _ => false,
        })
    }
}

impl From<Vec<CommentTag>> for Comment {
    fn from(tags: Vec<CommentTag>) -> Self {
        Self(tags)
    }
}

impl From<&str> for Comment {
    fn from(text: &str) -> Self {
        Self(vec![CommentTag::text(text)])
    }
}

/// What a cross-reference points at.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SeeTarget {
    /// A package, by name.
    Package(String),
    /// A type, by qualified name.
    Type(String),
    /// Free-form reference (plain text or an HTML link).
    FreeForm,
}

/// A `@see`-style cross-reference.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSeeReference")]
pub struct SeeReference {
    /// Display text as written by the author.
    pub text: String,
    /// Referenced entity.
    pub target: SeeTarget,
}

impl SeeReference {
    /// Reference to a package.
    pub fn package(text: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: SeeTarget::Package(name.into()),
        }
    }

    /// Reference to a type.
    pub fn type_ref(text: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: SeeTarget::Type(qualified_name.into()),
        }
    }

    /// Free-form reference.
    pub fn free_form(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: SeeTarget::FreeForm,
        }
    }
}

/// Wire shape of a reference; at most one target may be set.
#[derive(Deserialize)]
struct RawSeeReference {
    #[serde(default)]
    text: String,
    package: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
}

impl TryFrom<RawSeeReference> for SeeReference {
    type Error = String;

    fn try_from(raw: RawSeeReference) -> Result<Self, Self::Error> {
        let target = match (raw.package, raw.type_name) {
            (Some(_), Some(_)) => {
                return Err(format!(
                    "see reference '{}' names both a package and a type",
                    raw.text
                ));
            }
            (Some(package), None) => SeeTarget::Package(package),
            (None, Some(type_name)) => SeeTarget::Type(type_name),
            (None, None) => SeeTarget::FreeForm,
        };
        Ok(Self {
            text: raw.text,
            target,
        })
    }
}

/// Block tag attached to an entity (`@texignore`, `@since`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BlockTag {
    /// Tag name including the `@`.
    pub name: String,
    /// Tag text.
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_comment_tags_in_order() {
        let json = r#"[
            {"kind": "text", "text": "Adds "},
            {"kind": "see", "text": "Foo", "type": "p.Foo"},
            {"kind": "inherit_doc"},
            {"kind": "unknown", "name": "@code", "text": "x"}
        ]"#;
        let comment: Comment = serde_json::from_str(json).unwrap();

        assert_eq!(
            comment.tags(),
            &[
                CommentTag::text("Adds "),
                CommentTag::See(SeeReference::type_ref("Foo", "p.Foo")),
                CommentTag::inherit_doc(),
                CommentTag::Unknown {
                    name: "@code".to_owned(),
                    text: "x".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_see_reference_targets() {
        let package: SeeReference =
            serde_json::from_str(r#"{"text": "java.util", "package": "java.util"}"#).unwrap();
        assert_eq!(package.target, SeeTarget::Package("java.util".to_owned()));

        let free: SeeReference =
            serde_json::from_str(r#"{"text": "<a href=\"x\">x</a>"}"#).unwrap();
        assert_eq!(free.target, SeeTarget::FreeForm);
    }

    #[test]
    fn test_see_reference_rejects_two_targets() {
        let result: Result<SeeReference, _> =
            serde_json::from_str(r#"{"text": "x", "package": "p", "type": "p.X"}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("both a package and a type"));
    }

    #[test]
    fn test_blank_comment() {
        assert!(Comment::new().is_blank());
        assert!(Comment::from("  \n ").is_blank());
        assert!(!Comment::from("text").is_blank());
        assert!(!Comment::from(vec![CommentTag::inherit_doc()]).is_blank());
    }
}
