use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Language assigned when a create request omits `language`.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Style assigned when a create request omits `style`.
pub const DEFAULT_STYLE: &str = "friendly";

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// Accepted values for `Snippet::language`.
pub const LANGUAGE_CHOICES: &[&str] = &[
    "bash",
    "c",
    "cpp",
    "csharp",
    "css",
    "diff",
    "go",
    "haskell",
    "html",
    "java",
    "javascript",
    "json",
    "kotlin",
    "lua",
    "make",
    "markdown",
    "perl",
    "php",
    "python",
    "python3",
    "ruby",
    "rust",
    "scala",
    "sql",
    "swift",
    "text",
    "toml",
    "typescript",
    "xml",
    "yaml",
];

/// Accepted values for `Snippet::style`.
pub const STYLE_CHOICES: &[&str] = &[
    "autumn",
    "borland",
    "colorful",
    "default",
    "emacs",
    "friendly",
    "fruity",
    "manni",
    "monokai",
    "murphy",
    "native",
    "pastie",
    "perldoc",
    "solarized-dark",
    "solarized-light",
    "tango",
    "trac",
    "vim",
    "vs",
    "xcode",
];

/// Whether `value` is one of [`LANGUAGE_CHOICES`].
pub fn is_language(value: &str) -> bool {
    LANGUAGE_CHOICES.contains(&value)
}

/// Whether `value` is one of [`STYLE_CHOICES`].
pub fn is_style(value: &str) -> bool {
    STYLE_CHOICES.contains(&value)
}

/// Store-assigned snippet identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(pub i64);

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SnippetId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A stored code excerpt with language/style metadata.
///
/// `owner` carries the owning user's username for the wire format; the
/// foreign key itself (`owner_id`) is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub created: DateTime<Utc>,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    #[serde(skip)]
    pub owner_id: Option<UserId>,
    pub owner: Option<String>,
}

/// A validated snippet ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSnippet {
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    pub owner_id: Option<UserId>,
}

/// Validated field values from a create or update payload.
///
/// `None` means the field was absent from the payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetChanges {
    pub title: Option<String>,
    pub code: Option<String>,
    pub linenos: Option<bool>,
    pub language: Option<String>,
    pub style: Option<String>,
}

impl SnippetChanges {
    /// Build an insertable snippet, filling absent fields with defaults.
    ///
    /// `code` has no default; create-time validation guarantees it is present.
    pub fn into_new(self, owner_id: Option<UserId>) -> NewSnippet {
        NewSnippet {
            title: self.title.unwrap_or_default(),
            code: self.code.unwrap_or_default(),
            linenos: self.linenos.unwrap_or(false),
            language: self
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            style: self.style.unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            owner_id,
        }
    }

    /// Overwrite the fields present in `self` onto an existing snippet.
    pub fn apply_to(self, snippet: &mut Snippet) {
        if let Some(title) = self.title {
            snippet.title = title;
        }
        if let Some(code) = self.code {
            snippet.code = code;
        }
        if let Some(linenos) = self.linenos {
            snippet.linenos = linenos;
        }
        if let Some(language) = self.language {
            snippet.language = language;
        }
        if let Some(style) = self.style {
            snippet.style = style;
        }
    }
}
