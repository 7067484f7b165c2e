use serde::{Deserialize, Serialize};

/// The note title every breaking change annotation is grouped under
pub const BREAKING_CHANGES: &str = "BREAKING CHANGES";

/// The struct representation of a `Commit` as produced by a conventional
/// commit parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    /// The full revision hash
    pub hash: String,
    /// The first line of the commit message
    pub header: String,
    /// The commit type, or `None` when the header is not `<Type>: <Subject>`
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// The commit subject
    pub subject: Option<String>,
    /// Extended description between the header and the footer
    pub body: Option<String>,
    /// Trailing block holding notes and issue references
    pub footer: Option<String>,
    /// Structured annotations found in the footer
    pub notes: Vec<Note>,
    /// Issue mentions found in the footer
    pub references: Vec<Reference>,
}

/// A footer annotation such as `BREAKING CHANGE: ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub text: String,
}

impl Note {
    pub fn new<S: Into<String>, T: Into<String>>(title: S, text: T) -> Self {
        Note {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// An issue mentioned in the footer, e.g. `Closes #12`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    /// The closing keyword, if any
    pub action: Option<String>,
    /// The issue number without its prefix
    pub issue: String,
    /// The text the reference was found in
    pub raw: String,
    pub prefix: String,
}

/// A convienience type for multiple commits
pub type Commits = Vec<Commit>;

/// Maps the singular breaking change title onto the plural one so both land
/// in the same group.
pub fn normalize_note_title(title: &str) -> &str {
    match title {
        "BREAKING CHANGE" => BREAKING_CHANGES,
        other => other,
    }
}

/// The first seven characters of a revision hash
pub fn short_hash(hash: &str) -> &str {
    match hash.char_indices().nth(7) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

impl Commit {
    pub fn short_hash(&self) -> &str { short_hash(&self.hash) }
}
