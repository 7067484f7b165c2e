use colored::Color;
use indexmap::IndexMap;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{Error, Result};

/// The commit types recognized in headers like `Fix: ...`
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, EnumString, Display, EnumIter)]
pub enum CommitType {
    Fix,
    Feature,
    Other,
    Docs,
    Internal,
    Tests,
    Revert,
    Release,
}

/// Whether commits of a type show up in the changelog
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Visibility {
    Public,
    Internal,
}

/// The result of classifying a single commit
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Outcome {
    Included,
    Skipped,
    Invalid,
}

impl Outcome {
    pub fn is_included(self) -> bool { self == Outcome::Included }

    pub fn color(self) -> Color {
        match self {
            Outcome::Included => Color::Green,
            Outcome::Skipped => Color::BrightBlack,
            Outcome::Invalid => Color::Red,
        }
    }

    /// The outcome name, wrapped in ANSI color codes when `colors` is set
    pub fn paint(self, colors: bool) -> String {
        if colors {
            format!("\u{1b}[{}m{self}\u{1b}[0m", self.color().to_fg_str())
        } else {
            self.to_string()
        }
    }
}

/// How a commit type is treated in the changelog
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeEntry {
    /// The section title included commits are filed under
    pub label: String,
    pub visibility: Visibility,
}

/// Maps every `CommitType` to its section label and visibility. The order of
/// the table is the order of the sections in a rendered changelog.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeTable {
    entries: IndexMap<CommitType, TypeEntry>,
}

impl Default for TypeTable {
    fn default() -> Self {
        let entries = CommitType::iter()
            .map(|ty| {
                let (label, visibility) = match ty {
                    CommitType::Fix => ("Bug fixes".to_owned(), Visibility::Public),
                    CommitType::Feature => ("Features".to_owned(), Visibility::Public),
                    CommitType::Other => ("Other changes".to_owned(), Visibility::Public),
                    other => (other.to_string(), Visibility::Internal),
                };
                (ty, TypeEntry { label, visibility })
            })
            .collect();

        TypeTable { entries }
    }
}

impl TypeTable {
    /// Looks up a type by the name used in commit headers
    pub fn get(&self, name: &str) -> Option<&TypeEntry> {
        name.parse::<CommitType>()
            .ok()
            .and_then(|ty| self.entries.get(&ty))
    }

    /// Replaces the label and/or visibility of a type
    pub fn set(&mut self, name: &str, label: Option<String>, public: Option<bool>) -> Result<()> {
        let ty = name
            .parse::<CommitType>()
            .map_err(|_| Error::UnknownCommitType(name.to_owned()))?;
        if let Some(entry) = self.entries.get_mut(&ty) {
            if let Some(label) = label {
                entry.label = label;
            }
            if let Some(public) = public {
                entry.visibility = if public {
                    Visibility::Public
                } else {
                    Visibility::Internal
                };
            }
        }
        Ok(())
    }

    /// Classifies a commit by its type alone
    ///
    /// # Example
    ///
    /// ```
    /// # use notelog::{Outcome, TypeTable};
    /// let types = TypeTable::default();
    ///
    /// assert_eq!(types.classify(Some("Fix")), Outcome::Included);
    /// assert_eq!(types.classify(Some("Docs")), Outcome::Skipped);
    /// assert_eq!(types.classify(None), Outcome::Invalid);
    /// ```
    pub fn classify(&self, commit_type: Option<&str>) -> Outcome {
        match commit_type.and_then(|name| self.get(name)) {
            Some(entry) if entry.visibility == Visibility::Public => Outcome::Included,
            Some(_) => Outcome::Skipped,
            None => Outcome::Invalid,
        }
    }

    /// Section labels of the public types, in order
    pub fn public_labels(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(|e| e.visibility == Visibility::Public)
            .map(|e| e.label.as_str())
    }
}
