mod md_writer;

use time::{Date, OffsetDateTime};

pub use self::md_writer::MarkdownWriter;
use crate::{error::Result, link_style::LinkStyle, sectionmap::SectionMap};

/// The release a changelog entry is written for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: String,
    pub date: Date,
    /// The repository used for the base of commit links
    pub repository: Option<String>,
    pub link_style: LinkStyle,
}

impl Release {
    /// Creates a release dated today (UTC)
    pub fn new<S: Into<String>>(version: S) -> Self {
        Release {
            version: version.into(),
            date: OffsetDateTime::now_utc().date(),
            repository: None,
            link_style: LinkStyle::default(),
        }
    }

    pub fn date(mut self, date: Date) -> Self {
        self.date = date;
        self
    }

    pub fn repository(mut self, repository: Option<String>) -> Self {
        self.repository = repository;
        self
    }

    pub fn link_style(mut self, link_style: LinkStyle) -> Self {
        self.link_style = link_style;
        self
    }
}

/// A trait that allows writing the included commits of a release in an
/// arbitrary format. The single required function `write_changelog()`
/// accepts a `notelog::SectionMap` which can be thought of similiar to a
/// changelog "AST" of sorts.
///
/// `notelog` provides `notelog::fmt::MarkdownWriter` as the default
/// implementor of this trait
pub trait FormatWriter {
    fn write_changelog(&mut self, release: &Release, section_map: &SectionMap) -> Result<()>;
}

/// Shifts every non-empty line right by two spaces so the block nests under a
/// list item, keeping the relative indentation of its lines.
pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indents a block unless all of its lines already are, which is the case
/// for unwrapped merge commit bodies.
pub(crate) fn nest(text: &str) -> String {
    let nested = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .all(|line| line.starts_with("  "));
    if nested {
        text.to_owned()
    } else {
        indent(text)
    }
}
