//! Classifies conventional commits for a changelog.
//!
//! A [`Classifier`] decides whether each commit belongs in the release notes,
//! links issue and user references in its subject and notes, and reports the
//! decision through an injected [`Logger`]. Included commits can then be
//! grouped with [`SectionMap`] and rendered by a [`fmt::FormatWriter`].

#[macro_use]
mod macros;
mod classifier;
pub mod commit;
mod commit_type;
mod config;
pub mod error;
pub mod fmt;
pub mod link_style;
mod logger;
pub mod package;
pub mod parser;
mod sectionmap;

pub use classifier::Classifier;
pub use commit::{Commit, Note, Reference};
pub use commit_type::{CommitType, Outcome, TypeEntry, TypeTable, Visibility};
pub use link_style::LinkStyle;
pub use logger::Logger;
pub use package::PackageDescriptor;
pub use sectionmap::SectionMap;

// The default config file
const DEFAULT_CONFIG_FILE: &str = ".notelog.toml";

// The default package descriptor, relative to the config file
const DEFAULT_PACKAGE_FILE: &str = "package.json";
