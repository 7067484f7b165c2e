use std::{path::PathBuf, result::Result as StdResult};

use thiserror::Error;

pub type Result<T> = StdResult<T, Error>;

/// An enum for describing and handling various errors encountered while
/// classifying commits, or writing of changelogs.
#[derive(Debug, Error)]
pub enum Error {
    /// The package descriptor has no usable `bugs` field, so issue references
    /// cannot be linked
    #[error("package descriptor must declare a bugs URL")]
    MissingBugsUrl,

    #[error("failed to parse package descriptor")]
    PackageParse(#[from] serde_json::Error),

    #[error("failed to parse config file: {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unrecognized commit type in config: {0}")]
    UnknownCommitType(String),

    #[error("cannot get current directory")]
    CurrentDir,

    #[error("fatal I/O error")]
    Io(#[from] std::io::Error),

    #[error("failed to convert date to string format")]
    DateFormat(#[from] time::error::Format),
}
