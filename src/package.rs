//! Reads the few fields of a `package.json` the changelog needs.

use std::{fs, path::Path, str::FromStr};

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

/// The `package.json` of the project the changelog is generated for
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PackageDescriptor {
    pub name: Option<String>,
    pub version: Option<String>,
    pub bugs: Option<Bugs>,
    pub repository: Option<Repository>,
}

/// `"bugs": "https://..."` or `"bugs": { "url": "https://...", "email": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Bugs {
    Url(String),
    Object {
        url: Option<String>,
        email: Option<String>,
    },
}

/// `"repository": "owner/repo"` or `"repository": { "type": "git", "url": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Repository {
    Url(String),
    Object {
        #[serde(rename = "type")]
        kind: Option<String>,
        url: Option<String>,
    },
}

impl FromStr for PackageDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> { serde_json::from_str(s).map_err(Into::into) }
}

impl PackageDescriptor {
    /// Reads and parses a `package.json` file
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use notelog::PackageDescriptor;
    /// let pkg = PackageDescriptor::from_path("/myproject/package.json").unwrap();
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Reading package descriptor: {:?}", path.as_ref());
        fs::read_to_string(path.as_ref())?.parse()
    }

    /// The issue tracker base URL, without a trailing slash
    ///
    /// # Example
    ///
    /// ```
    /// # use notelog::PackageDescriptor;
    /// let pkg: PackageDescriptor = r#"{ "bugs": "https://github.com/org/repo/issues/" }"#
    ///     .parse()
    ///     .unwrap();
    ///
    /// assert_eq!(pkg.bugs_url(), Some("https://github.com/org/repo/issues"));
    /// ```
    pub fn bugs_url(&self) -> Option<&str> {
        let url = match self.bugs.as_ref()? {
            Bugs::Url(url) => url.as_str(),
            Bugs::Object { url, .. } => url.as_deref()?,
        };
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            None
        } else {
            Some(url)
        }
    }

    /// The browsable repository URL used for commit links
    pub fn repository_url(&self) -> Option<String> {
        let raw = match self.repository.as_ref()? {
            Repository::Url(url) => url.as_str(),
            Repository::Object { url, .. } => url.as_deref()?,
        };
        normalize_repository(raw)
    }
}

fn normalize_repository(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(caps) = regex!(r"^(?:github:)?([\w.-]+)/([\w.-]+)$").captures(raw) {
        return Some(format!("https://github.com/{}/{}", &caps[1], &caps[2]));
    }
    let url = raw.trim_start_matches("git+");
    let url = match url.strip_prefix("git@") {
        Some(rest) => format!("https://{}", rest.replacen(':', "/", 1)),
        None => url.replacen("git://", "https://", 1),
    };
    Some(url.trim_end_matches('/').trim_end_matches(".git").to_owned())
}
