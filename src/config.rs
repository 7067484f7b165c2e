use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    link_style::LinkStyle,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCfg {
    #[serde(default)]
    pub notelog: RawNotelogCfg,
    #[serde(default)]
    pub types: IndexMap<String, RawTypeCfg>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawNotelogCfg {
    pub package: Option<String>,
    pub display_logs: bool,
    pub repository: Option<String>,
    pub link_style: LinkStyle,
}

impl Default for RawNotelogCfg {
    fn default() -> Self {
        RawNotelogCfg {
            package: None,
            display_logs: true,
            repository: None,
            link_style: LinkStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTypeCfg {
    pub label: Option<String>,
    pub public: Option<bool>,
}

impl RawCfg {
    pub fn from_file(path: &Path) -> Result<Self> {
        let toml_s = fs::read_to_string(path)?;
        toml::from_str(&toml_s).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
