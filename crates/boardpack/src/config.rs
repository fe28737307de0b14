use crate::{GenerateError, Result};
use boardpack_core::ResolveOptions;
use boardpack_render::LayoutOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ASSETS_DIR: &str = "assets/diagrams";

/// Everything a packet generation run can be tuned with. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacketConfig {
    pub resolve: ResolveOptions,
    pub layout: LayoutOptions,
    pub assets_dir: PathBuf,
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            resolve: ResolveOptions::default(),
            layout: LayoutOptions::default(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

impl PacketConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GenerateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
