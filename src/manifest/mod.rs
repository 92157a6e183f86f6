//! Package manifest (`fastly.toml`) and service ID sources

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::Config;

/// Manifest file looked up in the working directory
pub const FILENAME: &str = "fastly.toml";

/// Where a service ID came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env,
    File,
}

/// The subset of `fastly.toml` this CLI reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct File {
    #[serde(default)]
    pub service_id: Option<String>,
}

impl File {
    /// Read the manifest at `path`; a missing file yields an empty manifest.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("error reading {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("error parsing {}", path.display()))
    }
}

/// Service ID candidates from every source
#[derive(Debug, Clone, Default)]
pub struct Data {
    pub env_service_id: Option<String>,
    pub file: File,
}

impl Data {
    /// Load the manifest from the working directory plus environment config
    pub fn load(config: &Config) -> Result<Self> {
        Ok(Self {
            env_service_id: config.service_id.clone(),
            file: File::read(Path::new(FILENAME))?,
        })
    }

    /// Pick the service ID by precedence: flag, then environment, then file.
    /// Empty values count as unset.
    pub fn service_id(&self, flag: Option<&str>) -> Option<(String, Source)> {
        let set = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);

        set(flag)
            .map(|id| (id, Source::Flag))
            .or_else(|| set(self.env_service_id.as_deref()).map(|id| (id, Source::Env)))
            .or_else(|| set(self.file.service_id.as_deref()).map(|id| (id, Source::File)))
    }
}
