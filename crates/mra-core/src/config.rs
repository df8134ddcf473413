//! Configuration types and parsing for mra.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted `cube.max_grouping_keys`
const GROUPING_KEY_CEILING: usize = 30;

/// Engine configuration from mra.yml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Cube construction settings
    #[serde(default)]
    pub cube: CubeConfig,

    /// Slice selection settings
    #[serde(default)]
    pub select: SelectConfig,
}

/// Settings for `CreateRelationSpaceByCube`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CubeConfig {
    /// Maximum number of grouping keys a full cube may enumerate (2^k sets)
    #[serde(default = "default_max_grouping_keys")]
    pub max_grouping_keys: usize,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            max_grouping_keys: default_max_grouping_keys(),
        }
    }
}

fn default_max_grouping_keys() -> usize {
    16
}

/// Settings for `SliceSelect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectConfig {
    /// Keep the global (empty) region regardless of the predicate
    #[serde(default = "default_true")]
    pub retain_global_region: bool,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            retain_global_region: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: EngineConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for mra.yml or mra.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("mra.yml");
        let yaml_path = dir.join("mra.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        let max = self.cube.max_grouping_keys;
        if max == 0 || max > GROUPING_KEY_CEILING {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "cube.max_grouping_keys must be between 1 and {GROUPING_KEY_CEILING}, got {max}"
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
