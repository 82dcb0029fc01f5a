//! FVFG configuration file (fvfg.toml)
//!
//! ```toml
//! [tables]
//! dir = "state-views"
//! group_size = 8
//!
//! [transform]
//! order = 21
//! ```
//!
//! A relative `tables.dir` is resolved against the directory holding the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FvfgError, FvfgResult};
use crate::store;
use crate::tables::{check_group_size, StateTables};
use crate::transform::{BatchContext, MAX_ORDER};

/// Default config file name
pub const CONFIG_FILE: &str = "fvfg.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FvfgConfig {
    /// Where the state views live
    #[serde(default)]
    pub tables: TablesConfig,

    /// Transform parameters
    #[serde(default)]
    pub transform: TransformConfig,
}

/// `[tables]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablesConfig {
    /// Directory holding `CHM_<g>.bin` and friends
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Group size the views were generated for
    #[serde(default = "default_group_size")]
    pub group_size: u32,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            group_size: default_group_size(),
        }
    }
}

/// `[transform]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Bits per coordinate axis
    #[serde(default = "default_order")]
    pub order: u32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("state-views")
}

fn default_group_size() -> u32 {
    8
}

fn default_order() -> u32 {
    21
}

impl FvfgConfig {
    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> FvfgResult<Self> {
        toml::from_str(content)
            .map_err(|e| FvfgError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))
    }

    /// Load configuration from a file, resolving `tables.dir` against its parent
    pub fn from_file(path: &Path) -> FvfgResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FvfgError::io(path, e))?;
        let mut config = Self::from_str(&content)?;

        if config.tables.dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.tables.dir = parent.join(&config.tables.dir);
            }
        }

        tracing::debug!(path = %path.display(), tables = %config.tables.dir.display(), "config loaded");
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_string(&self) -> FvfgResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| FvfgError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Range-check order and group size without touching any table
    pub fn validate(&self) -> FvfgResult<()> {
        check_group_size(self.tables.group_size)?;
        let order = self.transform.order;
        if order == 0 || order > MAX_ORDER {
            return Err(FvfgError::InvalidParameter(format!(
                "order {} outside [1, {}]",
                order, MAX_ORDER
            )));
        }
        Ok(())
    }

    /// Load the configured state views
    pub fn load_tables(&self) -> FvfgResult<StateTables> {
        self.validate()?;
        store::load_dir(&self.tables.dir, self.tables.group_size)
    }

    pub fn encode_context(&self, tables: &StateTables) -> FvfgResult<BatchContext> {
        BatchContext::for_encode(self.transform.order, self.tables.group_size, tables)
    }

    pub fn decode_context(&self, tables: &StateTables) -> FvfgResult<BatchContext> {
        BatchContext::for_decode(self.transform.order, self.tables.group_size, tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FvfgConfig::default();
        assert_eq!(config.tables.dir, PathBuf::from("state-views"));
        assert_eq!(config.tables.group_size, 8);
        assert_eq!(config.transform.order, 21);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full() {
        let config = FvfgConfig::from_str(
            r#"
[tables]
dir = "/opt/views"
group_size = 4

[transform]
order = 16
"#,
        )
        .unwrap();
        assert_eq!(config.tables.dir, PathBuf::from("/opt/views"));
        assert_eq!(config.tables.group_size, 4);
        assert_eq!(config.transform.order, 16);
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let config = FvfgConfig::from_str("[transform]\norder = 9\n").unwrap();
        assert_eq!(config.transform.order, 9);
        assert_eq!(config.tables.group_size, 8);

        let empty = FvfgConfig::from_str("").unwrap();
        assert_eq!(empty, FvfgConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let result = FvfgConfig::from_str("[tables]\ngroup_size = \"eight\"\n");
        assert!(matches!(result, Err(FvfgError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_ranges() {
        let mut config = FvfgConfig::default();
        config.transform.order = 33;
        assert!(matches!(config.validate(), Err(FvfgError::InvalidParameter(_))));

        let mut config = FvfgConfig::default();
        config.tables.group_size = 0;
        assert!(matches!(config.validate(), Err(FvfgError::InvalidParameter(_))));
    }

    #[test]
    fn test_to_string_roundtrip() {
        let config = FvfgConfig::default();
        let text = config.to_string().unwrap();
        assert!(text.contains("group_size = 8"));
        assert_eq!(FvfgConfig::from_str(&text).unwrap(), config);
    }

    #[test]
    fn test_from_file_resolves_relative_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[tables]\ndir = \"views\"\ngroup_size = 1\n").unwrap();

        let config = FvfgConfig::from_file(&path).unwrap();
        assert_eq!(config.tables.dir, dir.path().join("views"));
    }

    #[test]
    fn test_load_tables_from_config() {
        let dir = tempfile::tempdir().unwrap();
        store::save_dir(&crate::tables::tests::unit_tables(), dir.path()).unwrap();

        let config = FvfgConfig {
            tables: TablesConfig {
                dir: dir.path().to_path_buf(),
                group_size: 1,
            },
            transform: TransformConfig { order: 5 },
        };
        let tables = config.load_tables().unwrap();
        let ctx = config.encode_context(&tables).unwrap();
        assert_eq!(ctx.group_num(), 5);
        assert!(config.decode_context(&tables).is_ok());
    }
}
