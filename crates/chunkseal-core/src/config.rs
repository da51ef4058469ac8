use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ChunksealError, ChunksealResult};
use crate::types::KeySizeClass;

/// Top-level configuration (loaded from chunkseal.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunksealConfig {
    pub log: LogConfig,
    pub codec: CodecConfig,
    pub keys: KeysConfig,
}

impl ChunksealConfig {
    /// Read and parse a TOML config file.
    pub fn from_path(path: &Path) -> ChunksealResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ChunksealError::Config(format!("parsing {}: {e}", path.display())))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: warn)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

/// Chunked codec tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Process chunks on the rayon pool (default: true)
    pub parallel: bool,
    /// Messages with fewer chunks than this are processed sequentially
    pub parallel_min_chunks: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Key size used by `keygen` when --bits is not given
    pub default_bits: KeySizeClass,
    /// Directory for generated key files
    pub key_dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_min_chunks: 8,
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            default_bits: KeySizeClass::Bits2048,
            key_dir: PathBuf::from("~/.config/chunkseal/keys"),
        }
    }
}
