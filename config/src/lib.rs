//! Configuration loading and parsing for vlint.
//!
//! Configuration is a TOML file (`vlint.toml`) with one table per tool plus
//! workspace-wide language standard selections. The orchestrator reads the
//! configuration at dispatch time, so edits take effect on the next lint
//! without a restart.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

use vlint_types::{SystemVerilogStandard, VerilogStandard};

/// Error loading or parsing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Top-level vlint configuration.
#[derive(Debug, Default, Deserialize)]
pub struct LintConfig {
    /// Verilog revision used for `.v` documents.
    #[serde(default)]
    pub verilog_standard: VerilogStandard,
    /// SystemVerilog revision used for `.sv` documents.
    #[serde(default)]
    pub systemverilog_standard: SystemVerilogStandard,
    /// Per-tool settings, keyed by tool name.
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Shell override for shell-based executable lookup.
    pub shell: Option<ShellConfig>,
}

/// One table per registered tool.
///
/// Icarus Verilog is the baseline tool and starts enabled; everything else
/// is opt-in.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub iverilog: ToolConfig,
    pub verilator: ToolConfig,
    pub slang: ToolConfig,
    pub xvlog: ToolConfig,
    pub modelsim: ToolConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            iverilog: ToolConfig {
                enabled: true,
                ..ToolConfig::default()
            },
            verilator: ToolConfig::default(),
            slang: ToolConfig::default(),
            xvlog: ToolConfig::default(),
            modelsim: ToolConfig::default(),
        }
    }
}

impl ToolsConfig {
    /// Look up a tool table by name. Names match the adapter identifiers.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolConfig> {
        match name {
            "iverilog" => Some(&self.iverilog),
            "verilator" => Some(&self.verilator),
            "slang" => Some(&self.slang),
            "xvlog" => Some(&self.xvlog),
            "modelsim" => Some(&self.modelsim),
            _ => None,
        }
    }
}

/// Settings for a single lint tool.
///
/// ```toml
/// [tools.iverilog]
/// enabled = true
/// path = "/usr/local/bin/iverilog"
/// args = ["-y", "rtl/lib"]
/// include_dirs = ["rtl/include"]
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ToolConfig {
    /// Whether this tool runs as part of a whole-document lint.
    #[serde(default)]
    pub enabled: bool,
    /// Explicit executable path. When absent the engine resolves the
    /// tool's bare command name on the host.
    pub path: Option<PathBuf>,
    /// Extra arguments appended after the adapter-built ones.
    #[serde(default)]
    pub args: Vec<String>,
    /// Include directories passed in the tool's own flag syntax.
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
}

/// Shell override for command lookup.
///
/// ```toml
/// [shell]
/// binary = "bash"
/// args = ["-c"]
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ShellConfig {
    /// Override shell binary (e.g., "pwsh", "bash", "/usr/local/bin/fish").
    pub binary: Option<String>,
    /// Override shell args (e.g., `["-c"]` or `["/C"]`).
    pub args: Option<Vec<String>>,
}

impl LintConfig {
    /// Load configuration from the default lookup path.
    ///
    /// Returns `Ok(None)` when no config file exists; callers fall back
    /// to [`LintConfig::default`].
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = Self::path() else {
            return Ok(None);
        };
        Self::load_from(&path).map(Some)
    }

    /// Load configuration from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// Default config path: `VLINT_CONFIG` env var, else `./vlint.toml`
    /// if present.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        if let Ok(path) = env::var("VLINT_CONFIG") {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from("vlint.toml");
        local.exists().then_some(local)
    }
}
