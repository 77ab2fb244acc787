//! Simulator configuration.
//!
//! Read from TOML; every field has a default, so an empty file (or no file)
//! is a valid configuration.
//!
//! ```toml
//! max_qubits = 4
//! seed = 42
//! shots = 2048
//! tolerance = 1e-9
//! log_level = "debug"
//! ```

use crate::error::{QsimError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest register accepted by configuration (2^24 amplitudes ≈ 256 MiB).
pub const QUBIT_CEILING: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Upper clamp for the qubit count of imported circuit documents.
    pub max_qubits: usize,
    /// Fixed RNG seed for reproducible sampling; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Default number of shots for multi-shot runs.
    pub shots: usize,
    /// Numeric tolerance for self-tests and for hiding negligible basis states.
    pub tolerance: f64,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_qubits: 4,
            seed: None,
            shots: 1024,
            tolerance: 1e-9,
            log_level: "info".to_string(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if given, else the default location if it exists, else defaults.
    pub fn load_or_default(cli_path: Option<&Path>) -> Result<Self> {
        match resolve_config_path(cli_path) {
            Some(path) if cli_path.is_some() || path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=QUBIT_CEILING).contains(&self.max_qubits) {
            return Err(QsimError::config(format!(
                "max_qubits must be in 1..={QUBIT_CEILING}, got {}",
                self.max_qubits
            )));
        }
        if self.shots == 0 {
            return Err(QsimError::config("shots must be positive"));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(QsimError::config(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// ~/.carnot-qsim/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::home_dir().map(|h| h.join(".carnot-qsim").join("config.toml"))
}

pub fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    match cli_path {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path(),
    }
}
