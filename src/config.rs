//! Configuration for PulseLake
//!
//! Connection and storage settings are read from a JSON config file; the
//! target environment selects the catalog the warehouse is provisioned into.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Deployment environment the tool runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development catalog
    #[default]
    Dev,
    /// Test catalog
    Test,
    /// Production catalog
    Prod,
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dev" => Ok(Environment::Dev),
            "test" => Ok(Environment::Test),
            "prod" => Ok(Environment::Prod),
            other => Err(Error::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Dev => write!(f, "dev"),
            Environment::Test => write!(f, "test"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

/// Warehouse configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Engine endpoint, e.g. `pulse://localhost:7171/warehouse`
    pub engine_url: String,
    /// Root of the data storage area; the landing zone lives under it
    pub data_root: String,
    /// Root of the checkpoint storage area
    pub checkpoint_root: String,
    /// Explicit catalog name; defaults to `fitness-{env}` when absent
    #[serde(default)]
    pub catalog: Option<String>,
    /// Target environment
    #[serde(default)]
    pub env: Environment,
}

impl WarehouseConfig {
    /// Create a config with the required fields
    pub fn new(
        engine_url: impl Into<String>,
        data_root: impl Into<String>,
        checkpoint_root: impl Into<String>,
    ) -> Self {
        Self {
            engine_url: engine_url.into(),
            data_root: data_root.into(),
            checkpoint_root: checkpoint_root.into(),
            catalog: None,
            env: Environment::default(),
        }
    }

    /// Load a config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Set the target environment
    pub fn environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// The catalog the warehouse is provisioned into
    pub fn catalog_name(&self) -> String {
        self.catalog
            .clone()
            .unwrap_or_else(|| format!("fitness-{}", self.env))
    }

    /// The landing zone the ingest jobs write raw files into
    pub fn landing_zone(&self) -> PathBuf {
        Path::new(&self.data_root).join("raw")
    }

    /// The base directory holding stream checkpoints
    pub fn checkpoint_base(&self) -> PathBuf {
        Path::new(&self.checkpoint_root).join("checkpoints")
    }
}
