use colabnet_config::{CONFIG_BACKEND, ConfigBackend, ConfigError, PATHS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sección `[storage]`: dónde viven los dos almacenes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
  pub nodes_path: PathBuf,
  pub edges_path: PathBuf,
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig { nodes_path: PATHS.data_dir.join("nodes.csv"), edges_path: PATHS.data_dir.join("edges.csv") }
  }
}

impl StorageConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = Self::load_from(&*CONFIG_BACKEND)?;
    CONFIG_BACKEND.save_section("storage", &cfg)?;
    Ok(cfg)
  }

  /// Variante para tests: inyectar un backend distinto.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default("storage")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use colabnet_config::{ColabnetPaths, TomlConfigBackend};
  use std::fs;
  use tempfile::tempdir;

  #[test]
  fn section_with_one_key_keeps_the_other_default() {
    let tmp = tempdir().unwrap();
    let paths = ColabnetPaths::from_base(tmp.path()).unwrap();
    fs::write(paths.config_file(), "[storage]\nnodes_path = \"/tmp/n.csv\"\n").unwrap();

    let cfg = StorageConfig::load_from(&TomlConfigBackend::new(paths)).unwrap();

    assert_eq!(cfg.nodes_path, PathBuf::from("/tmp/n.csv"));
    assert_eq!(cfg.edges_path, StorageConfig::default().edges_path);
  }
}
