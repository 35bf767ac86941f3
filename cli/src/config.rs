use colabnet_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use colabnet_core::domain::CrawlLimits;
use serde::{Deserialize, Serialize};

/// Sección `[crawler]` de colabnet.toml.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CrawlerConfig {
  pub max_artists: usize,
  pub max_depth: u32,
}

impl Default for CrawlerConfig {
  fn default() -> Self {
    let limits = CrawlLimits::default();
    CrawlerConfig { max_artists: limits.max_artists, max_depth: limits.max_depth }
  }
}

impl CrawlerConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = Self::load_from(&*CONFIG_BACKEND)?;
    CONFIG_BACKEND.save_section("crawler", &cfg)?;
    Ok(cfg)
  }

  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default("crawler")
  }

  /// Los argumentos de línea de comandos mandan sobre el archivo.
  pub fn limits(&self, max_artists: Option<usize>, max_depth: Option<u32>) -> CrawlLimits {
    CrawlLimits {
      max_artists: max_artists.unwrap_or(self.max_artists),
      max_depth: max_depth.unwrap_or(self.max_depth),
    }
  }
}
