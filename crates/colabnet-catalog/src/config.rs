use std::fmt;
use std::time::Duration;

use colabnet_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use colabnet_core::ports::CatalogError;
use serde::{Deserialize, Serialize};

pub const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";

/// Sección `[catalog]` de colabnet.toml.
///
/// Las credenciales NO van aquí: se leen del entorno (ver [`Credentials`]).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
  /// Pausa mínima entre dos peticiones al catálogo (ms). 0 desactiva el ritmo.
  pub request_interval_ms: u64,

  /// Tipos de lanzamiento a recorrer (`album`, `single`, `appears_on`, `compilation`).
  pub album_groups: Vec<String>,

  /// Mercado ISO 3166-1 opcional para los listados.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub market: Option<String>,

  pub api_base_url: String,

  pub token_url: String,

  pub timeout_secs: u64,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    CatalogConfig {
      request_interval_ms: 1000,
      album_groups: vec!["album".into()],
      market: None,
      api_base_url: "https://api.spotify.com/v1".into(),
      token_url: "https://accounts.spotify.com/api/token".into(),
      timeout_secs: 10,
    }
  }
}

impl CatalogConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = Self::load_from(&*CONFIG_BACKEND)?;
    CONFIG_BACKEND.save_section("catalog", &cfg)?;
    Ok(cfg)
  }

  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default("catalog")
  }

  pub fn request_interval(&self) -> Duration {
    Duration::from_millis(self.request_interval_ms)
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  /// `include_groups` tal y como lo espera la API.
  pub fn include_groups(&self) -> String {
    self.album_groups.join(",")
  }
}

/// Credenciales de la app (flujo client credentials).
#[derive(Clone)]
pub struct Credentials {
  pub client_id: String,
  pub client_secret: String,
}

impl Credentials {
  pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
    Self { client_id: client_id.into(), client_secret: client_secret.into() }
  }

  /// Lee `SPOTIFY_CLIENT_ID` y `SPOTIFY_CLIENT_SECRET`.
  pub fn from_env() -> Result<Self, CatalogError> {
    let read = |key: &str| match std::env::var(key) {
      Ok(v) if !v.trim().is_empty() => Ok(v),
      _ => Err(CatalogError::Auth(format!("missing environment variable {key}"))),
    };
    Ok(Self::new(read(CLIENT_ID_ENV)?, read(CLIENT_SECRET_ENV)?))
  }
}

// Nunca imprimir el secreto en logs.
impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials").field("client_id", &self.client_id).field("client_secret", &"***").finish()
  }
}
