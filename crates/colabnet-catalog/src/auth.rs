use std::time::{Duration, Instant};

use colabnet_core::ports::CatalogError;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::Credentials;

// Se renueva un poco antes de que caduque para no usar un token a punto de expirar.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
  access_token: String,
  expires_in: u64,
}

struct AccessToken {
  value: String,
  expires_at: Instant,
}

impl AccessToken {
  fn is_fresh(&self) -> bool {
    Instant::now() + EXPIRY_MARGIN < self.expires_at
  }
}

/// Token de app (client credentials) cacheado hasta que caduca.
pub struct ClientCredentialsAuth {
  http: reqwest::Client,
  token_url: String,
  credentials: Credentials,
  cached: Mutex<Option<AccessToken>>,
}

impl ClientCredentialsAuth {
  pub fn new(http: reqwest::Client, token_url: impl Into<String>, credentials: Credentials) -> Self {
    Self { http, token_url: token_url.into(), credentials, cached: Mutex::new(None) }
  }

  /// Devuelve un token válido, pidiendo uno nuevo si hace falta.
  pub async fn bearer(&self) -> Result<String, CatalogError> {
    let mut cached = self.cached.lock().await;

    if let Some(token) = cached.as_ref() {
      if token.is_fresh() {
        return Ok(token.value.clone());
      }
    }

    let token = self.fetch().await?;
    let value = token.value.clone();
    *cached = Some(token);
    Ok(value)
  }

  /// Olvida el token actual (p. ej. tras un 401).
  pub async fn invalidate(&self) {
    *self.cached.lock().await = None;
  }

  async fn fetch(&self) -> Result<AccessToken, CatalogError> {
    let resp = self
      .http
      .post(&self.token_url)
      .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
      .form(&[("grant_type", "client_credentials")])
      .send()
      .await
      .map_err(|e| CatalogError::Transport(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(CatalogError::Auth(format!("token request failed ({status}): {body}")));
    }

    let token: TokenResponse = resp.json().await.map_err(|e| CatalogError::Decode(e.to_string()))?;
    debug!(expires_in = token.expires_in, "new catalog access token");

    Ok(AccessToken {
      value: token.access_token,
      expires_at: Instant::now() + Duration::from_secs(token.expires_in),
    })
  }
}
