use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::StatusCode;
use reqwest::header::{HeaderValue, RETRY_AFTER};
use serde::de::DeserializeOwned;
use tracing::{trace, warn};

use colabnet_core::domain::{AlbumId, AlbumSummary, ArtistId, ArtistProfile, Page, PageCursor, TrackSummary};
use colabnet_core::ports::{CatalogError, CatalogGateway};

use crate::auth::ClientCredentialsAuth;
use crate::config::{CatalogConfig, Credentials};
use crate::mapping::{ArtistObject, Paging, SearchResponse, SimplifiedAlbum, SimplifiedTrack};

/// Máximo que permite la API para listados de álbumes y pistas.
const PAGE_LIMIT: &str = "50";

/// Implementación de `CatalogGateway` sobre la Spotify Web API.
///
/// Todas las peticiones pasan por un rate limiter con una sola ranura cada
/// `request_interval`, así que nunca salen dos seguidas sin la pausa mínima.
/// No reintenta: un 429 se devuelve como `CatalogError::RateLimited`.
pub struct SpotifyGateway {
  http: reqwest::Client,
  auth: ClientCredentialsAuth,
  config: CatalogConfig,
  limiter: Option<DefaultDirectRateLimiter>,
}

impl SpotifyGateway {
  pub fn new(config: CatalogConfig, credentials: Credentials) -> Result<Self, CatalogError> {
    let http = reqwest::Client::builder()
      .timeout(config.timeout())
      .build()
      .map_err(|e| CatalogError::Transport(e.to_string()))?;

    let auth = ClientCredentialsAuth::new(http.clone(), config.token_url.clone(), credentials);
    // `with_period` devuelve None para 0 ms: sin ritmo.
    let limiter = Quota::with_period(config.request_interval()).map(RateLimiter::direct);

    Ok(Self { http, auth, config, limiter })
  }

  async fn pace(&self) {
    if let Some(limiter) = &self.limiter {
      limiter.until_ready().await;
    }
  }

  /// GET con token. `Ok(None)` para 404.
  async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<Option<T>, CatalogError> {
    self.pace().await;
    let token = self.auth.bearer().await?;

    trace!(url, "catalog request");
    let resp = self
      .http
      .get(url)
      .bearer_auth(token)
      .query(query)
      .send()
      .await
      .map_err(|e| CatalogError::Transport(e.to_string()))?;

    let status = resp.status();
    if status.is_success() {
      return resp.json::<T>().await.map(Some).map_err(|e| CatalogError::Decode(format!("{url}: {e}")));
    }

    let retry_after = resp.headers().get(RETRY_AFTER).cloned();
    let Some(err) = map_status(status, retry_after.as_ref(), url) else {
      return Ok(None);
    };

    match &err {
      CatalogError::Auth(_) => self.auth.invalidate().await,
      CatalogError::RateLimited { retry_after_secs } => {
        warn!(url, retry_after_secs, "catalog is throttling requests");
      }
      _ => {}
    }
    Err(err)
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.config.api_base_url.trim_end_matches('/'), path)
  }

  /// Los cursores son la URL `next` que da la API. Solo se aceptan si apuntan
  /// a la misma API (llevan nuestro token).
  fn cursor_url(&self, cursor: &PageCursor) -> Result<String, CatalogError> {
    let url = cursor.as_str();
    if !url.starts_with(self.config.api_base_url.trim_end_matches('/')) {
      return Err(CatalogError::Decode(format!("foreign page cursor: {url}")));
    }
    Ok(url.to_string())
  }

  fn listing_query(&self, extra: Option<(&'static str, String)>) -> Vec<(&'static str, String)> {
    let mut query = vec![("limit", PAGE_LIMIT.to_string())];
    query.extend(extra);
    if let Some(market) = &self.config.market {
      query.push(("market", market.clone()));
    }
    query
  }
}

/// Traduce una respuesta no exitosa. `None` es un 404: el recurso no existe.
fn map_status(status: StatusCode, retry_after: Option<&HeaderValue>, url: &str) -> Option<CatalogError> {
  let err = match status {
    StatusCode::NOT_FOUND => return None,
    StatusCode::BAD_REQUEST => CatalogError::InvalidId(url.to_string()),
    StatusCode::UNAUTHORIZED => CatalogError::Auth(format!("unauthorized: {url}")),
    StatusCode::TOO_MANY_REQUESTS => {
      let retry_after_secs =
        retry_after.and_then(|v| v.to_str().ok()).and_then(|v| v.trim().parse().ok()).unwrap_or(1);
      CatalogError::RateLimited { retry_after_secs }
    }
    other => CatalogError::Transport(format!("{other} from {url}")),
  };
  Some(err)
}

/// Los ids de Spotify son base62.
fn validate_id(id: &str) -> Result<(), CatalogError> {
  if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
    return Err(CatalogError::InvalidId(id.to_string()));
  }
  Ok(())
}

#[async_trait]
impl CatalogGateway for SpotifyGateway {
  async fn search_artist(&self, name: &str) -> Result<Option<ArtistProfile>, CatalogError> {
    let query = [("q", format!("artist:{name}")), ("type", "artist".to_string()), ("limit", "1".to_string())];

    let resp: Option<SearchResponse> = self.get_json(&self.url("search"), &query).await?;
    Ok(resp.and_then(|r| r.artists.items.into_iter().flatten().next()).map(ArtistProfile::from))
  }

  async fn get_artist(&self, id: &ArtistId) -> Result<Option<ArtistProfile>, CatalogError> {
    validate_id(id.as_str())?;

    let artist: Option<ArtistObject> = self.get_json(&self.url(&format!("artists/{id}")), &[]).await?;
    Ok(artist.map(ArtistProfile::from))
  }

  async fn artist_albums(
    &self,
    id: &ArtistId,
    cursor: Option<&PageCursor>,
  ) -> Result<Page<AlbumSummary>, CatalogError> {
    validate_id(id.as_str())?;

    let (url, query) = match cursor {
      Some(c) => (self.cursor_url(c)?, Vec::new()),
      None => {
        (self.url(&format!("artists/{id}/albums")), self.listing_query(Some(("include_groups", self.config.include_groups()))))
      }
    };

    let paging: Paging<SimplifiedAlbum> = self.get_json(&url, &query).await?.ok_or(CatalogError::NotFound)?;
    Ok(paging.into_page(|a| Some(AlbumSummary::from(a))))
  }

  async fn album_tracks(
    &self,
    album: &AlbumId,
    cursor: Option<&PageCursor>,
  ) -> Result<Page<TrackSummary>, CatalogError> {
    validate_id(album.as_str())?;

    let (url, query) = match cursor {
      Some(c) => (self.cursor_url(c)?, Vec::new()),
      None => (self.url(&format!("albums/{album}/tracks")), self.listing_query(None)),
    };

    let paging: Paging<SimplifiedTrack> = self.get_json(&url, &query).await?.ok_or(CatalogError::NotFound)?;
    Ok(paging.into_page(|t| Some(TrackSummary::from(t))))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gateway(request_interval_ms: u64) -> SpotifyGateway {
    let cfg = CatalogConfig { request_interval_ms, market: Some("ES".into()), ..CatalogConfig::default() };
    SpotifyGateway::new(cfg, Credentials::new("id", "secret")).unwrap()
  }

  #[test]
  fn ids_must_be_base62() {
    assert!(validate_id("6WY7D3jk8zTrHtmkqqo5GI").is_ok());
    assert!(matches!(validate_id(""), Err(CatalogError::InvalidId(_))));
    assert!(matches!(validate_id("../me"), Err(CatalogError::InvalidId(_))));
    assert!(matches!(validate_id("with space"), Err(CatalogError::InvalidId(_))));
  }

  #[test]
  fn only_cursors_from_the_api_are_followed() {
    let g = gateway(0);
    let ok = PageCursor::new("https://api.spotify.com/v1/artists/x/albums?offset=50&limit=50");
    let foreign = PageCursor::new("https://evil.example.com/v1/next");

    assert_eq!(g.cursor_url(&ok).unwrap(), ok.as_str());
    assert!(matches!(g.cursor_url(&foreign), Err(CatalogError::Decode(_))));
  }

  #[test]
  fn not_found_is_an_empty_answer() {
    assert!(map_status(StatusCode::NOT_FOUND, None, "u").is_none());
  }

  #[test]
  fn bad_request_is_an_invalid_id() {
    assert!(matches!(map_status(StatusCode::BAD_REQUEST, None, "u"), Some(CatalogError::InvalidId(_))));
  }

  #[test]
  fn unauthorized_is_an_auth_error() {
    assert!(matches!(map_status(StatusCode::UNAUTHORIZED, None, "u"), Some(CatalogError::Auth(_))));
  }

  #[test]
  fn throttling_reads_retry_after() {
    let header = HeaderValue::from_static("7");
    assert!(matches!(
      map_status(StatusCode::TOO_MANY_REQUESTS, Some(&header), "u"),
      Some(CatalogError::RateLimited { retry_after_secs: 7 })
    ));
  }

  #[test]
  fn unreadable_retry_after_falls_back_to_one_second() {
    let header = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
    for retry_after in [Some(&header), None] {
      assert!(matches!(
        map_status(StatusCode::TOO_MANY_REQUESTS, retry_after, "u"),
        Some(CatalogError::RateLimited { retry_after_secs: 1 })
      ));
    }
  }

  #[test]
  fn other_statuses_are_transport_errors() {
    assert!(matches!(map_status(StatusCode::BAD_GATEWAY, None, "u"), Some(CatalogError::Transport(_))));
  }

  #[test]
  fn zero_interval_disables_pacing() {
    assert!(gateway(0).limiter.is_none());
    assert!(gateway(1000).limiter.is_some());
  }

  #[test]
  fn listing_query_carries_limit_and_market() {
    let g = gateway(0);
    let q = g.listing_query(Some(("include_groups", "album".into())));

    assert_eq!(
      q,
      vec![("limit", "50".to_string()), ("include_groups", "album".to_string()), ("market", "ES".to_string())]
    );
  }
}
