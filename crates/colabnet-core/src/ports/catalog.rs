use async_trait::async_trait;

use crate::domain::{AlbumId, AlbumSummary, ArtistId, ArtistProfile, Page, PageCursor, TrackSummary};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("not found")]
  NotFound,

  #[error("invalid id: {0}")]
  InvalidId(String),

  #[error("rate limited, retry after {retry_after_secs}s")]
  RateLimited { retry_after_secs: u64 },

  #[error("auth error: {0}")]
  Auth(String),

  #[error("transport error: {0}")]
  Transport(String),

  #[error("decode error: {0}")]
  Decode(String),
}

/// Port que abstrae el catálogo musical remoto.
///
/// Implementaciones posibles:
/// - Spotify Web API
/// - mocks en memoria para tests
///
/// Los listados van paginados: quien llama sigue `Page::next` hasta agotarlo.
/// El ritmo entre peticiones (rate limit) es responsabilidad del adapter.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
  /// Busca un artista por nombre y devuelve el primer resultado, si lo hay.
  async fn search_artist(&self, name: &str) -> Result<Option<ArtistProfile>, CatalogError>;

  /// Resuelve un artista por id. `Ok(None)` si el catálogo no lo conoce.
  async fn get_artist(&self, id: &ArtistId) -> Result<Option<ArtistProfile>, CatalogError>;

  async fn artist_albums(
    &self,
    id: &ArtistId,
    cursor: Option<&PageCursor>,
  ) -> Result<Page<AlbumSummary>, CatalogError>;

  async fn album_tracks(
    &self,
    album: &AlbumId,
    cursor: Option<&PageCursor>,
  ) -> Result<Page<TrackSummary>, CatalogError>;
}
