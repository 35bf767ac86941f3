//! Catálogo y sink en memoria.
//!
//! Sirve para tests y para rastreos sin red sobre un catálogo fijo. Pagina
//! igual que un catálogo real (cursor = offset) para que los consumidores
//! ejerciten el bucle de paginación.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::{
  AlbumId, AlbumSummary, ArtistId, ArtistProfile, ArtistRecord, CollaborationEdge, Collaborators, CreditedArtist,
  Page, PageCursor, TrackSummary,
};
use crate::ports::{CatalogError, CatalogGateway, GraphSink, SinkError};

const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug)]
pub struct InMemoryCatalog {
  artists: Vec<ArtistProfile>,
  albums: HashMap<ArtistId, Vec<AlbumSummary>>,
  tracks: HashMap<AlbumId, Vec<TrackSummary>>,
  page_size: usize,
  calls: AtomicUsize,
}

impl Default for InMemoryCatalog {
  fn default() -> Self {
    Self {
      artists: Vec::new(),
      albums: HashMap::new(),
      tracks: HashMap::new(),
      page_size: DEFAULT_PAGE_SIZE,
      calls: AtomicUsize::new(0),
    }
  }
}

impl InMemoryCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_page_size(mut self, page_size: usize) -> Self {
    self.page_size = page_size.max(1);
    self
  }

  /// Registra un artista con métricas vacías.
  pub fn with_artist(self, id: &str, name: &str) -> Self {
    self.with_profile(ArtistProfile {
      id: ArtistId::new(id),
      name: name.to_string(),
      followers: 0,
      genres: Vec::new(),
      popularity: 0,
      image_url: None,
    })
  }

  pub fn with_profile(mut self, profile: ArtistProfile) -> Self {
    self.artists.push(profile);
    self
  }

  /// Añade un álbum al artista `artist_id`. Cada pista es la lista de `(id, nombre)`
  /// acreditados, en orden.
  pub fn with_album(mut self, artist_id: &str, album_id: &str, tracks: &[&[(&str, &str)]]) -> Self {
    let album = AlbumSummary { id: AlbumId::new(album_id), name: album_id.to_string() };
    self.albums.entry(ArtistId::new(artist_id)).or_default().push(album);

    let tracks = tracks
      .iter()
      .enumerate()
      .map(|(n, credits)| TrackSummary {
        name: format!("{album_id} #{}", n + 1),
        artists: credits.iter().map(|(id, name)| CreditedArtist::new(*id, *name)).collect(),
      })
      .collect();
    self.tracks.insert(AlbumId::new(album_id), tracks);
    self
  }

  /// Número total de peticiones atendidas.
  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::Relaxed)
  }

  fn page<T: Clone>(&self, items: &[T], cursor: Option<&PageCursor>) -> Result<Page<T>, CatalogError> {
    let offset = match cursor {
      Some(c) => c.as_str().parse::<usize>().map_err(|e| CatalogError::Decode(format!("bad cursor: {e}")))?,
      None => 0,
    };

    let end = (offset + self.page_size).min(items.len());
    let chunk = items.get(offset..end).map(<[T]>::to_vec).unwrap_or_default();

    if end < items.len() { Ok(Page::with_next(chunk, PageCursor::new(end.to_string()))) } else { Ok(Page::last(chunk)) }
  }

  fn record_call(&self) {
    self.calls.fetch_add(1, Ordering::Relaxed);
  }
}

fn check_id(id: &str) -> Result<(), CatalogError> {
  if id.trim().is_empty() || id.contains(char::is_whitespace) {
    return Err(CatalogError::InvalidId(id.to_string()));
  }
  Ok(())
}

#[async_trait]
impl CatalogGateway for InMemoryCatalog {
  async fn search_artist(&self, name: &str) -> Result<Option<ArtistProfile>, CatalogError> {
    self.record_call();
    Ok(self.artists.iter().find(|a| a.name.eq_ignore_ascii_case(name.trim())).cloned())
  }

  async fn get_artist(&self, id: &ArtistId) -> Result<Option<ArtistProfile>, CatalogError> {
    self.record_call();
    check_id(id.as_str())?;
    Ok(self.artists.iter().find(|a| &a.id == id).cloned())
  }

  async fn artist_albums(
    &self,
    id: &ArtistId,
    cursor: Option<&PageCursor>,
  ) -> Result<Page<AlbumSummary>, CatalogError> {
    self.record_call();
    check_id(id.as_str())?;
    let albums = self.albums.get(id).map(Vec::as_slice).unwrap_or_default();
    self.page(albums, cursor)
  }

  async fn album_tracks(
    &self,
    album: &AlbumId,
    cursor: Option<&PageCursor>,
  ) -> Result<Page<TrackSummary>, CatalogError> {
    self.record_call();
    check_id(album.as_str())?;
    let tracks = self.tracks.get(album).map(Vec::as_slice).unwrap_or_default();
    self.page(tracks, cursor)
  }
}

/// Sink en memoria con la misma semántica que el almacén CSV: nodos únicos
/// por id (gana el primero) y aristas sin deduplicar.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
  nodes: Vec<ArtistRecord>,
  edges: Vec<CollaborationEdge>,
  index: HashSet<ArtistId>,
}

impl InMemorySink {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn nodes(&self) -> &[ArtistRecord] {
    &self.nodes
  }

  pub fn edges(&self) -> &[CollaborationEdge] {
    &self.edges
  }

  pub fn into_parts(self) -> (Vec<ArtistRecord>, Vec<CollaborationEdge>) {
    (self.nodes, self.edges)
  }
}

impl GraphSink for InMemorySink {
  fn put_node(&mut self, record: &ArtistRecord) -> Result<bool, SinkError> {
    if !self.index.insert(record.id.clone()) {
      return Ok(false);
    }
    self.nodes.push(record.clone());
    Ok(true)
  }

  fn put_edges(&mut self, source: &ArtistId, collaborators: &Collaborators) -> Result<usize, SinkError> {
    let before = self.edges.len();
    self.edges.extend(collaborators.edges_from(source));
    Ok(self.edges.len() - before)
  }
}
