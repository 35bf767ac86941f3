//! Objetos que devuelve el catálogo remoto (Spotify u otro).
//!
//! Son independientes del formato del proveedor: el adapter mapea su JSON
//! a estos tipos y el dominio nunca ve la respuesta cruda.

use serde::{Deserialize, Serialize};

use crate::domain::ids::{AlbumId, ArtistId};

/// Identidad y métricas de un artista tal y como las reporta el catálogo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistProfile {
  pub id: ArtistId,
  /// Nombre canónico según el catálogo.
  pub name: String,
  pub followers: u64,
  pub genres: Vec<String>,
  pub popularity: u32,
  pub image_url: Option<String>,
}

/// Artista acreditado en una pista.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreditedArtist {
  pub id: ArtistId,
  pub name: String,
}

impl CreditedArtist {
  pub fn new(id: impl Into<ArtistId>, name: impl Into<String>) -> Self {
    Self { id: id.into(), name: name.into() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
  pub id: AlbumId,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
  pub name: String,
  /// Artistas acreditados, en el orden en que los lista el catálogo.
  pub artists: Vec<CreditedArtist>,
}

/// Token opaco para pedir la siguiente página de un listado.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageCursor(String);

impl PageCursor {
  pub fn new(cursor: impl Into<String>) -> Self {
    PageCursor(cursor.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// Una página de resultados. `next == None` marca la última.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub next: Option<PageCursor>,
}

impl<T> Page<T> {
  pub fn last(items: Vec<T>) -> Self {
    Self { items, next: None }
  }

  pub fn with_next(items: Vec<T>, next: PageCursor) -> Self {
    Self { items, next: Some(next) }
  }
}
