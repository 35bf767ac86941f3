use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identificador opaco y estable de un artista en el catálogo.
///
/// No se interpreta ni se valida su formato: es el adapter del catálogo
/// quien decide qué es un id válido.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(String);

impl ArtistId {
  pub fn new(id: impl Into<String>) -> Self {
    ArtistId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_empty(&self) -> bool {
    self.0.trim().is_empty()
  }
}

impl From<String> for ArtistId {
  fn from(s: String) -> Self {
    ArtistId(s)
  }
}

impl From<&str> for ArtistId {
  fn from(s: &str) -> Self {
    ArtistId(s.to_string())
  }
}

impl From<ArtistId> for String {
  fn from(id: ArtistId) -> Self {
    id.0
  }
}

// Permite buscar en `HashMap<ArtistId, _>` directamente con un `&str`.
impl Borrow<str> for ArtistId {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ArtistId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Identificador de un álbum en el catálogo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(String);

impl AlbumId {
  pub fn new(id: impl Into<String>) -> Self {
    AlbumId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<String> for AlbumId {
  fn from(s: String) -> Self {
    AlbumId(s)
  }
}

impl From<&str> for AlbumId {
  fn from(s: &str) -> Self {
    AlbumId(s.to_string())
  }
}

impl fmt::Display for AlbumId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
