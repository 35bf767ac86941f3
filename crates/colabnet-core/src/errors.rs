// crates/colabnet-core/src/errors.rs
use thiserror::Error;

use crate::ports::{CatalogError, SinkError};

/// Error genérico del núcleo de colabnet.
///
/// Las capas superiores (CLI, etc.) deberían mapear este error
/// a mensajes de usuario o logs.
#[derive(Debug, Error)]
pub enum CoreError {
  /// La semilla no existe en el catálogo: no hay nada que rastrear.
  #[error("artist not found in catalog: {0}")]
  ArtistNotFound(String),

  #[error("catalog error: {0}")]
  Catalog(#[from] CatalogError),

  #[error("sink error: {0}")]
  Sink(#[from] SinkError),
}
