use crate::domain::ids::ArtistId;
use serde::{Deserialize, Serialize};

/// Colaboración no dirigida entre dos artistas.
///
/// Se registra una por cada par (source, target) encontrado al escanear la
/// discografía de `source`. No hay deduplicación global: el mismo par puede
/// aparecer varias veces en el almacén de aristas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollaborationEdge {
  pub source: ArtistId,
  pub target: ArtistId,
}

impl CollaborationEdge {
  pub fn new(source: impl Into<ArtistId>, target: impl Into<ArtistId>) -> Self {
    Self { source: source.into(), target: target.into() }
  }
}
