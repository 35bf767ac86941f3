use serde::{Deserialize, Serialize};

/// Límites de un rastreo.
///
/// - `max_artists`: tope global de artistas procesados en todo el árbol.
/// - `max_depth`: profundidad máxima por rama. Los artistas que están justo
///   en `max_depth` se guardan como hojas (nodo sí, expansión no).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlLimits {
  pub max_artists: usize,
  pub max_depth: u32,
}

impl Default for CrawlLimits {
  fn default() -> Self {
    Self { max_artists: 1500, max_depth: 4 }
  }
}

/// Resumen de un rastreo terminado.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
  /// Nombre canónico de la semilla.
  pub seed: String,
  /// Artistas que consumieron presupuesto (incluidos los que no se pudieron resolver).
  pub processed: usize,
  /// Filas nuevas en el almacén de nodos.
  pub nodes_written: usize,
  /// Filas añadidas al almacén de aristas.
  pub edges_written: usize,
  /// Colaboradores que el catálogo no supo resolver.
  pub unresolved: usize,
}
