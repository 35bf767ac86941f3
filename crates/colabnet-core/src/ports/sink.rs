use crate::domain::{ArtistId, ArtistRecord, Collaborators};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
  #[error("io error: {0}")]
  Io(String),

  #[error("encode error: {0}")]
  Encode(String),
}

/// Port de persistencia del grafo que va descubriendo el crawler.
///
/// - `put_node` es idempotente por id: la primera escritura gana.
/// - `put_edges` añade siempre, sin comprobar duplicados.
pub trait GraphSink {
  /// Devuelve `true` si el nodo se escribió, `false` si el id ya existía.
  fn put_node(&mut self, record: &ArtistRecord) -> Result<bool, SinkError>;

  /// Añade una arista `source -> colaborador` por cada colaborador. Devuelve cuántas.
  fn put_edges(&mut self, source: &ArtistId, collaborators: &Collaborators) -> Result<usize, SinkError>;
}
