use colabnet_core::domain::{ArtistId, ArtistRecord, CollaborationEdge};
use serde::{Deserialize, Serialize};

/// Fila del almacén de nodos. Los géneros van unidos en una sola columna.
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeRow {
  pub id: String,
  pub label: String,
  pub followers: u64,
  pub genres: String,
  pub popularity: u32,
  pub image_url: Option<String>,
}

/// Solo la clave; para reconstruir el índice sin parsear el resto de columnas.
#[derive(Debug, Deserialize)]
pub struct NodeKeyRow {
  pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EdgeRow {
  pub source: String,
  pub target: String,
}

impl From<&ArtistRecord> for NodeRow {
  fn from(r: &ArtistRecord) -> Self {
    NodeRow {
      id: r.id.to_string(),
      label: r.label.clone(),
      followers: r.followers,
      genres: r.joined_genres(),
      popularity: r.popularity,
      image_url: r.image_url.clone(),
    }
  }
}

impl From<NodeRow> for ArtistRecord {
  fn from(row: NodeRow) -> Self {
    ArtistRecord {
      id: ArtistId::from(row.id),
      label: row.label,
      followers: row.followers,
      popularity: row.popularity,
      genres: ArtistRecord::split_genres(&row.genres),
      image_url: row.image_url.filter(|u| !u.is_empty()),
    }
  }
}

impl From<EdgeRow> for CollaborationEdge {
  fn from(row: EdgeRow) -> Self {
    CollaborationEdge::new(row.source, row.target)
  }
}
