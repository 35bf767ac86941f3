pub mod config;
pub mod models;
pub mod schema;

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use colabnet_core::domain::{ArtistId, ArtistRecord, CollaborationEdge, Collaborators};
use colabnet_core::graph::Graph;
use colabnet_core::ports::{GraphSink, SinkError};

use crate::config::StorageConfig;
use crate::models::{EdgeRow, NodeKeyRow, NodeRow};
use crate::schema::{EDGE_HEADER, NODE_HEADER};

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("store does not exist: {}", .0.display())]
  MissingStore(PathBuf),
}

impl From<StorageError> for SinkError {
  fn from(e: StorageError) -> Self {
    match e {
      StorageError::Csv(e) => SinkError::Encode(e.to_string()),
      other => SinkError::Io(other.to_string()),
    }
  }
}

/// Persistencia del grafo en dos CSV: nodos y aristas.
///
/// Mantiene en memoria el conjunto de ids ya escritos (cargado una vez al
/// abrir), de modo que `put_node` no relee el archivo en cada llamada y un
/// rastreo relanzado tras un fallo no duplica nodos. Cada escritura se hace
/// flush inmediatamente.
///
/// No hay bloqueo entre procesos: dos rastreos sobre los mismos archivos se pisan.
pub struct CsvGraphStore {
  nodes_path: PathBuf,
  edges_path: PathBuf,
  known_ids: HashSet<ArtistId>,
}

impl CsvGraphStore {
  pub fn open(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
    let nodes_path = nodes_path.into();
    let edges_path = edges_path.into();
    colabnet_fs::ensure_parent_dir(&nodes_path)?;
    colabnet_fs::ensure_parent_dir(&edges_path)?;

    let known_ids = read_node_ids(&nodes_path)?;
    debug!(nodes = %nodes_path.display(), known = known_ids.len(), "node store opened");

    Ok(Self { nodes_path, edges_path, known_ids })
  }

  pub fn from_config(cfg: &StorageConfig) -> Result<Self, StorageError> {
    Self::open(&cfg.nodes_path, &cfg.edges_path)
  }

  pub fn nodes_path(&self) -> &Path {
    &self.nodes_path
  }

  pub fn edges_path(&self) -> &Path {
    &self.edges_path
  }

  pub fn contains_node(&self, id: &ArtistId) -> bool {
    self.known_ids.contains(id)
  }

  /// Todas las filas del almacén de nodos, en orden de escritura.
  pub fn read_nodes(&self) -> Result<Vec<ArtistRecord>, StorageError> {
    read_nodes(&self.nodes_path)
  }

  /// Todas las filas del almacén de aristas, duplicados incluidos.
  pub fn read_edges(&self) -> Result<Vec<CollaborationEdge>, StorageError> {
    read_edges(&self.edges_path)
  }

  pub fn load_graph(&self) -> Result<Graph, StorageError> {
    load_graph(&self.nodes_path, &self.edges_path)
  }
}

impl GraphSink for CsvGraphStore {
  fn put_node(&mut self, record: &ArtistRecord) -> Result<bool, SinkError> {
    if self.known_ids.contains(&record.id) {
      return Ok(false);
    }

    let mut writer = append_writer(&self.nodes_path, &NODE_HEADER)?;
    writer.serialize(NodeRow::from(record)).map_err(StorageError::from)?;
    writer.flush().map_err(StorageError::from)?;

    self.known_ids.insert(record.id.clone());
    Ok(true)
  }

  fn put_edges(&mut self, source: &ArtistId, collaborators: &Collaborators) -> Result<usize, SinkError> {
    // El archivo se crea (con cabecera) aunque no haya colaboradores.
    let mut writer = append_writer(&self.edges_path, &EDGE_HEADER)?;

    let mut written = 0;
    for edge in collaborators.edges_from(source) {
      writer
        .serialize(EdgeRow { source: edge.source.into(), target: edge.target.into() })
        .map_err(StorageError::from)?;
      written += 1;
    }
    writer.flush().map_err(StorageError::from)?;

    Ok(written)
  }
}

/// Carga el grafo desde los dos almacenes. Sin archivo de aristas el grafo
/// simplemente no tiene aristas; sin archivo de nodos es un error.
pub fn load_graph(nodes_path: &Path, edges_path: &Path) -> Result<Graph, StorageError> {
  let nodes = read_nodes(nodes_path)?;
  let edges = read_edges(edges_path)?;
  Ok(Graph::from_records(nodes, edges))
}

pub fn read_nodes(path: &Path) -> Result<Vec<ArtistRecord>, StorageError> {
  let mut reader = match open_reader(path)? {
    Some(r) => r,
    None => return Err(StorageError::MissingStore(path.to_path_buf())),
  };

  let mut nodes = Vec::new();
  for row in reader.deserialize::<NodeRow>() {
    nodes.push(ArtistRecord::from(row?));
  }
  Ok(nodes)
}

pub fn read_edges(path: &Path) -> Result<Vec<CollaborationEdge>, StorageError> {
  let Some(mut reader) = open_reader(path)? else {
    return Ok(Vec::new());
  };

  let mut edges = Vec::new();
  for row in reader.deserialize::<EdgeRow>() {
    edges.push(CollaborationEdge::from(row?));
  }
  Ok(edges)
}

fn read_node_ids(path: &Path) -> Result<HashSet<ArtistId>, StorageError> {
  let Some(mut reader) = open_reader(path)? else {
    return Ok(HashSet::new());
  };

  let mut ids = HashSet::new();
  for row in reader.deserialize::<NodeKeyRow>() {
    ids.insert(ArtistId::from(row?.id));
  }
  Ok(ids)
}

/// `Ok(None)` si el archivo no existe.
fn open_reader(path: &Path) -> Result<Option<csv::Reader<File>>, StorageError> {
  match File::open(path) {
    Ok(file) => Ok(Some(csv::Reader::from_reader(file))),
    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
    Err(e) => Err(e.into()),
  }
}

/// Abre `path` en modo append; si está vacío (o no existía) escribe antes la cabecera.
fn append_writer(path: &Path, header: &[&str]) -> Result<csv::Writer<File>, StorageError> {
  let file = OpenOptions::new().create(true).append(true).open(path)?;
  let is_new = file.metadata()?.len() == 0;

  let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
  if is_new {
    writer.write_record(header)?;
  }
  Ok(writer)
}

#[cfg(test)]
mod tests {
  use super::*;
  use colabnet_core::domain::CreditedArtist;
  use std::fs;
  use tempfile::{TempDir, tempdir};

  fn store() -> (TempDir, CsvGraphStore) {
    let tmp = tempdir().unwrap();
    let store = CsvGraphStore::open(tmp.path().join("nodes.csv"), tmp.path().join("edges.csv")).unwrap();
    (tmp, store)
  }

  fn record(id: &str, label: &str) -> ArtistRecord {
    ArtistRecord {
      id: ArtistId::new(id),
      label: label.into(),
      followers: 1200,
      popularity: 55,
      genres: vec!["pop".into(), "rumba".into()],
      image_url: None,
    }
  }

  fn collabs(ids: &[&str]) -> Collaborators {
    ids.iter().map(|id| CreditedArtist::new(*id, id.to_uppercase())).collect()
  }

  #[test]
  fn same_id_is_written_once_first_wins() {
    let (_tmp, mut store) = store();

    assert!(store.put_node(&record("a", "First")).unwrap());
    assert!(!store.put_node(&record("a", "Second")).unwrap());

    let nodes = store.read_nodes().unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].label, "First");
  }

  #[test]
  fn files_start_with_a_single_header() {
    let (_tmp, mut store) = store();
    store.put_node(&record("a", "A")).unwrap();
    store.put_node(&record("b", "B")).unwrap();
    store.put_edges(&ArtistId::new("a"), &collabs(&["b"])).unwrap();

    let nodes = fs::read_to_string(store.nodes_path()).unwrap();
    let edges = fs::read_to_string(store.edges_path()).unwrap();

    assert_eq!(nodes.lines().next(), Some("id,label,followers,genres,popularity,image_url"));
    assert_eq!(nodes.lines().filter(|l| l.starts_with("id,")).count(), 1);
    assert_eq!(nodes.lines().nth(1), Some("a,A,1200,\"pop, rumba\",55,"));
    assert_eq!(edges, "source,target\na,b\n");
  }

  #[test]
  fn reopening_keeps_the_id_index() {
    let (tmp, mut store) = store();
    store.put_node(&record("a", "A")).unwrap();
    drop(store);

    let mut reopened = CsvGraphStore::open(tmp.path().join("nodes.csv"), tmp.path().join("edges.csv")).unwrap();
    assert!(reopened.contains_node(&ArtistId::new("a")));
    assert!(!reopened.put_node(&record("a", "A again")).unwrap());
    assert_eq!(reopened.read_nodes().unwrap().len(), 1);
  }

  #[test]
  fn edges_are_appended_without_dedup() {
    let (_tmp, mut store) = store();
    let source = ArtistId::new("a");

    assert_eq!(store.put_edges(&source, &collabs(&["b", "c"])).unwrap(), 2);
    assert_eq!(store.put_edges(&source, &collabs(&["b"])).unwrap(), 1);

    let edges = store.read_edges().unwrap();
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[2], CollaborationEdge::new("a", "b"));
  }

  #[test]
  fn empty_collaborators_still_create_the_edge_store() {
    let (_tmp, mut store) = store();

    assert_eq!(store.put_edges(&ArtistId::new("a"), &Collaborators::new()).unwrap(), 0);
    assert_eq!(fs::read_to_string(store.edges_path()).unwrap(), "source,target\n");
  }

  #[test]
  fn records_read_back_with_optional_fields() {
    let (_tmp, mut store) = store();
    let mut with_image = record("b", "B");
    with_image.image_url = Some("https://i.scdn.co/image/b".into());
    with_image.genres.clear();

    store.put_node(&record("a", "A")).unwrap();
    store.put_node(&with_image).unwrap();

    let nodes = store.read_nodes().unwrap();
    assert_eq!(nodes, vec![record("a", "A"), with_image]);
  }

  #[test]
  fn graph_loads_without_edge_store_but_not_without_nodes() {
    let (_tmp, mut store) = store();
    assert!(matches!(store.load_graph(), Err(StorageError::MissingStore(_))));

    store.put_node(&record("a", "A")).unwrap();
    let graph = store.load_graph().unwrap();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
  }
}
