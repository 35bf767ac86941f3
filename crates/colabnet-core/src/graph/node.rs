use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::ArtistId;

/// Nodo del grafo de colaboraciones.
///
/// Guarda los ids de sus adyacentes; los nodos en sí los posee el `Graph`.
/// Igualdad y hash dependen solo del `id`: cambiar el `label` no cambia la identidad.
#[derive(Debug, Clone)]
pub struct Node {
  id: ArtistId,
  label: String,
  adjacent: HashSet<ArtistId>,
}

impl Node {
  pub fn new(id: ArtistId, label: impl Into<String>) -> Self {
    Self { id, label: label.into(), adjacent: HashSet::new() }
  }

  pub fn id(&self) -> &ArtistId {
    &self.id
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  pub fn neighbors(&self) -> impl Iterator<Item = &ArtistId> {
    self.adjacent.iter()
  }

  pub fn is_adjacent(&self, other: &ArtistId) -> bool {
    self.adjacent.contains(other)
  }

  pub fn degree(&self) -> usize {
    self.adjacent.len()
  }

  pub(crate) fn set_label(&mut self, label: String) {
    self.label = label;
  }

  pub(crate) fn link(&mut self, other: ArtistId) -> bool {
    self.adjacent.insert(other)
  }

  pub(crate) fn unlink(&mut self, other: &ArtistId) -> bool {
    self.adjacent.remove(other)
  }
}

impl PartialEq for Node {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for Node {}

impl Hash for Node {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Display for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Node(id={}, label={}, adjacent={})", self.id, self.label, self.adjacent.len())
  }
}
