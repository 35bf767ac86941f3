//! Grafo no dirigido de artistas construido a partir de lo que persistió el crawler.
//!
//! Es un índice estructural en memoria: las mutaciones no se escriben de vuelta
//! en los almacenes.
//!
//! Invariantes que mantienen todas las operaciones:
//! - la adyacencia es simétrica (`b` en `a` ⇔ `a` en `b`);
//! - no hay adyacencias colgando hacia nodos eliminados;
//! - no hay bucles (un artista no es adyacente de sí mismo).

mod node;

use std::collections::HashMap;

use crate::domain::{ArtistId, ArtistRecord, CollaborationEdge};

pub use node::Node;

#[derive(Debug, Clone, Default)]
pub struct Graph {
  nodes: HashMap<ArtistId, Node>,
}

impl Graph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Construye el grafo a partir de filas de nodos y aristas.
  ///
  /// Si un id se repite entre los nodos gana la primera fila. Las aristas con
  /// algún extremo desconocido se ignoran, y las repetidas colapsan en una.
  pub fn from_records<N, E>(nodes: N, edges: E) -> Self
  where
    N: IntoIterator<Item = ArtistRecord>,
    E: IntoIterator<Item = CollaborationEdge>,
  {
    let mut graph = Graph::new();
    for record in nodes {
      graph.add_node(record.id, record.label);
    }
    for edge in edges {
      graph.add_edge(&edge.source, &edge.target);
    }
    graph
  }

  /// Añade un nodo. Si el id ya existe no hace nada (no se pisa el label).
  pub fn add_node(&mut self, id: ArtistId, label: impl Into<String>) -> bool {
    if self.nodes.contains_key(&id) {
      return false;
    }
    self.nodes.insert(id.clone(), Node::new(id, label));
    true
  }

  /// Elimina un nodo y todas sus adyacencias. No hace nada si no existe.
  pub fn remove_node(&mut self, id: &ArtistId) -> bool {
    let Some(neighbors) = self.nodes.get(id).map(|n| n.neighbors().cloned().collect::<Vec<_>>()) else {
      return false;
    };

    // Por simetría, solo los vecinos pueden apuntar a `id`.
    for other in &neighbors {
      if let Some(node) = self.nodes.get_mut(other) {
        node.unlink(id);
      }
    }
    self.nodes.remove(id);
    true
  }

  /// Conecta dos nodos existentes. Devuelve `false` si falta alguno, si ya
  /// estaban conectados o si `a == b`.
  pub fn add_edge(&mut self, a: &ArtistId, b: &ArtistId) -> bool {
    if a == b || !self.nodes.contains_key(a) || !self.nodes.contains_key(b) {
      return false;
    }

    let mut added = false;
    if let Some(node) = self.nodes.get_mut(a) {
      added |= node.link(b.clone());
    }
    if let Some(node) = self.nodes.get_mut(b) {
      added |= node.link(a.clone());
    }
    added
  }

  /// Desconecta dos nodos. Devuelve `false` si no estaban conectados.
  pub fn remove_edge(&mut self, a: &ArtistId, b: &ArtistId) -> bool {
    if !self.has_edge(a, b) {
      return false;
    }

    if let Some(node) = self.nodes.get_mut(a) {
      node.unlink(b);
    }
    if let Some(node) = self.nodes.get_mut(b) {
      node.unlink(a);
    }
    true
  }

  pub fn has_node(&self, id: &ArtistId) -> bool {
    self.nodes.contains_key(id)
  }

  pub fn has_edge(&self, a: &ArtistId, b: &ArtistId) -> bool {
    match (self.nodes.get(a), self.nodes.contains_key(b)) {
      (Some(node), true) => node.is_adjacent(b),
      _ => false,
    }
  }

  pub fn node(&self, id: &ArtistId) -> Option<&Node> {
    self.nodes.get(id)
  }

  /// Busca un nodo por label con un recorrido lineal.
  ///
  /// Los labels no son únicos: si hay varios, devuelve uno cualquiera de ellos.
  pub fn find_node_by_label(&self, label: &str) -> Option<&Node> {
    self.nodes.values().find(|n| n.label() == label)
  }

  /// Cambia el label de un nodo. La identidad (id) no cambia.
  pub fn set_label(&mut self, id: &ArtistId, label: impl Into<String>) -> bool {
    match self.nodes.get_mut(id) {
      Some(node) => {
        node.set_label(label.into());
        true
      }
      None => false,
    }
  }

  pub fn nodes(&self) -> impl Iterator<Item = &Node> {
    self.nodes.values()
  }

  /// Vecinos de `id`. Vacío si el nodo no existe.
  pub fn neighbors(&self, id: &ArtistId) -> impl Iterator<Item = &Node> {
    self.nodes.get(id).into_iter().flat_map(|n| n.neighbors()).filter_map(|other| self.nodes.get(other))
  }

  pub fn degree(&self, id: &ArtistId) -> usize {
    self.nodes.get(id).map_or(0, Node::degree)
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Número de pares conectados (cada arista no dirigida cuenta una vez).
  pub fn edge_count(&self) -> usize {
    self.nodes.values().map(Node::degree).sum::<usize>() / 2
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn id(s: &str) -> ArtistId {
    ArtistId::new(s)
  }

  fn record(i: &str, label: &str) -> ArtistRecord {
    ArtistRecord { id: id(i), label: label.into(), followers: 0, popularity: 0, genres: vec![], image_url: None }
  }

  fn triangle() -> Graph {
    Graph::from_records(
      [record("a", "A"), record("b", "B"), record("c", "C")],
      [CollaborationEdge::new("a", "b"), CollaborationEdge::new("b", "c"), CollaborationEdge::new("c", "a")],
    )
  }

  fn assert_symmetric(g: &Graph) {
    for node in g.nodes() {
      for other in node.neighbors() {
        assert!(g.has_edge(other, node.id()), "{other} -> {} missing", node.id());
      }
    }
  }

  #[test]
  fn builds_symmetric_adjacency_from_records() {
    let g = triangle();

    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 3);
    assert!(g.has_edge(&id("a"), &id("b")));
    assert!(g.has_edge(&id("b"), &id("a")));
    assert_symmetric(&g);
  }

  #[test]
  fn duplicate_rows_and_unknown_endpoints_are_tolerated() {
    let g = Graph::from_records(
      [record("a", "A"), record("b", "B"), record("a", "Renamed")],
      [
        CollaborationEdge::new("a", "b"),
        CollaborationEdge::new("a", "b"),
        CollaborationEdge::new("b", "a"),
        CollaborationEdge::new("a", "ghost"),
      ],
    );

    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.node(&id("a")).map(Node::label), Some("A"));
    assert!(!g.has_node(&id("ghost")));
  }

  #[test]
  fn add_node_keeps_first_label() {
    let mut g = Graph::new();
    assert!(g.add_node(id("a"), "First"));
    assert!(!g.add_node(id("a"), "Second"));
    assert_eq!(g.node(&id("a")).unwrap().label(), "First");
  }

  #[test]
  fn remove_node_leaves_no_dangling_adjacency() {
    let mut g = triangle();

    assert!(g.remove_node(&id("a")));
    assert!(!g.has_node(&id("a")));
    for node in g.nodes() {
      assert!(!node.is_adjacent(&id("a")));
    }
    assert_eq!(g.edge_count(), 1);
    assert!(!g.remove_node(&id("a")));
  }

  #[test]
  fn remove_edge_without_edge_is_a_no_op() {
    let mut g = Graph::from_records([record("a", "A"), record("b", "B")], []);

    assert!(!g.remove_edge(&id("a"), &id("b")));
    assert!(!g.has_edge(&id("a"), &id("b")));
    assert!(!g.remove_edge(&id("a"), &id("missing")));
  }

  #[test]
  fn edges_need_both_endpoints_and_no_self_loops() {
    let mut g = Graph::from_records([record("a", "A")], []);

    assert!(!g.add_edge(&id("a"), &id("missing")));
    assert!(!g.add_edge(&id("a"), &id("a")));
    assert_eq!(g.degree(&id("a")), 0);
  }

  #[test]
  fn symmetry_holds_after_mixed_mutations() {
    let mut g = triangle();
    g.add_node(id("d"), "D");
    g.add_edge(&id("d"), &id("a"));
    g.add_edge(&id("a"), &id("d"));
    g.remove_edge(&id("b"), &id("c"));
    g.remove_node(&id("c"));
    g.add_edge(&id("b"), &id("d"));

    assert_symmetric(&g);
    for a in ["a", "b", "c", "d"] {
      for b in ["a", "b", "c", "d"] {
        assert_eq!(g.has_edge(&id(a), &id(b)), g.has_edge(&id(b), &id(a)));
      }
    }
    assert_eq!(g.edge_count(), 3);
  }

  #[test]
  fn find_by_label_returns_some_match() {
    let g = Graph::from_records([record("x1", "X"), record("x2", "X"), record("y", "Y")], []);

    let found = g.find_node_by_label("X").expect("a node labelled X");
    assert_eq!(found.label(), "X");
    assert!(g.find_node_by_label("Z").is_none());
  }

  #[test]
  fn relabel_keeps_identity_and_edges() {
    let mut g = triangle();
    assert!(g.set_label(&id("a"), "Alpha"));

    assert_eq!(g.find_node_by_label("Alpha").map(|n| n.id().as_str()), Some("a"));
    assert_eq!(g.degree(&id("a")), 2);
    let mut names: Vec<_> = g.neighbors(&id("a")).map(Node::label).collect();
    names.sort();
    assert_eq!(names, ["B", "C"]);
  }
}
