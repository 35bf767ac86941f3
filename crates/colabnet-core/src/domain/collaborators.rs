use std::collections::HashSet;

use crate::domain::catalog::CreditedArtist;
use crate::domain::edge::CollaborationEdge;
use crate::domain::ids::ArtistId;

/// Colaboradores de un artista: `id -> nombre`, sin repetidos y en el orden
/// en que aparecieron al recorrer álbumes, pistas y créditos.
///
/// El orden importa: el crawler expande a los colaboradores en este orden.
#[derive(Debug, Clone, Default)]
pub struct Collaborators {
  entries: Vec<CreditedArtist>,
  seen: HashSet<ArtistId>,
}

impl Collaborators {
  pub fn new() -> Self {
    Self::default()
  }

  /// Añade un colaborador. Devuelve `false` si el id ya estaba (gana el primero).
  pub fn insert(&mut self, id: ArtistId, name: String) -> bool {
    if !self.seen.insert(id.clone()) {
      return false;
    }
    self.entries.push(CreditedArtist { id, name });
    true
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CreditedArtist> {
    self.entries.iter()
  }

  /// Una arista `source -> colaborador` por cada entrada.
  pub fn edges_from<'a>(&'a self, source: &'a ArtistId) -> impl Iterator<Item = CollaborationEdge> + 'a {
    self.entries.iter().map(move |c| CollaborationEdge { source: source.clone(), target: c.id.clone() })
  }
}

impl IntoIterator for Collaborators {
  type Item = CreditedArtist;
  type IntoIter = std::vec::IntoIter<CreditedArtist>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.into_iter()
  }
}

impl FromIterator<CreditedArtist> for Collaborators {
  fn from_iter<I: IntoIterator<Item = CreditedArtist>>(iter: I) -> Self {
    let mut out = Collaborators::new();
    for c in iter {
      out.insert(c.id, c.name);
    }
    out
  }
}
