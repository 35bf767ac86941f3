use crate::domain::catalog::ArtistProfile;
use crate::domain::ids::ArtistId;
use serde::{Deserialize, Serialize};

/// Separador usado para guardar los géneros como una sola cadena.
pub const GENRE_SEPARATOR: &str = ", ";

/// Representa a un artista descubierto durante el rastreo.
///
/// Es una foto del artista en el momento en que se visitó: las métricas
/// (`followers`, `popularity`) no se actualizan si se vuelve a descubrir.
/// La identidad es el `id`; el `label` no es único.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
  /// Identificador del catálogo. Clave primaria en el almacén de nodos.
  pub id: ArtistId,

  /// Nombre visible del artista.
  pub label: String,

  pub followers: u64,

  pub popularity: u32,

  /// Géneros sin orden significativo.
  pub genres: Vec<String>,

  pub image_url: Option<String>,
}

impl ArtistRecord {
  /// Géneros unidos con [`GENRE_SEPARATOR`], tal y como se persisten.
  pub fn joined_genres(&self) -> String {
    self.genres.join(GENRE_SEPARATOR)
  }

  /// Inverso de [`ArtistRecord::joined_genres`]. Una cadena vacía no tiene géneros.
  ///
  /// Un género que contenga el propio separador (coma y espacio) vuelve partido en dos.
  pub fn split_genres(joined: &str) -> Vec<String> {
    joined
      .split(GENRE_SEPARATOR)
      .map(str::trim)
      .filter(|g| !g.is_empty())
      .map(str::to_string)
      .collect()
  }
}

impl From<ArtistProfile> for ArtistRecord {
  fn from(p: ArtistProfile) -> Self {
    ArtistRecord {
      id: p.id,
      label: p.name,
      followers: p.followers,
      popularity: p.popularity,
      genres: p.genres,
      image_url: p.image_url,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn genres_survive_join_and_split() {
    let record = ArtistRecord {
      id: ArtistId::new("a1"),
      label: "Melendi".into(),
      followers: 10,
      popularity: 70,
      genres: vec!["latin pop".into(), "rumba".into()],
      image_url: None,
    };

    assert_eq!(record.joined_genres(), "latin pop, rumba");
    assert_eq!(ArtistRecord::split_genres(&record.joined_genres()), record.genres);
  }

  #[test]
  fn comma_without_space_stays_inside_the_genre() {
    let genres = vec!["r&b,soul".to_string(), "pop".to_string()];
    assert_eq!(ArtistRecord::split_genres(&genres.join(GENRE_SEPARATOR)), genres);
  }

  #[test]
  fn empty_genre_string_has_no_genres() {
    assert!(ArtistRecord::split_genres("").is_empty());
    assert!(ArtistRecord::split_genres("  ").is_empty());
  }
}
