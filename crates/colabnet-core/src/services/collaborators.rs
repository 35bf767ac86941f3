use tracing::{debug, warn};

use crate::domain::{AlbumId, AlbumSummary, ArtistId, Collaborators, PageCursor, TrackSummary};
use crate::ports::{CatalogError, CatalogGateway};

/// Saca los colaboradores de un artista recorriendo su discografía.
///
/// Solo lee del catálogo; no escribe nada.
pub struct CollaboratorExtractor<G>
where
  G: CatalogGateway,
{
  gateway: G,
}

impl<G> CollaboratorExtractor<G>
where
  G: CatalogGateway,
{
  pub fn new(gateway: G) -> Self {
    Self { gateway }
  }

  pub fn gateway(&self) -> &G {
    &self.gateway
  }

  /// Devuelve los artistas co-acreditados con `artist_id`, sin repetir y en el
  /// orden en que aparecen (álbum -> pista -> crédito).
  ///
  /// Se excluye al propio artista, tanto por nombre como por id. Álbumes sin
  /// pistas o pistas sin créditos no aportan nada y no son error.
  pub async fn extract(&self, artist_id: &ArtistId, artist_name: &str) -> Result<Collaborators, CatalogError> {
    let albums = self.all_albums(artist_id).await?;
    let mut collaborators = Collaborators::new();

    for album in &albums {
      for track in self.all_tracks(&album.id).await? {
        for credit in track.artists {
          if credit.id.is_empty() || credit.name == artist_name || &credit.id == artist_id {
            continue;
          }
          collaborators.insert(credit.id, credit.name);
        }
      }
    }

    debug!(artist = %artist_name, albums = albums.len(), collaborators = collaborators.len(), "discography scanned");
    Ok(collaborators)
  }

  async fn all_albums(&self, artist_id: &ArtistId) -> Result<Vec<AlbumSummary>, CatalogError> {
    let mut albums = Vec::new();
    let mut cursor: Option<PageCursor> = None;

    loop {
      let page = self.gateway.artist_albums(artist_id, cursor.as_ref()).await?;
      albums.extend(page.items);

      match page.next {
        Some(next) if cursor.as_ref() == Some(&next) => {
          warn!(artist = %artist_id, cursor = next.as_str(), "album listing repeated its cursor, stopping");
          break;
        }
        Some(next) => cursor = Some(next),
        None => break,
      }
    }

    Ok(albums)
  }

  async fn all_tracks(&self, album_id: &AlbumId) -> Result<Vec<TrackSummary>, CatalogError> {
    let mut tracks = Vec::new();
    let mut cursor: Option<PageCursor> = None;

    loop {
      let page = self.gateway.album_tracks(album_id, cursor.as_ref()).await?;
      tracks.extend(page.items);

      match page.next {
        Some(next) if cursor.as_ref() == Some(&next) => {
          warn!(album = %album_id, cursor = next.as_str(), "track listing repeated its cursor, stopping");
          break;
        }
        Some(next) => cursor = Some(next),
        None => break,
      }
    }

    Ok(tracks)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ports::InMemoryCatalog;

  fn ids(c: &Collaborators) -> Vec<&str> {
    c.iter().map(|e| e.id.as_str()).collect()
  }

  #[tokio::test]
  async fn collects_co_credited_artists_in_order() {
    let catalog = InMemoryCatalog::new()
      .with_artist("mel", "Melendi")
      .with_album("mel", "alb1", &[&[("mel", "Melendi"), ("a", "CollabA")], &[("b", "CollabB"), ("a", "CollabA")]])
      .with_album("mel", "alb2", &[&[("c", "CollabC"), ("mel", "Melendi")]]);

    let extractor = CollaboratorExtractor::new(catalog);
    let found = extractor.extract(&"mel".into(), "Melendi").await.unwrap();

    assert_eq!(ids(&found), ["a", "b", "c"]);
  }

  #[tokio::test]
  async fn never_includes_the_artist_itself() {
    // Mismo nombre con otro id (alias) y mismo id con otro nombre.
    let catalog = InMemoryCatalog::new().with_album(
      "x",
      "alb",
      &[&[("x", "X"), ("x2", "X")], &[("x", "X (Live)"), ("y", "Y")]],
    );

    let found = CollaboratorExtractor::new(catalog).extract(&"x".into(), "X").await.unwrap();

    assert!(found.iter().all(|c| c.name != "X" && c.id.as_str() != "x"));
    assert_eq!(ids(&found), ["y"]);
  }

  #[tokio::test]
  async fn follows_pagination_to_the_end() {
    let mut catalog = InMemoryCatalog::new().with_page_size(2);
    for n in 0..5 {
      let album = format!("alb{n}");
      let collab = format!("c{n}");
      let credits: &[(&str, &str)] = &[("me", "Me"), (collab.as_str(), collab.as_str())];
      catalog = catalog.with_album("me", &album, &[credits, credits, credits]);
    }

    let extractor = CollaboratorExtractor::new(catalog);
    let found = extractor.extract(&"me".into(), "Me").await.unwrap();

    assert_eq!(ids(&found), ["c0", "c1", "c2", "c3", "c4"]);
    // 3 páginas de álbumes + 2 páginas de pistas por cada uno de los 5 álbumes.
    assert_eq!(extractor.gateway().calls(), 3 + 5 * 2);
  }

  #[tokio::test]
  async fn empty_albums_and_tracks_are_fine() {
    let catalog = InMemoryCatalog::new().with_album("me", "empty", &[]).with_album("me", "silent", &[&[]]);

    let found = CollaboratorExtractor::new(catalog).extract(&"me".into(), "Me").await.unwrap();

    assert!(found.is_empty());
  }

  #[tokio::test]
  async fn malformed_id_is_a_catalog_error() {
    let extractor = CollaboratorExtractor::new(InMemoryCatalog::new());
    let err = extractor.extract(&"not an id".into(), "Nobody").await.unwrap_err();

    assert!(matches!(err, CatalogError::InvalidId(_)));
  }
}
