//! Respuestas JSON de la Spotify Web API y su mapeo al dominio.
//!
//! Solo se modelan los campos que usamos; el resto se ignora.

use colabnet_core::domain::{
  AlbumId, AlbumSummary, ArtistId, ArtistProfile, CreditedArtist, Page, PageCursor, TrackSummary,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Paging<T> {
  #[serde(default = "Vec::new")]
  pub items: Vec<T>,
  pub next: Option<String>,
}

impl<T> Paging<T> {
  pub fn into_page<U>(self, map: impl FnMut(T) -> Option<U>) -> Page<U> {
    let items = self.items.into_iter().filter_map(map).collect();
    match self.next {
      Some(next) => Page::with_next(items, PageCursor::new(next)),
      None => Page::last(items),
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
  pub artists: Paging<Option<ArtistObject>>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistObject {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub followers: Option<Followers>,
  #[serde(default)]
  pub genres: Vec<String>,
  #[serde(default)]
  pub popularity: Option<u32>,
  #[serde(default)]
  pub images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
pub struct Followers {
  pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Image {
  pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SimplifiedAlbum {
  pub id: String,
  pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SimplifiedTrack {
  pub name: String,
  #[serde(default)]
  pub artists: Vec<SimplifiedArtist>,
}

/// Las pistas locales pueden venir sin id.
#[derive(Debug, Deserialize)]
pub struct SimplifiedArtist {
  pub id: Option<String>,
  pub name: Option<String>,
}

impl From<ArtistObject> for ArtistProfile {
  fn from(a: ArtistObject) -> Self {
    ArtistProfile {
      id: ArtistId::from(a.id),
      name: a.name,
      followers: a.followers.and_then(|f| f.total).unwrap_or(0),
      genres: a.genres,
      popularity: a.popularity.unwrap_or(0),
      // Spotify ordena las imágenes de mayor a menor; nos quedamos con la primera.
      image_url: a.images.into_iter().next().map(|i| i.url),
    }
  }
}

impl From<SimplifiedAlbum> for AlbumSummary {
  fn from(a: SimplifiedAlbum) -> Self {
    AlbumSummary { id: AlbumId::from(a.id), name: a.name }
  }
}

impl From<SimplifiedTrack> for TrackSummary {
  fn from(t: SimplifiedTrack) -> Self {
    let artists = t
      .artists
      .into_iter()
      .filter_map(|a| match (a.id, a.name) {
        (Some(id), Some(name)) if !id.is_empty() => Some(CreditedArtist::new(id, name)),
        _ => None,
      })
      .collect();
    TrackSummary { name: t.name, artists }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn search_result_maps_first_artist() {
    let json = r#"{
      "artists": {
        "href": "https://api.spotify.com/v1/search?query=artist%3AMelendi&type=artist",
        "items": [{
          "id": "6WY7D3jk8zTrHtmkqqo5GI",
          "name": "Melendi",
          "followers": { "href": null, "total": 3456789 },
          "genres": ["latin pop", "rumba"],
          "popularity": 68,
          "images": [{ "url": "https://i.scdn.co/image/big", "height": 640, "width": 640 },
                     { "url": "https://i.scdn.co/image/small", "height": 160, "width": 160 }],
          "type": "artist"
        }],
        "next": null
      }
    }"#;

    let resp: SearchResponse = serde_json::from_str(json).unwrap();
    let profile: ArtistProfile = resp.artists.items.into_iter().flatten().next().unwrap().into();

    assert_eq!(profile.id.as_str(), "6WY7D3jk8zTrHtmkqqo5GI");
    assert_eq!(profile.followers, 3_456_789);
    assert_eq!(profile.genres, ["latin pop", "rumba"]);
    assert_eq!(profile.popularity, 68);
    assert_eq!(profile.image_url.as_deref(), Some("https://i.scdn.co/image/big"));
  }

  #[test]
  fn artist_without_images_or_metrics() {
    let json = r#"{ "id": "x", "name": "X", "followers": { "total": null }, "images": [] }"#;
    let profile: ArtistProfile = serde_json::from_str::<ArtistObject>(json).unwrap().into();

    assert_eq!(profile.followers, 0);
    assert_eq!(profile.popularity, 0);
    assert!(profile.genres.is_empty());
    assert!(profile.image_url.is_none());
  }

  #[test]
  fn track_page_keeps_cursor_and_drops_local_artists() {
    let json = r#"{
      "items": [
        { "name": "Tu jardín con enanitos", "artists": [
          { "id": "mel", "name": "Melendi" },
          { "id": null, "name": "Local file artist" },
          { "id": "a", "name": "CollabA" }
        ]},
        { "name": "Instrumental", "artists": [] }
      ],
      "next": "https://api.spotify.com/v1/albums/alb/tracks?offset=50&limit=50"
    }"#;

    let paging: Paging<SimplifiedTrack> = serde_json::from_str(json).unwrap();
    let page = paging.into_page(|t| Some(TrackSummary::from(t)));

    assert_eq!(page.items.len(), 2);
    let ids: Vec<_> = page.items[0].artists.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["mel", "a"]);
    assert!(page.items[1].artists.is_empty());
    assert_eq!(page.next.unwrap().as_str(), "https://api.spotify.com/v1/albums/alb/tracks?offset=50&limit=50");
  }
}
