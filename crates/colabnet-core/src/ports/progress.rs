use async_trait::async_trait;

use crate::domain::{ArtistId, ArtistRecord, CrawlSummary};

// La CLI implementa esto para informar del progreso (logs, barra, etc.).
// Es solo informativo: nunca puede hacer fallar un rastreo.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
  async fn start(&self, seed: &str);
  /// `leaf` indica que el artista está en la profundidad máxima y no se expandirá.
  async fn on_artist(&self, record: &ArtistRecord, depth: u32, leaf: bool);
  async fn on_unresolved(&self, id: &ArtistId, name: &str);
  async fn finish(&self, summary: &CrawlSummary);
}

/// Reporter que no hace nada.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

#[async_trait]
impl ProgressReporter for NoProgress {
  async fn start(&self, _seed: &str) {}
  async fn on_artist(&self, _record: &ArtistRecord, _depth: u32, _leaf: bool) {}
  async fn on_unresolved(&self, _id: &ArtistId, _name: &str) {}
  async fn finish(&self, _summary: &CrawlSummary) {}
}
