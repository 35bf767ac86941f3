use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use colabnet_core::domain::{ArtistId, ArtistRecord, CrawlSummary};
use colabnet_core::ports::ProgressReporter;
use tracing::{info, warn};

/// A `ProgressReporter` that turns crawl progress into tracing events.
///
/// Keeps its own counter so every line carries the running total.
#[derive(Debug, Default)]
pub struct TracingReporter {
  seen: AtomicUsize,
}

impl TracingReporter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn seen(&self) -> usize {
    self.seen.load(Ordering::Relaxed)
  }
}

#[async_trait]
impl ProgressReporter for TracingReporter {
  async fn start(&self, seed: &str) {
    self.seen.store(0, Ordering::Relaxed);
    info!(%seed, "crawling collaborators");
  }

  async fn on_artist(&self, record: &ArtistRecord, depth: u32, leaf: bool) {
    let n = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
    info!(n, depth, leaf, id = %record.id, "processing {}", record.label);
  }

  async fn on_unresolved(&self, id: &ArtistId, name: &str) {
    warn!(%id, "could not resolve {name}");
  }

  async fn finish(&self, summary: &CrawlSummary) {
    info!(
      seed = %summary.seed,
      processed = summary.processed,
      nodes = summary.nodes_written,
      edges = summary.edges_written,
      "done"
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(id: &str) -> ArtistRecord {
    ArtistRecord {
      id: ArtistId::new(id),
      label: id.to_uppercase(),
      followers: 0,
      popularity: 0,
      genres: vec![],
      image_url: None,
    }
  }

  #[tokio::test]
  async fn counts_artists_and_resets_on_start() {
    let reporter = TracingReporter::new();

    reporter.start("A").await;
    reporter.on_artist(&record("a"), 0, false).await;
    reporter.on_artist(&record("b"), 1, true).await;
    assert_eq!(reporter.seen(), 2);

    reporter.start("B").await;
    assert_eq!(reporter.seen(), 0);
  }
}
