use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::{ArtistId, ArtistProfile, ArtistRecord, CrawlLimits, CrawlSummary};
use crate::errors::CoreError;
use crate::ports::{CatalogGateway, GraphSink, ProgressReporter};
use crate::services::collaborators::CollaboratorExtractor;

/// Estado de un rastreo: artistas ya visitados y presupuesto consumido.
///
/// Se pasa explícitamente por todo el recorrido. Es compartido por todas las
/// ramas, así que `max_artists` limita el trabajo total y no por rama.
#[derive(Debug, Default)]
pub struct CrawlContext {
  visited: HashSet<ArtistId>,
  processed: usize,
}

impl CrawlContext {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn processed(&self) -> usize {
    self.processed
  }

  pub fn is_visited(&self, id: &ArtistId) -> bool {
    self.visited.contains(id)
  }

  fn mark(&mut self, id: ArtistId) {
    self.visited.insert(id);
    self.processed += 1;
  }
}

/// Artista pendiente en la frontera.
struct Frame {
  id: ArtistId,
  name: String,
  depth: u32,
  // Solo la semilla llega ya resuelta (viene de la búsqueda por nombre).
  profile: Option<ArtistProfile>,
}

/// Rastreo en profundidad, acotado por `CrawlLimits`, que persiste nodos y
/// aristas según los va descubriendo.
///
/// Usa una pila explícita en lugar de recursión; el orden de visita es el
/// mismo que el de la versión recursiva (colaboradores en orden de aparición).
/// Todo es secuencial: nunca hay dos peticiones al catálogo en vuelo.
pub struct FrontierCrawler<G, S, R>
where
  G: CatalogGateway,
  S: GraphSink,
  R: ProgressReporter,
{
  extractor: CollaboratorExtractor<G>,
  sink: S,
  reporter: R,
  limits: CrawlLimits,
}

impl<G, S, R> FrontierCrawler<G, S, R>
where
  G: CatalogGateway,
  S: GraphSink,
  R: ProgressReporter,
{
  pub fn new(gateway: G, sink: S, reporter: R, limits: CrawlLimits) -> Self {
    Self { extractor: CollaboratorExtractor::new(gateway), sink, reporter, limits }
  }

  pub fn sink(&self) -> &S {
    &self.sink
  }

  pub fn gateway(&self) -> &G {
    self.extractor.gateway()
  }

  pub fn into_sink(self) -> S {
    self.sink
  }

  /// Rastrea desde `seed_name` con un contexto nuevo.
  pub async fn crawl(&mut self, seed_name: &str) -> Result<CrawlSummary, CoreError> {
    let mut ctx = CrawlContext::new();
    self.crawl_with(&mut ctx, seed_name).await
  }

  /// Igual que [`FrontierCrawler::crawl`] pero con un contexto dado, que puede
  /// venir de rastreos anteriores (sus visitados se saltan y su presupuesto cuenta).
  ///
  /// Si la semilla no existe en el catálogo devuelve `CoreError::ArtistNotFound`.
  /// Cualquier error de catálogo o de persistencia aborta el rastreo sin reintentos;
  /// lo ya escrito en el sink se queda.
  pub async fn crawl_with(&mut self, ctx: &mut CrawlContext, seed_name: &str) -> Result<CrawlSummary, CoreError> {
    let seed = self
      .extractor
      .gateway()
      .search_artist(seed_name)
      .await?
      .ok_or_else(|| CoreError::ArtistNotFound(seed_name.to_string()))?;

    info!(seed = %seed.name, id = %seed.id, max_artists = self.limits.max_artists, max_depth = self.limits.max_depth, "crawl started");
    self.reporter.start(&seed.name).await;

    let mut summary = CrawlSummary { seed: seed.name.clone(), ..CrawlSummary::default() };
    let processed_before = ctx.processed();
    let mut stack = vec![Frame { id: seed.id.clone(), name: seed.name.clone(), depth: 0, profile: Some(seed) }];

    while let Some(frame) = stack.pop() {
      if ctx.processed() >= self.limits.max_artists {
        debug!(pending = stack.len() + 1, "artist budget exhausted");
        break;
      }
      if frame.depth > self.limits.max_depth || ctx.is_visited(&frame.id) {
        continue;
      }

      ctx.mark(frame.id.clone());

      let profile = match frame.profile {
        Some(p) => p,
        None => match self.extractor.gateway().get_artist(&frame.id).await? {
          Some(p) => p,
          None => {
            warn!(id = %frame.id, name = %frame.name, "collaborator not found in catalog, branch skipped");
            self.reporter.on_unresolved(&frame.id, &frame.name).await;
            summary.unresolved += 1;
            continue;
          }
        },
      };

      let record = ArtistRecord::from(profile);
      if self.sink.put_node(&record)? {
        summary.nodes_written += 1;
      }

      let leaf = frame.depth >= self.limits.max_depth;
      self.reporter.on_artist(&record, frame.depth, leaf).await;
      if leaf {
        continue;
      }

      let collaborators = self.extractor.extract(&record.id, &record.label).await?;
      summary.edges_written += self.sink.put_edges(&record.id, &collaborators)?;

      // Al revés para que el primero encontrado sea el primero en salir.
      for c in collaborators.into_iter().rev() {
        stack.push(Frame { id: c.id, name: c.name, depth: frame.depth + 1, profile: None });
      }
    }

    summary.processed = ctx.processed() - processed_before;
    info!(
      processed = summary.processed,
      nodes = summary.nodes_written,
      edges = summary.edges_written,
      unresolved = summary.unresolved,
      "crawl finished"
    );
    self.reporter.finish(&summary).await;

    Ok(summary)
  }
}
