mod config;
mod infrastructure;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use colabnet_catalog::{CatalogConfig, Credentials, SpotifyGateway};
use colabnet_core::domain::{CrawlLimits, CrawlSummary};
use colabnet_core::graph::Graph;
use colabnet_core::ports::{GraphSink, InMemorySink};
use colabnet_core::services::FrontierCrawler;
use colabnet_core::CoreError;
use colabnet_storage::CsvGraphStore;
use colabnet_storage::config::StorageConfig;

pub use crate::config::CrawlerConfig;
pub use infrastructure::logging::init as init_logging;
use infrastructure::reporter::TracingReporter;

#[derive(Debug, Parser)]
#[command(name = "colabnet", version, about = "Builds artist collaboration graphs from a music catalog")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Crawl the collaboration network starting from an artist name.
  Crawl(CrawlArgs),
  /// Load the stored graph and print a summary.
  Graph(GraphArgs),
}

/// Rutas de los almacenes; si no se dan, se usa la sección `[storage]`.
#[derive(Debug, Args)]
pub struct StoreArgs {
  /// Node store (CSV).
  #[arg(long)]
  pub nodes: Option<PathBuf>,
  /// Edge store (CSV).
  #[arg(long)]
  pub edges: Option<PathBuf>,
}

impl StoreArgs {
  fn resolve(&self) -> Result<StorageConfig> {
    let mut cfg = StorageConfig::load().context("failed to load [storage] config")?;
    if let Some(p) = &self.nodes {
      cfg.nodes_path = p.clone();
    }
    if let Some(p) = &self.edges {
      cfg.edges_path = p.clone();
    }
    Ok(cfg)
  }
}

#[derive(Debug, Args)]
pub struct CrawlArgs {
  /// Free-text artist name used as the seed.
  pub seed: String,
  /// Maximum number of artists to process.
  #[arg(long)]
  pub max_artists: Option<usize>,
  /// Maximum hop distance from the seed.
  #[arg(long)]
  pub max_depth: Option<u32>,
  #[command(flatten)]
  pub store: StoreArgs,
  /// Crawl without writing anything to disk.
  #[arg(long)]
  pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct GraphArgs {
  #[command(flatten)]
  pub store: StoreArgs,
  /// Show the collaborators of this artist (exact name).
  #[arg(long)]
  pub label: Option<String>,
  /// How many of the most connected artists to list.
  #[arg(long, default_value_t = 10)]
  pub top: usize,
}

pub async fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Command::Crawl(args) => crawl(args).await,
    Command::Graph(args) => graph(args),
  }
}

async fn crawl(args: CrawlArgs) -> Result<()> {
  let limits = CrawlerConfig::load()
    .context("failed to load [crawler] config")?
    .limits(args.max_artists, args.max_depth);
  let catalog_cfg = CatalogConfig::load().context("failed to load [catalog] config")?;
  let credentials = Credentials::from_env()?;
  let gateway = SpotifyGateway::new(catalog_cfg, credentials)?;

  let summary = if args.dry_run {
    info!("dry run, nothing will be written");
    run_crawl(gateway, InMemorySink::new(), limits, &args.seed).await
  } else {
    let storage = args.store.resolve()?;
    let store = CsvGraphStore::from_config(&storage)
      .with_context(|| format!("failed to open stores at {}", storage.nodes_path.display()))?;
    run_crawl(gateway, store, limits, &args.seed).await
  };

  let summary = match summary {
    Ok(s) => s,
    Err(CoreError::ArtistNotFound(name)) => bail!("no artist matches \"{name}\""),
    Err(e) => return Err(e.into()),
  };

  println!(
    "{}: {} artists processed, {} nodes and {} edges written, {} unresolved",
    summary.seed, summary.processed, summary.nodes_written, summary.edges_written, summary.unresolved
  );
  Ok(())
}

async fn run_crawl<S: GraphSink>(
  gateway: SpotifyGateway,
  sink: S,
  limits: CrawlLimits,
  seed: &str,
) -> Result<CrawlSummary, CoreError> {
  let mut crawler = FrontierCrawler::new(gateway, sink, TracingReporter::new(), limits);
  crawler.crawl(seed).await
}

fn graph(args: GraphArgs) -> Result<()> {
  let storage = args.store.resolve()?;
  let graph = colabnet_storage::load_graph(&storage.nodes_path, &storage.edges_path)?;

  println!("{} artists, {} collaborations", graph.node_count(), graph.edge_count());

  match &args.label {
    Some(label) => print_neighbors(&graph, label),
    None => {
      for (label, degree) in top_by_degree(&graph, args.top) {
        println!("{degree:>5}  {label}");
      }
      Ok(())
    }
  }
}

fn print_neighbors(graph: &Graph, label: &str) -> Result<()> {
  let Some(node) = graph.find_node_by_label(label) else {
    bail!("no artist labelled \"{label}\" in the graph");
  };

  let mut names: Vec<&str> = graph.neighbors(node.id()).map(|n| n.label()).collect();
  names.sort_unstable();

  println!("{} ({}) has {} collaborators:", node.label(), node.id(), names.len());
  for name in names {
    println!("  {name}");
  }
  Ok(())
}

/// Los `n` artistas con más colaboraciones; empates por nombre.
fn top_by_degree(graph: &Graph, n: usize) -> Vec<(&str, usize)> {
  let mut ranked: Vec<(&str, usize)> = graph.nodes().map(|node| (node.label(), node.degree())).collect();
  ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
  ranked.truncate(n);
  ranked
}

#[cfg(test)]
mod tests {
  use super::*;
  use colabnet_core::domain::ArtistId;

  fn sample() -> Graph {
    let mut g = Graph::new();
    for (id, label) in [("a", "Ana"), ("b", "Beto"), ("c", "Caro"), ("d", "Dani")] {
      g.add_node(ArtistId::new(id), label);
    }
    g.add_edge(&ArtistId::new("a"), &ArtistId::new("b"));
    g.add_edge(&ArtistId::new("a"), &ArtistId::new("c"));
    g.add_edge(&ArtistId::new("b"), &ArtistId::new("c"));
    g.add_edge(&ArtistId::new("c"), &ArtistId::new("d"));
    g
  }

  #[test]
  fn ranks_by_degree_then_name() {
    let g = sample();
    assert_eq!(top_by_degree(&g, 3), vec![("Caro", 3), ("Ana", 2), ("Beto", 2)]);
  }

  #[test]
  fn unknown_label_is_an_error() {
    assert!(print_neighbors(&sample(), "Nadie").is_err());
  }

  #[test]
  fn parses_crawl_flags() {
    let cli = Cli::try_parse_from(["colabnet", "crawl", "Melendi", "--max-depth", "1", "--nodes", "n.csv"]).unwrap();
    let Command::Crawl(args) = cli.command else { panic!("expected crawl") };
    assert_eq!(args.seed, "Melendi");
    assert_eq!(args.max_depth, Some(1));
    assert_eq!(args.max_artists, None);
    assert_eq!(args.store.nodes, Some(PathBuf::from("n.csv")));
    assert!(!args.dry_run);
  }
}
