pub mod collaborators;
pub mod crawler;

pub use collaborators::CollaboratorExtractor;
pub use crawler::{CrawlContext, FrontierCrawler};
