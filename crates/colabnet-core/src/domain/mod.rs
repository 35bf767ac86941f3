pub mod artist;
pub mod catalog;
pub mod collaborators;
pub mod crawl;
pub mod edge;
pub mod ids;

pub use artist::ArtistRecord;
pub use catalog::{AlbumSummary, ArtistProfile, CreditedArtist, Page, PageCursor, TrackSummary};
pub use collaborators::Collaborators;
pub use crawl::{CrawlLimits, CrawlSummary};
pub use edge::CollaborationEdge;
pub use ids::{AlbumId, ArtistId};
