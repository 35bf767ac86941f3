pub mod auth;
pub mod config;
pub mod mapping;
pub mod spotify;

pub use config::{CatalogConfig, Credentials};
pub use spotify::SpotifyGateway;
