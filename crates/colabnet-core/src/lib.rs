pub mod domain;
pub mod errors;
pub mod graph;
pub mod ports;
pub mod services;

pub use errors::CoreError;
pub use graph::{Graph, Node};
