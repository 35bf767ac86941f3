pub mod catalog;
pub mod memory;
pub mod progress;
pub mod sink;

pub use catalog::{CatalogError, CatalogGateway};
pub use memory::{InMemoryCatalog, InMemorySink};
pub use progress::{NoProgress, ProgressReporter};
pub use sink::{GraphSink, SinkError};
