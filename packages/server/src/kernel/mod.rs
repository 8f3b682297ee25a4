//! Kernel module - server infrastructure and dependencies.

pub mod connector;
pub mod deps;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

pub use connector::{ConnectorOptions, HttpConnector, LogReactor};
pub use deps::ServerDeps;
pub use stores::{InMemoryStore, JsonFileStore, PostgresStore};
pub use test_dependencies::TestDependencies;
pub use traits::*;
