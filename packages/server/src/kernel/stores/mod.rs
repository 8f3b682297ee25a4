//! Key/value store backends implementing [`BaseKeyValueStore`].
//!
//! | Backend | Use |
//! |---|---|
//! | [`InMemoryStore`] | tests, ephemeral deployments |
//! | [`JsonFileStore`] | single-host deployments without a database |
//! | [`PostgresStore`] | production |
//!
//! [`BaseKeyValueStore`]: crate::kernel::BaseKeyValueStore

mod file;
mod memory;
mod postgres;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
