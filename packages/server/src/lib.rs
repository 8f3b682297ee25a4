// Counting Game Bot - API Core
//
// This crate runs a channel-bound counting game for a chat community.
// A connector forwards message events over HTTP; the game validates each
// count, persists the record to an external store, and reacts through the
// connector.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
