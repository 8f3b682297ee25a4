//! Counting domain - a channel-bound counting game.
//!
//! Members take turns posting the next integer. A wrong number, or the same
//! member counting twice in a row, resets the count to zero.
//!
//! ```text
//! RawChatEvent → edges::adapter → CountingGame::handle_message
//!     → CountingMachine (dedup + validator, pure)
//!     → PersistQueue (async save) + effects::reactions
//! ```

pub mod dedup;
pub mod edges;
pub mod effects;
pub mod events;
pub mod game;
pub mod machine;
pub mod models;
pub mod persist_queue;
pub mod persistence;
pub mod validator;

pub use edges::RawChatEvent;
pub use events::{ChatMessage, Outcome, SkipReason};
pub use game::{CountingGame, CountingSettings};
pub use models::{GameState, GameStatus};
pub use persistence::{PersistError, StateGateway, DEFAULT_STATE_KEY};
pub use validator::{Decision, FailReason, NonNumericPolicy};
