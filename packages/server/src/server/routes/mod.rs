// HTTP routes
pub mod events;
pub mod health;
pub mod setup;
pub mod status;

pub use events::*;
pub use health::*;
pub use setup::*;
pub use status::*;
