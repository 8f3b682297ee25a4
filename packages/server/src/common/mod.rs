// Common types shared between the kernel and domain layers

pub mod entity_ids;
pub mod id;

pub use entity_ids::*;
