// Team domain module
// Contains team aggregate root, value objects, domain events and the
// random team builder

#![allow(clippy::module_inception)]

pub mod events;
pub mod randomizer;
pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use events::TeamEvent;
pub use team::Team;
pub use value_objects::{TeamName, TeamType};
