// Application layer
// Team management actions, expressed against the repository ports

pub mod navigation;
pub mod team_service;

pub use navigation::{Destination, Flash, Navigation};
pub use team_service::{ListView, NewView, TeamService};
