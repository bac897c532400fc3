// User domain module
// Roles and the authorization predicate for team management

pub mod role;

pub use role::{action_allowed, Role};
