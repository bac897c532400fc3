pub mod auth;

pub use auth::{AuthRejection, Session, TeamStaff, DENIED_PATH};
