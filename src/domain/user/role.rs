use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried by a session
///
/// Ordered from least to most privileged, so `>=` compares privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    TeachingAssistant,
    Instructor,
    Administrator,
    SuperAdministrator,
}

impl Role {
    /// True for teaching assistants and every role above them
    pub fn has_ta_privileges(&self) -> bool {
        *self >= Role::TeachingAssistant
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Student => "Student",
            Role::TeachingAssistant => "Teaching Assistant",
            Role::Instructor => "Instructor",
            Role::Administrator => "Administrator",
            Role::SuperAdministrator => "Super-Administrator",
        };
        write!(f, "{}", name)
    }
}

/// Whether a session with `role` may use the team management actions
///
/// # Example
/// ```
/// use coursework_teams_api::domain::user::{action_allowed, Role};
///
/// assert!(action_allowed(Role::Instructor));
/// assert!(!action_allowed(Role::Student));
/// ```
pub fn action_allowed(role: Role) -> bool {
    role.has_ta_privileges()
}
