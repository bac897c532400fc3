use thiserror::Error;
use uuid::Uuid;

use crate::domain::team::TeamType;

/// Errors raised by team management actions
///
/// Every variant except `Repository` is a user-facing condition; its message
/// is shown verbatim as a flash.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TeamError {
    #[error("The team name {name} is already in use.")]
    TeamExists { name: String },

    #[error("{0}")]
    InvalidName(String),

    #[error("Team size must be at least 1")]
    InvalidTeamSize,

    #[error("{0}")]
    InvalidMembership(String),

    #[error("Team not found: {0}")]
    TeamNotFound(Uuid),

    #[error("{team_type} not found: {id}")]
    ParentNotFound { team_type: TeamType, id: Uuid },

    #[error("Assignment not found")]
    AssignmentNotFound,

    #[error("This assignment is not associated with a course.")]
    NotAssociatedWithCourse,

    #[error("Invalid team type for bequeathal")]
    InvalidTeamTypeForBequeathal,

    #[error("No course was found for this assignment.")]
    NoCourseForAssignment,

    #[error("The course already has associated teams")]
    CourseHasTeams,

    #[error("Repository error: {0}")]
    Repository(String),
}

impl TeamError {
    /// Whether the error should be reported to the user as a flash
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, TeamError::Repository(_))
    }
}

impl From<String> for TeamError {
    fn from(message: String) -> Self {
        TeamError::Repository(message)
    }
}

pub type TeamResult<T> = Result<T, TeamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bequeath_messages_are_verbatim() {
        assert_eq!(
            TeamError::InvalidTeamTypeForBequeathal.to_string(),
            "Invalid team type for bequeathal"
        );
        assert_eq!(
            TeamError::NoCourseForAssignment.to_string(),
            "No course was found for this assignment."
        );
        assert_eq!(
            TeamError::CourseHasTeams.to_string(),
            "The course already has associated teams"
        );
    }

    #[test]
    fn team_exists_message() {
        let error = TeamError::TeamExists {
            name: "rando team".to_string(),
        };
        assert_eq!(error.to_string(), "The team name rando team is already in use.");
    }

    #[test]
    fn parent_not_found_message() {
        let id = Uuid::nil();
        let error = TeamError::ParentNotFound {
            team_type: TeamType::Course,
            id,
        };
        assert_eq!(error.to_string(), format!("Course not found: {}", id));
    }

    #[test]
    fn repository_errors_are_not_user_facing() {
        assert!(!TeamError::from("boom".to_string()).is_user_facing());
        assert!(TeamError::CourseHasTeams.is_user_facing());
    }
}
