use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of parent a team hangs off
///
/// An `Assignment` team is scoped to a single assignment, a `Course` team to
/// a course and reusable across the course's assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "team_type", rename_all = "lowercase")]
pub enum TeamType {
    /// Team belongs to an assignment
    Assignment,
    /// Team belongs to a course
    Course,
}

impl TeamType {
    /// Parses a request-supplied type name
    ///
    /// Accepts the parent name (`Assignment`) as well as the team class name
    /// (`AssignmentTeam`). Anything else yields `None`.
    ///
    /// # Example
    /// ```
    /// use coursework_teams_api::domain::team::TeamType;
    ///
    /// assert_eq!(TeamType::parse("Course"), Some(TeamType::Course));
    /// assert_eq!(TeamType::parse("CourseTeam"), Some(TeamType::Course));
    /// assert_eq!(TeamType::parse("Subject"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Assignment" | "AssignmentTeam" => Some(TeamType::Assignment),
            "Course" | "CourseTeam" => Some(TeamType::Course),
            _ => None,
        }
    }
}

impl Default for TeamType {
    fn default() -> Self {
        TeamType::Assignment
    }
}

impl fmt::Display for TeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamType::Assignment => write!(f, "Assignment"),
            TeamType::Course => write!(f, "Course"),
        }
    }
}

/// Team name value object
///
/// # Invariants
/// - Not blank (surrounding whitespace is stripped)
/// - At most 255 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamName(String);

impl TeamName {
    const MAX_LEN: usize = 255;

    /// Creates a validated team name
    ///
    /// # Example
    /// ```
    /// use coursework_teams_api::domain::team::TeamName;
    ///
    /// let name = TeamName::new("  rando team ").expect("valid name");
    /// assert_eq!(name.as_str(), "rando team");
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err("Team name cannot be empty".to_string());
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(format!(
                "Team name cannot be longer than {} characters",
                Self::MAX_LEN
            ));
        }

        Ok(TeamName(trimmed.to_string()))
    }

    /// Wraps a name read back from storage without revalidating it
    pub(crate) fn from_trusted(name: String) -> Self {
        TeamName(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
