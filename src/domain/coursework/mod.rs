// Coursework domain module
// Assignments and courses are the two kinds of parent a team can belong to

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::team::TeamType;

/// An assignment, optionally owned by a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub name: String,
    /// May be absent, or point at a course that no longer exists
    pub course_id: Option<Uuid>,
}

/// A course; its teams are reusable across the course's assignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
}

/// Owner of a set of teams
///
/// Replaces looking a parent class up by name: each variant is resolved by
/// its own repository finder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamParent {
    Assignment(Assignment),
    Course(Course),
}

impl TeamParent {
    pub fn id(&self) -> Uuid {
        match self {
            TeamParent::Assignment(assignment) => assignment.id,
            TeamParent::Course(course) => course.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TeamParent::Assignment(assignment) => &assignment.name,
            TeamParent::Course(course) => &course.name,
        }
    }

    /// Type of the teams this parent owns
    pub fn team_type(&self) -> TeamType {
        match self {
            TeamParent::Assignment(_) => TeamType::Assignment,
            TeamParent::Course(_) => TeamType::Course,
        }
    }

    pub fn as_assignment(&self) -> Option<&Assignment> {
        match self {
            TeamParent::Assignment(assignment) => Some(assignment),
            TeamParent::Course(_) => None,
        }
    }
}

impl From<Assignment> for TeamParent {
    fn from(assignment: Assignment) -> Self {
        TeamParent::Assignment(assignment)
    }
}

impl From<Course> for TeamParent {
    fn from(course: Course) -> Self {
        TeamParent::Course(course)
    }
}
