use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::coursework::{Assignment, Course};
use crate::domain::team::TeamType;

/// Read access to the parents teams hang off
#[async_trait]
pub trait CourseworkRepository: Send + Sync {
    /// Find an assignment by ID
    async fn find_assignment(&self, id: Uuid) -> Result<Option<Assignment>, String>;

    /// Find a course by ID
    async fn find_course(&self, id: Uuid) -> Result<Option<Course>, String>;

    /// User ids enrolled in an assignment or course, in enrollment order
    async fn find_participants(
        &self,
        team_type: TeamType,
        parent_id: Uuid,
    ) -> Result<Vec<Uuid>, String>;
}
