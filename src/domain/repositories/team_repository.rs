use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::team::{Team, TeamType};

/// Repository trait for Team aggregate
///
/// Defines the contract for persisting and retrieving teams.
/// Implementations should handle database-specific details.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a team with its members (insert or update)
    async fn save(&self, team: &Team) -> Result<(), String>;

    /// Save several teams as one write; either all are stored or none
    async fn save_all(&self, teams: &[Team]) -> Result<(), String>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, String>;

    /// Find all teams of a parent, oldest first
    async fn find_by_parent(&self, team_type: TeamType, parent_id: Uuid)
        -> Result<Vec<Team>, String>;

    /// Find the team of a parent carrying `name`
    async fn find_by_name(
        &self,
        team_type: TeamType,
        parent_id: Uuid,
        name: &str,
    ) -> Result<Option<Team>, String>;

    /// Delete a team by ID along with its waitlist entries, as one write
    ///
    /// Returns whether a team was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, String>;

    /// Delete every team of a parent and their waitlist entries, as one write
    ///
    /// Returns how many teams were removed.
    async fn delete_by_parent(&self, team_type: TeamType, parent_id: Uuid)
        -> Result<u64, String>;
}
