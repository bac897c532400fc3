use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A team queued for a topic it could not get yet
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub team_id: Uuid,
    pub topic_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for topic waitlists
///
/// Entries are removed with their team by [`TeamRepository::delete`].
///
/// [`TeamRepository::delete`]: crate::domain::repositories::TeamRepository::delete
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Queue a team for a topic
    async fn add(&self, entry: WaitlistEntry) -> Result<(), String>;

    /// Entries of a team, oldest first
    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<WaitlistEntry>, String>;
}
