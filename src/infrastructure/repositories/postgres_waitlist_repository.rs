use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::{WaitlistEntry, WaitlistRepository};

/// PostgreSQL implementation of WaitlistRepository
pub struct PostgresWaitlistRepository {
    pool: PgPool,
}

impl PostgresWaitlistRepository {
    /// Creates a new PostgresWaitlistRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WaitlistRepository for PostgresWaitlistRepository {
    async fn add(&self, entry: WaitlistEntry) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO waitlists (id, team_id, topic_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.id)
        .bind(entry.team_id)
        .bind(entry.topic_id)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to add waitlist entry: {}", e))?;

        Ok(())
    }

    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<WaitlistEntry>, String> {
        sqlx::query_as(
            r#"
            SELECT id, team_id, topic_id, created_at
            FROM waitlists
            WHERE team_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find waitlist entries: {}", e))
    }
}
