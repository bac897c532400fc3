use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::coursework::{Assignment, Course};
use crate::domain::repositories::CourseworkRepository;
use crate::domain::team::TeamType;

/// PostgreSQL implementation of CourseworkRepository
pub struct PostgresCourseworkRepository {
    pool: PgPool,
}

impl PostgresCourseworkRepository {
    /// Creates a new PostgresCourseworkRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseworkRepository for PostgresCourseworkRepository {
    async fn find_assignment(&self, id: Uuid) -> Result<Option<Assignment>, String> {
        sqlx::query_as(
            r#"
            SELECT id, name, course_id
            FROM assignments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find assignment by id: {}", e))
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>, String> {
        sqlx::query_as(
            r#"
            SELECT id, name
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find course by id: {}", e))
    }

    async fn find_participants(
        &self,
        team_type: TeamType,
        parent_id: Uuid,
    ) -> Result<Vec<Uuid>, String> {
        sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM participants
            WHERE parent_type = $1 AND parent_id = $2
            ORDER BY enrolled_at, user_id
            "#,
        )
        .bind(team_type)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find participants: {}", e))
    }
}
