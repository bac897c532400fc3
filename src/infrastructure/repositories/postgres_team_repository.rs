use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::repositories::TeamRepository;
use crate::domain::team::{Team, TeamType};

/// PostgreSQL implementation of TeamRepository
///
/// Teams live in `teams`, their ordered members in `team_members`. Writes
/// that touch both tables run in one transaction.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
    team_type: TeamType,
    parent_id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    team_id: Uuid,
    user_id: Uuid,
}

const SELECT_TEAMS: &str = r#"
    SELECT id, name, team_type, parent_id, created_at
    FROM teams
"#;

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_members(&self, rows: Vec<TeamRow>) -> Result<Vec<Team>, String> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let member_rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT team_id, user_id
            FROM team_members
            WHERE team_id = ANY($1)
            ORDER BY team_id, position
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to load team members: {}", e))?;

        let mut members: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in member_rows {
            members.entry(row.team_id).or_default().push(row.user_id);
        }

        Ok(rows
            .into_iter()
            .map(|r| {
                Team::from_persistence(
                    r.id,
                    r.name,
                    r.team_type,
                    r.parent_id,
                    members.remove(&r.id).unwrap_or_default(),
                    r.created_at,
                )
            })
            .collect())
    }
}

async fn write_team(conn: &mut PgConnection, team: &Team) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO teams (id, name, team_type, parent_id, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name
        "#,
    )
    .bind(team.id())
    .bind(team.name())
    .bind(team.team_type())
    .bind(team.parent_id())
    .bind(team.created_at())
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM team_members WHERE team_id = $1")
        .bind(team.id())
        .execute(&mut *conn)
        .await?;

    for (position, user_id) in team.members().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, user_id, position)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(team.id())
        .bind(user_id)
        .bind(position as i32)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn save(&self, team: &Team) -> Result<(), String> {
        self.save_all(std::slice::from_ref(team)).await
    }

    async fn save_all(&self, teams: &[Team]) -> Result<(), String> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| format!("Failed to begin transaction: {}", e))?;

        for team in teams {
            write_team(&mut tx, team)
                .await
                .map_err(|e| format!("Failed to save team {}: {}", team.id(), e))?;
        }

        tx.commit()
            .await
            .map_err(|e| format!("Failed to commit teams: {}", e))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, String> {
        let row: Option<TeamRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_TEAMS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| format!("Failed to find team by id: {}", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.with_members(vec![row]).await?.pop())
    }

    async fn find_by_parent(
        &self,
        team_type: TeamType,
        parent_id: Uuid,
    ) -> Result<Vec<Team>, String> {
        let rows: Vec<TeamRow> = sqlx::query_as(&format!(
            "{} WHERE team_type = $1 AND parent_id = $2 ORDER BY created_at, name",
            SELECT_TEAMS
        ))
        .bind(team_type)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find teams by parent: {}", e))?;

        self.with_members(rows).await
    }

    async fn find_by_name(
        &self,
        team_type: TeamType,
        parent_id: Uuid,
        name: &str,
    ) -> Result<Option<Team>, String> {
        let row: Option<TeamRow> = sqlx::query_as(&format!(
            "{} WHERE team_type = $1 AND parent_id = $2 AND name = $3",
            SELECT_TEAMS
        ))
        .bind(team_type)
        .bind(parent_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find team by name: {}", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.with_members(vec![row]).await?.pop())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, String> {
        // team_members and waitlists rows go with the team (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to delete team: {}", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_parent(&self, team_type: TeamType, parent_id: Uuid) -> Result<u64, String> {
        // single statement; dependent rows cascade
        let result = sqlx::query("DELETE FROM teams WHERE team_type = $1 AND parent_id = $2")
            .bind(team_type)
            .bind(parent_id)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to delete teams by parent: {}", e))?;

        Ok(result.rows_affected())
    }
}
