//! Integration tests for repository layer
//!
//! These tests verify that the Postgres repositories store teams with their
//! ordered members, enforce per-parent name uniqueness, and clear waitlists
//! when teams go away.
//!
//! They need a live database: `DATABASE_URL=... cargo test -- --ignored`

use chrono::Utc;
use coursework_teams_api::domain::repositories::{
    CourseworkRepository, TeamRepository, WaitlistEntry, WaitlistRepository,
};
use coursework_teams_api::domain::team::{Team, TeamName, TeamType};
use coursework_teams_api::infrastructure::database;
use coursework_teams_api::infrastructure::repositories::{
    PostgresCourseworkRepository, PostgresTeamRepository, PostgresWaitlistRepository,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Set up test database connection pool with the schema applied
async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");

    database::connect(&database_url, 5)
        .await
        .expect("Failed to connect to test database")
}

/// Create a course and an assignment belonging to it
async fn create_test_coursework(pool: &PgPool) -> (Uuid, Uuid) {
    let course_id = Uuid::new_v4();
    let assignment_id = Uuid::new_v4();

    sqlx::query("INSERT INTO courses (id, name) VALUES ($1, $2)")
        .bind(course_id)
        .bind("Repository Course")
        .execute(pool)
        .await
        .expect("Failed to create test course");

    sqlx::query("INSERT INTO assignments (id, name, course_id) VALUES ($1, $2, $3)")
        .bind(assignment_id)
        .bind("Repository Assignment")
        .bind(course_id)
        .execute(pool)
        .await
        .expect("Failed to create test assignment");

    (course_id, assignment_id)
}

/// Clean up test data
async fn cleanup(pool: &PgPool, course_id: Uuid, assignment_id: Uuid) {
    sqlx::query("DELETE FROM teams WHERE parent_id = $1 OR parent_id = $2")
        .bind(course_id)
        .bind(assignment_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup teams");
    sqlx::query("DELETE FROM participants WHERE parent_id = $1")
        .bind(assignment_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup participants");
    sqlx::query("DELETE FROM assignments WHERE id = $1")
        .bind(assignment_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup assignment");
    sqlx::query("DELETE FROM courses WHERE id = $1")
        .bind(course_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup course");
}

fn team_with_members(team_type: TeamType, parent_id: Uuid, name: &str, members: &[Uuid]) -> Team {
    let (mut team, _) = Team::new(team_type, parent_id, TeamName::new(name).unwrap());
    for member in members {
        team.add_member(*member).unwrap();
    }
    team
}

#[tokio::test]
#[ignore]
async fn test_save_and_find_team_keeps_member_order() {
    let pool = setup_test_db().await;
    let (course_id, assignment_id) = create_test_coursework(&pool).await;
    let repo = PostgresTeamRepository::new(pool.clone());

    let members = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let team = team_with_members(TeamType::Assignment, assignment_id, "Ordered", &members);
    repo.save(&team).await.expect("Failed to save team");

    let found = repo
        .find_by_id(team.id())
        .await
        .expect("Failed to find team")
        .expect("Team should exist");
    assert_eq!(found.name(), "Ordered");
    assert_eq!(found.team_type(), TeamType::Assignment);
    assert_eq!(found.members(), members.as_slice());

    let by_name = repo
        .find_by_name(TeamType::Assignment, assignment_id, "Ordered")
        .await
        .expect("Failed to find by name");
    assert_eq!(by_name.map(|t| t.id()), Some(team.id()));

    cleanup(&pool, course_id, assignment_id).await;
}

#[tokio::test]
#[ignore]
async fn test_rename_updates_existing_row() {
    let pool = setup_test_db().await;
    let (course_id, assignment_id) = create_test_coursework(&pool).await;
    let repo = PostgresTeamRepository::new(pool.clone());

    let mut team = team_with_members(TeamType::Assignment, assignment_id, "Before", &[]);
    repo.save(&team).await.unwrap();

    team.rename(TeamName::new("After").unwrap());
    repo.save(&team).await.unwrap();

    let teams = repo
        .find_by_parent(TeamType::Assignment, assignment_id)
        .await
        .unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].name(), "After");

    cleanup(&pool, course_id, assignment_id).await;
}

#[tokio::test]
#[ignore]
async fn test_save_all_is_atomic_on_name_clash() {
    let pool = setup_test_db().await;
    let (course_id, assignment_id) = create_test_coursework(&pool).await;
    let repo = PostgresTeamRepository::new(pool.clone());

    let first = team_with_members(TeamType::Course, course_id, "Same", &[]);
    let second = team_with_members(TeamType::Course, course_id, "Same", &[]);

    let result = repo.save_all(&[first, second]).await;
    assert!(result.is_err(), "duplicate names within a parent must fail");

    let teams = repo.find_by_parent(TeamType::Course, course_id).await.unwrap();
    assert!(teams.is_empty(), "failed batch must not leave partial teams");

    cleanup(&pool, course_id, assignment_id).await;
}

#[tokio::test]
#[ignore]
async fn test_same_name_allowed_under_different_parents() {
    let pool = setup_test_db().await;
    let (course_id, assignment_id) = create_test_coursework(&pool).await;
    let repo = PostgresTeamRepository::new(pool.clone());

    let assignment_team = team_with_members(TeamType::Assignment, assignment_id, "Shared", &[]);
    let (course_team, _) = assignment_team.copy_to(TeamType::Course, course_id);
    repo.save_all(&[assignment_team, course_team])
        .await
        .expect("Names are scoped per parent");

    cleanup(&pool, course_id, assignment_id).await;
}

#[tokio::test]
#[ignore]
async fn test_delete_by_parent_and_waitlist_cleanup() {
    let pool = setup_test_db().await;
    let (course_id, assignment_id) = create_test_coursework(&pool).await;
    let teams = PostgresTeamRepository::new(pool.clone());
    let waitlists = PostgresWaitlistRepository::new(pool.clone());

    let alpha = team_with_members(TeamType::Assignment, assignment_id, "Alpha", &[]);
    let beta = team_with_members(TeamType::Assignment, assignment_id, "Beta", &[]);
    teams.save_all(&[alpha.clone(), beta.clone()]).await.unwrap();

    let entry = WaitlistEntry {
        id: Uuid::new_v4(),
        team_id: alpha.id(),
        topic_id: Uuid::new_v4(),
        created_at: Utc::now(),
    };
    waitlists.add(entry).await.unwrap();
    assert_eq!(waitlists.find_by_team(alpha.id()).await.unwrap().len(), 1);

    let deleted = teams
        .delete_by_parent(TeamType::Assignment, assignment_id)
        .await
        .unwrap();
    assert_eq!(deleted, 2);
    assert!(waitlists.find_by_team(alpha.id()).await.unwrap().is_empty());
    assert!(!teams.delete(beta.id()).await.unwrap());

    cleanup(&pool, course_id, assignment_id).await;
}

#[tokio::test]
#[ignore]
async fn test_coursework_lookups() {
    let pool = setup_test_db().await;
    let (course_id, assignment_id) = create_test_coursework(&pool).await;
    let repo = PostgresCourseworkRepository::new(pool.clone());

    let assignment = repo
        .find_assignment(assignment_id)
        .await
        .unwrap()
        .expect("Assignment should exist");
    assert_eq!(assignment.course_id, Some(course_id));

    let course = repo.find_course(course_id).await.unwrap();
    assert_eq!(course.map(|c| c.name), Some("Repository Course".to_string()));

    let user_id = Uuid::new_v4();
    sqlx::query("INSERT INTO participants (parent_type, parent_id, user_id) VALUES ($1, $2, $3)")
        .bind(TeamType::Assignment)
        .bind(assignment_id)
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let participants = repo
        .find_participants(TeamType::Assignment, assignment_id)
        .await
        .unwrap();
    assert_eq!(participants, vec![user_id]);

    cleanup(&pool, course_id, assignment_id).await;
}
