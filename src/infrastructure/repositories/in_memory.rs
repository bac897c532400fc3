//! In-memory repository implementations
//!
//! Backs the service in tests and in `STORAGE=memory` runs. Mirrors the
//! Postgres schema's constraints: team names are unique per parent, and
//! deleting a team drops its waitlist entries.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::coursework::{Assignment, Course};
use crate::domain::repositories::{
    CourseworkRepository, TeamRepository, WaitlistEntry, WaitlistRepository,
};
use crate::domain::team::{Team, TeamType};

#[derive(Default)]
struct State {
    assignments: HashMap<Uuid, Assignment>,
    courses: HashMap<Uuid, Course>,
    participants: HashMap<(TeamType, Uuid), Vec<Uuid>>,
    teams: Vec<Team>,
    waitlists: Vec<WaitlistEntry>,
}

/// Single store implementing every repository port
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
    writes: AtomicU64,
}

fn lock_error<T>(_: T) -> String {
    "Failed to acquire lock".to_string()
}

impl InMemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository write calls made through the ports
    ///
    /// Seeding helpers do not count.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    pub fn insert_assignment(&self, assignment: Assignment) -> Result<(), String> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.assignments.insert(assignment.id, assignment);
        Ok(())
    }

    pub fn insert_course(&self, course: Course) -> Result<(), String> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.courses.insert(course.id, course);
        Ok(())
    }

    /// Enrolls a user in an assignment or course
    pub fn add_participant(
        &self,
        team_type: TeamType,
        parent_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), String> {
        let mut state = self.state.write().map_err(lock_error)?;
        let enrolled = state.participants.entry((team_type, parent_id)).or_default();
        if !enrolled.contains(&user_id) {
            enrolled.push(user_id);
        }
        Ok(())
    }

    /// Stores a team without going through the write counter
    pub fn insert_team(&self, team: Team) -> Result<(), String> {
        let mut state = self.state.write().map_err(lock_error)?;
        upsert(&mut state.teams, team)
    }

    /// Total number of stored teams across all parents
    pub fn team_count(&self) -> Result<usize, String> {
        Ok(self.state.read().map_err(lock_error)?.teams.len())
    }
}

fn check_unique(teams: &[Team], team: &Team) -> Result<(), String> {
    let clash = teams.iter().any(|t| {
        t.id() != team.id()
            && t.team_type() == team.team_type()
            && t.parent_id() == team.parent_id()
            && t.name() == team.name()
    });

    if clash {
        return Err(format!(
            "duplicate key value violates unique constraint: team name '{}'",
            team.name()
        ));
    }
    Ok(())
}

fn upsert(teams: &mut Vec<Team>, team: Team) -> Result<(), String> {
    check_unique(teams, &team)?;
    match teams.iter_mut().find(|t| t.id() == team.id()) {
        Some(existing) => *existing = team,
        None => teams.push(team),
    }
    Ok(())
}

fn remove_teams(state: &mut State, keep: impl Fn(&Team) -> bool) -> u64 {
    let before = state.teams.len();
    let mut removed_ids = Vec::new();
    state.teams.retain(|t| {
        let kept = keep(t);
        if !kept {
            removed_ids.push(t.id());
        }
        kept
    });
    state.waitlists.retain(|w| !removed_ids.contains(&w.team_id));
    (before - state.teams.len()) as u64
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn save(&self, team: &Team) -> Result<(), String> {
        self.save_all(std::slice::from_ref(team)).await
    }

    async fn save_all(&self, teams: &[Team]) -> Result<(), String> {
        let mut state = self.state.write().map_err(lock_error)?;
        self.record_write();

        // a clash anywhere in the batch leaves the store untouched
        let mut staged = state.teams.clone();
        for team in teams {
            upsert(&mut staged, team.clone())?;
        }

        state.teams = staged;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, String> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.teams.iter().find(|t| t.id() == id).cloned())
    }

    async fn find_by_parent(
        &self,
        team_type: TeamType,
        parent_id: Uuid,
    ) -> Result<Vec<Team>, String> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .teams
            .iter()
            .filter(|t| t.team_type() == team_type && t.parent_id() == parent_id)
            .cloned()
            .collect())
    }

    async fn find_by_name(
        &self,
        team_type: TeamType,
        parent_id: Uuid,
        name: &str,
    ) -> Result<Option<Team>, String> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .teams
            .iter()
            .find(|t| t.team_type() == team_type && t.parent_id() == parent_id && t.name() == name)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, String> {
        let mut state = self.state.write().map_err(lock_error)?;
        self.record_write();
        Ok(remove_teams(&mut state, |t| t.id() != id) > 0)
    }

    async fn delete_by_parent(&self, team_type: TeamType, parent_id: Uuid) -> Result<u64, String> {
        let mut state = self.state.write().map_err(lock_error)?;
        self.record_write();
        Ok(remove_teams(&mut state, |t| {
            t.team_type() != team_type || t.parent_id() != parent_id
        }))
    }
}

#[async_trait]
impl CourseworkRepository for InMemoryStore {
    async fn find_assignment(&self, id: Uuid) -> Result<Option<Assignment>, String> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.assignments.get(&id).cloned())
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>, String> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.courses.get(&id).cloned())
    }

    async fn find_participants(
        &self,
        team_type: TeamType,
        parent_id: Uuid,
    ) -> Result<Vec<Uuid>, String> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .participants
            .get(&(team_type, parent_id))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl WaitlistRepository for InMemoryStore {
    async fn add(&self, entry: WaitlistEntry) -> Result<(), String> {
        let mut state = self.state.write().map_err(lock_error)?;
        self.record_write();
        state.waitlists.push(entry);
        Ok(())
    }

    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<WaitlistEntry>, String> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .waitlists
            .iter()
            .filter(|w| w.team_id == team_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::TeamName;
    use chrono::Utc;

    fn team(team_type: TeamType, parent_id: Uuid, name: &str) -> Team {
        Team::new(team_type, parent_id, TeamName::new(name).unwrap()).0
    }

    #[tokio::test]
    async fn save_and_find_team() {
        let store = InMemoryStore::new();
        let parent = Uuid::new_v4();
        let t = team(TeamType::Assignment, parent, "A");

        store.save(&t).await.unwrap();

        assert_eq!(store.find_by_id(t.id()).await.unwrap(), Some(t.clone()));
        assert_eq!(
            store
                .find_by_name(TeamType::Assignment, parent, "A")
                .await
                .unwrap()
                .map(|t| t.id()),
            Some(t.id())
        );
        assert!(store
            .find_by_name(TeamType::Course, parent, "A")
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_name_in_scope_is_rejected() {
        let store = InMemoryStore::new();
        let parent = Uuid::new_v4();

        store.save(&team(TeamType::Assignment, parent, "A")).await.unwrap();
        let result = store.save(&team(TeamType::Assignment, parent, "A")).await;

        assert!(result.unwrap_err().contains("duplicate"));
        // same name under another parent is fine
        store
            .save(&team(TeamType::Assignment, Uuid::new_v4(), "A"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_batch_leaves_store_untouched() {
        let store = InMemoryStore::new();
        let parent = Uuid::new_v4();
        let batch = vec![
            team(TeamType::Course, parent, "X"),
            team(TeamType::Course, parent, "X"),
        ];

        assert!(store.save_all(&batch).await.is_err());
        assert_eq!(store.team_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_drops_waitlist_entries() {
        let store = InMemoryStore::new();
        let t = team(TeamType::Assignment, Uuid::new_v4(), "W");
        store.insert_team(t.clone()).unwrap();
        store
            .add(WaitlistEntry {
                id: Uuid::new_v4(),
                team_id: t.id(),
                topic_id: Uuid::new_v4(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        assert!(store.delete(t.id()).await.unwrap());
        assert!(!store.delete(t.id()).await.unwrap());
        assert!(store.find_by_team(t.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_by_parent_only_touches_that_parent() {
        let store = InMemoryStore::new();
        let parent = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.insert_team(team(TeamType::Course, parent, "1")).unwrap();
        store.insert_team(team(TeamType::Course, parent, "2")).unwrap();
        store.insert_team(team(TeamType::Course, other, "1")).unwrap();
        store.insert_team(team(TeamType::Assignment, parent, "1")).unwrap();

        assert_eq!(store.delete_by_parent(TeamType::Course, parent).await.unwrap(), 2);
        assert_eq!(store.team_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn participants_keep_enrollment_order() {
        let store = InMemoryStore::new();
        let parent = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        store.add_participant(TeamType::Assignment, parent, a).unwrap();
        store.add_participant(TeamType::Assignment, parent, b).unwrap();
        store.add_participant(TeamType::Assignment, parent, a).unwrap();

        assert_eq!(
            store.find_participants(TeamType::Assignment, parent).await.unwrap(),
            vec![a, b]
        );
        assert!(store
            .find_participants(TeamType::Course, parent)
            .await
            .unwrap()
            .is_empty());
    }
}
