use super::events::TeamEvent;
use super::value_objects::{TeamName, TeamType};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Team aggregate root
///
/// A named group of users scoped to either an assignment or a course.
///
/// # Invariants
/// - Name is a valid [`TeamName`]
/// - A user appears at most once in `members`
/// - `team_type` and `parent_id` only change by copying into a new team
///
/// Name uniqueness within `(team_type, parent_id)` spans many aggregates and
/// is checked by the service before every write.
///
/// # Example
/// ```
/// use coursework_teams_api::domain::team::{Team, TeamName, TeamType};
/// use uuid::Uuid;
///
/// let (team, events) = Team::new(
///     TeamType::Assignment,
///     Uuid::new_v4(),
///     TeamName::new("rando team").expect("valid name"),
/// );
///
/// assert_eq!(team.name(), "rando team");
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: Uuid,
    name: TeamName,
    team_type: TeamType,
    parent_id: Uuid,
    members: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Creates an empty team under the given parent
    pub fn new(team_type: TeamType, parent_id: Uuid, name: TeamName) -> (Self, Vec<TeamEvent>) {
        let team = Self {
            id: Uuid::new_v4(),
            name,
            team_type,
            parent_id,
            members: Vec::new(),
            created_at: Utc::now(),
        };

        let events = vec![TeamEvent::Created {
            team_id: team.id,
            team_type: team.team_type,
            parent_id: team.parent_id,
            name: team.name.to_string(),
        }];

        (team, events)
    }

    /// Gives the team a new name
    ///
    /// Returns `None` when the name is unchanged.
    pub fn rename(&mut self, name: TeamName) -> Option<TeamEvent> {
        if self.name == name {
            return None;
        }

        let from = std::mem::replace(&mut self.name, name);
        Some(TeamEvent::Renamed {
            team_id: self.id,
            from: from.into_inner(),
            to: self.name.to_string(),
        })
    }

    /// Adds a user to the team
    ///
    /// # Errors
    /// If the user is already a member.
    pub fn add_member(&mut self, user_id: Uuid) -> Result<TeamEvent, String> {
        if self.has_member(user_id) {
            return Err(format!("User {} is already on team {}", user_id, self.name));
        }

        self.members.push(user_id);
        Ok(TeamEvent::MemberAdded {
            team_id: self.id,
            user_id,
        })
    }

    /// Duplicates the team under another parent
    ///
    /// The copy gets a fresh id and keeps the name and member order. The
    /// source team is left untouched.
    pub fn copy_to(&self, team_type: TeamType, parent_id: Uuid) -> (Team, TeamEvent) {
        let copy = Team {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            team_type,
            parent_id,
            members: self.members.clone(),
            created_at: Utc::now(),
        };

        let event = TeamEvent::Copied {
            source_team_id: self.id,
            team_id: copy.id,
            team_type,
            parent_id,
        };

        (copy, event)
    }

    /// Event describing this team's destruction
    pub fn deleted_event(&self) -> TeamEvent {
        TeamEvent::Deleted {
            team_id: self.id,
            name: self.name.to_string(),
        }
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn team_type(&self) -> TeamType {
        self.team_type
    }

    /// Id of the owning assignment or course
    pub fn parent_id(&self) -> Uuid {
        self.parent_id
    }

    /// Member user ids in join order
    pub fn members(&self) -> &[Uuid] {
        &self.members
    }

    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Skips validation: the row was validated when it was written.
    /// Only to be used by repository implementations.
    pub fn from_persistence(
        id: Uuid,
        name: String,
        team_type: TeamType,
        parent_id: Uuid,
        members: Vec<Uuid>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: TeamName::from_trusted(name),
            team_type,
            parent_id,
            members,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_named(name: &str) -> Team {
        let (team, _) = Team::new(
            TeamType::Assignment,
            Uuid::new_v4(),
            TeamName::new(name).unwrap(),
        );
        team
    }

    #[test]
    fn create_team_generates_created_event() {
        let parent_id = Uuid::new_v4();
        let (team, events) = Team::new(
            TeamType::Course,
            parent_id,
            TeamName::new("Test team").unwrap(),
        );

        assert_eq!(team.name(), "Test team");
        assert_eq!(team.team_type(), TeamType::Course);
        assert_eq!(team.parent_id(), parent_id);
        assert!(team.members().is_empty());
        assert_eq!(
            events,
            vec![TeamEvent::Created {
                team_id: team.id(),
                team_type: TeamType::Course,
                parent_id,
                name: "Test team".to_string(),
            }]
        );
    }

    #[test]
    fn rename_changes_name() {
        let mut team = team_named("Old");
        let event = team.rename(TeamName::new("New").unwrap());

        assert_eq!(team.name(), "New");
        assert_eq!(
            event,
            Some(TeamEvent::Renamed {
                team_id: team.id(),
                from: "Old".to_string(),
                to: "New".to_string(),
            })
        );
    }

    #[test]
    fn rename_to_same_name_is_noop() {
        let mut team = team_named("Same");
        assert!(team.rename(TeamName::new("Same").unwrap()).is_none());
    }

    #[test]
    fn add_member_rejects_duplicates() {
        let mut team = team_named("Members");
        let user = Uuid::new_v4();

        assert!(team.add_member(user).is_ok());
        assert!(team.add_member(user).is_err());
        assert_eq!(team.size(), 1);
        assert!(team.has_member(user));
    }

    #[test]
    fn copy_keeps_name_and_members_under_new_parent() {
        let mut team = team_named("Copied");
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        team.add_member(first).unwrap();
        team.add_member(second).unwrap();

        let course_id = Uuid::new_v4();
        let (copy, event) = team.copy_to(TeamType::Course, course_id);

        assert_ne!(copy.id(), team.id());
        assert_eq!(copy.name(), "Copied");
        assert_eq!(copy.team_type(), TeamType::Course);
        assert_eq!(copy.parent_id(), course_id);
        assert_eq!(copy.members(), &[first, second]);
        assert_eq!(event.team_id(), copy.id());

        // source untouched
        assert_eq!(team.team_type(), TeamType::Assignment);
        assert_eq!(team.size(), 2);
    }

    #[test]
    fn deleted_event_carries_name() {
        let team = team_named("Gone");
        assert_eq!(
            team.deleted_event(),
            TeamEvent::Deleted {
                team_id: team.id(),
                name: "Gone".to_string(),
            }
        );
    }

    #[test]
    fn from_persistence_restores_stored_state() {
        let id = Uuid::new_v4();
        let parent = Uuid::new_v4();
        let members = vec![Uuid::new_v4(), Uuid::new_v4()];
        let created_at = Utc::now();

        let team = Team::from_persistence(
            id,
            "Stored Team".to_string(),
            TeamType::Course,
            parent,
            members.clone(),
            created_at,
        );

        assert_eq!(team.id(), id);
        assert_eq!(team.name(), "Stored Team");
        assert_eq!(team.team_type(), TeamType::Course);
        assert_eq!(team.parent_id(), parent);
        assert_eq!(team.members(), members.as_slice());
        assert_eq!(team.created_at(), created_at);
    }
}
