use uuid::Uuid;

use super::value_objects::TeamType;

/// Domain events that occur within the Team aggregate
///
/// The service layer logs these after each successful write; they are the
/// audit trail of what an action changed.
///
/// # Example
/// ```
/// use coursework_teams_api::domain::team::events::TeamEvent;
/// use coursework_teams_api::domain::team::TeamType;
/// use uuid::Uuid;
///
/// let event = TeamEvent::Created {
///     team_id: Uuid::new_v4(),
///     team_type: TeamType::Assignment,
///     parent_id: Uuid::new_v4(),
///     name: "rando team".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamEvent {
    /// Fired when a team is created
    Created {
        team_id: Uuid,
        team_type: TeamType,
        parent_id: Uuid,
        name: String,
    },
    /// Fired when a team gets a new name
    Renamed {
        team_id: Uuid,
        from: String,
        to: String,
    },
    /// Fired when a team is duplicated under another parent
    Copied {
        /// Team the copy was made from
        source_team_id: Uuid,
        /// The new team
        team_id: Uuid,
        team_type: TeamType,
        parent_id: Uuid,
    },
    /// Fired when a user joins a team
    MemberAdded { team_id: Uuid, user_id: Uuid },
    /// Fired when a team is destroyed
    Deleted { team_id: Uuid, name: String },
}

impl TeamEvent {
    /// Returns the team_id for this event
    pub fn team_id(&self) -> Uuid {
        match self {
            TeamEvent::Created { team_id, .. } => *team_id,
            TeamEvent::Renamed { team_id, .. } => *team_id,
            TeamEvent::Copied { team_id, .. } => *team_id,
            TeamEvent::MemberAdded { team_id, .. } => *team_id,
            TeamEvent::Deleted { team_id, .. } => *team_id,
        }
    }

    /// Short name used as the `event` field in logs
    pub fn kind(&self) -> &'static str {
        match self {
            TeamEvent::Created { .. } => "team.created",
            TeamEvent::Renamed { .. } => "team.renamed",
            TeamEvent::Copied { .. } => "team.copied",
            TeamEvent::MemberAdded { .. } => "team.member_added",
            TeamEvent::Deleted { .. } => "team.deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_event_team_id() {
        let team_id = Uuid::new_v4();
        let event = TeamEvent::Created {
            team_id,
            team_type: TeamType::Course,
            parent_id: Uuid::new_v4(),
            name: "Test team".to_string(),
        };

        assert_eq!(event.team_id(), team_id);
        assert_eq!(event.kind(), "team.created");
    }

    #[test]
    fn copied_event_reports_new_team() {
        let source_team_id = Uuid::new_v4();
        let team_id = Uuid::new_v4();
        let event = TeamEvent::Copied {
            source_team_id,
            team_id,
            team_type: TeamType::Assignment,
            parent_id: Uuid::new_v4(),
        };

        assert_eq!(event.team_id(), team_id);
    }

    #[test]
    fn event_kinds_are_distinct() {
        let id = Uuid::new_v4();
        let kinds = [
            TeamEvent::Renamed {
                team_id: id,
                from: "a".into(),
                to: "b".into(),
            }
            .kind(),
            TeamEvent::MemberAdded {
                team_id: id,
                user_id: id,
            }
            .kind(),
            TeamEvent::Deleted {
                team_id: id,
                name: "a".into(),
            }
            .kind(),
        ];

        assert_eq!(kinds, ["team.renamed", "team.member_added", "team.deleted"]);
    }
}
