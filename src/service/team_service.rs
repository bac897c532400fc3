use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use super::navigation::{Destination, Navigation};
use crate::domain::coursework::{Assignment, TeamParent};
use crate::domain::errors::{TeamError, TeamResult};
use crate::domain::repositories::{CourseworkRepository, TeamRepository, WaitlistRepository};
use crate::domain::team::events::TeamEvent;
use crate::domain::team::randomizer;
use crate::domain::team::{Team, TeamName, TeamType};

/// Context of the team listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    /// Set only when listing an assignment's teams
    pub assignment: Option<Assignment>,
    pub parent: Option<TeamParent>,
    pub teams: Vec<Team>,
}

/// Context of the team creation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewView {
    pub parent: Option<TeamParent>,
    pub team_type: TeamType,
}

/// Team management actions
///
/// Each mutating action returns a [`Navigation`]. User-facing failures
/// (name clashes, missing records, bequeath preconditions) come back as a
/// redirect with an error flash; only repository failures surface as `Err`.
#[derive(Clone)]
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    coursework: Arc<dyn CourseworkRepository>,
    waitlists: Arc<dyn WaitlistRepository>,
}

fn log_events(events: &[TeamEvent]) {
    for event in events {
        match event {
            TeamEvent::MemberAdded { team_id, user_id } => {
                tracing::debug!(event = event.kind(), %team_id, %user_id, "team event");
            }
            _ => tracing::info!(event = event.kind(), team_id = %event.team_id(), "team event"),
        }
    }
}

/// Turns a user-facing error into a redirect to `fallback` with an error flash
fn recover(result: TeamResult<Navigation>, fallback: Destination) -> TeamResult<Navigation> {
    match result {
        Err(error) if error.is_user_facing() => {
            tracing::warn!(%error, "team action rejected");
            Ok(Navigation::to(fallback).with_error(error.to_string()))
        }
        other => other,
    }
}

fn copy_all(teams: &[Team], team_type: TeamType, parent_id: Uuid) -> (Vec<Team>, Vec<TeamEvent>) {
    teams
        .iter()
        .map(|team| team.copy_to(team_type, parent_id))
        .unzip()
}

impl TeamService {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        coursework: Arc<dyn CourseworkRepository>,
        waitlists: Arc<dyn WaitlistRepository>,
    ) -> Self {
        Self {
            teams,
            coursework,
            waitlists,
        }
    }

    /// Looks up the parent of the given kind
    pub async fn resolve_parent(
        &self,
        team_type: TeamType,
        id: Uuid,
    ) -> TeamResult<Option<TeamParent>> {
        let parent = match team_type {
            TeamType::Assignment => self
                .coursework
                .find_assignment(id)
                .await?
                .map(TeamParent::Assignment),
            TeamType::Course => self.coursework.find_course(id).await?.map(TeamParent::Course),
        };
        Ok(parent)
    }

    async fn require_parent(&self, team_type: TeamType, id: Uuid) -> TeamResult<TeamParent> {
        self.resolve_parent(team_type, id)
            .await?
            .ok_or(TeamError::ParentNotFound { team_type, id })
    }

    /// Fails with `TeamExists` if another team of `parent` already uses `name`
    ///
    /// `exclude` is the team being renamed, which may keep its own name.
    pub async fn check_for_existing(
        &self,
        parent: &TeamParent,
        name: &str,
        exclude: Option<Uuid>,
    ) -> TeamResult<()> {
        let existing = self
            .teams
            .find_by_name(parent.team_type(), parent.id(), name)
            .await?;

        match existing {
            Some(team) if Some(team.id()) != exclude => Err(TeamError::TeamExists {
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Teams of an assignment or course
    ///
    /// An unknown type or a missing parent yields an empty view.
    pub async fn list(&self, id: Option<Uuid>, team_type: Option<TeamType>) -> TeamResult<ListView> {
        let (Some(id), Some(team_type)) = (id, team_type) else {
            tracing::debug!(?id, "team list requested for unknown parent type");
            return Ok(ListView::default());
        };

        let Some(parent) = self.resolve_parent(team_type, id).await? else {
            tracing::debug!(%id, %team_type, "team list requested for missing parent");
            return Ok(ListView::default());
        };

        let teams = self.teams.find_by_parent(team_type, id).await?;
        Ok(ListView {
            assignment: parent.as_assignment().cloned(),
            parent: Some(parent),
            teams,
        })
    }

    /// Context for the creation form
    pub async fn new_form(&self, id: Uuid, team_type: TeamType) -> TeamResult<NewView> {
        Ok(NewView {
            parent: self.resolve_parent(team_type, id).await?,
            team_type,
        })
    }

    /// Creates an empty team under a parent
    pub async fn create(&self, id: Uuid, team_type: TeamType, name: &str) -> TeamResult<Navigation> {
        recover(
            self.try_create(id, team_type, name).await,
            Destination::New { id, team_type },
        )
    }

    async fn try_create(&self, id: Uuid, team_type: TeamType, name: &str) -> TeamResult<Navigation> {
        let parent = self.require_parent(team_type, id).await?;
        let name = TeamName::new(name).map_err(TeamError::InvalidName)?;
        self.check_for_existing(&parent, name.as_str(), None).await?;

        let (team, events) = Team::new(parent.team_type(), parent.id(), name);
        self.teams.save(&team).await?;
        log_events(&events);

        Ok(Navigation::to(Destination::List {
            id: parent.id(),
            team_type: parent.team_type(),
        })
        .with_success(format!(
            "The team \"{}\" has been successfully created.",
            team.name()
        )))
    }

    /// The team behind the edit form
    pub async fn edit(&self, id: Uuid) -> TeamResult<Option<Team>> {
        Ok(self.teams.find_by_id(id).await?)
    }

    /// Renames a team
    pub async fn update(&self, id: Uuid, name: &str) -> TeamResult<Navigation> {
        recover(self.try_update(id, name).await, Destination::Edit { id })
    }

    async fn try_update(&self, id: Uuid, name: &str) -> TeamResult<Navigation> {
        let mut team = self
            .teams
            .find_by_id(id)
            .await?
            .ok_or(TeamError::TeamNotFound(id))?;
        let parent = self.require_parent(team.team_type(), team.parent_id()).await?;

        let name = TeamName::new(name).map_err(TeamError::InvalidName)?;
        self.check_for_existing(&parent, name.as_str(), Some(team.id()))
            .await?;

        if let Some(event) = team.rename(name) {
            self.teams.save(&team).await?;
            log_events(&[event]);
        }

        Ok(Navigation::to(Destination::List {
            id: parent.id(),
            team_type: parent.team_type(),
        })
        .with_success(format!(
            "The team \"{}\" has been successfully updated.",
            team.name()
        )))
    }

    /// Deletes a team together with its waitlist entries
    ///
    /// A missing team is treated as already deleted.
    pub async fn delete(&self, id: Uuid) -> TeamResult<Navigation> {
        let Some(team) = self.teams.find_by_id(id).await? else {
            tracing::debug!(%id, "delete requested for missing team");
            return Ok(Navigation::to(Destination::Back { fallback: None }));
        };

        let queued = self.waitlists.find_by_team(team.id()).await?.len();
        let parent = self
            .resolve_parent(team.team_type(), team.parent_id())
            .await?;
        self.teams.delete(team.id()).await?;

        log_events(&[team.deleted_event()]);
        tracing::info!(
            team_id = %team.id(),
            parent = parent.as_ref().map(TeamParent::name).unwrap_or("<missing>"),
            waitlist_entries = queued,
            "team deleted"
        );

        let fallback = Destination::List {
            id: team.parent_id(),
            team_type: team.team_type(),
        };
        Ok(Navigation::to(Destination::Back {
            fallback: Some(Box::new(fallback)),
        })
        .with_success(format!(
            "The team \"{}\" has been successfully deleted.",
            team.name()
        )))
    }

    /// Deletes every team of a parent
    pub async fn delete_all(&self, id: Uuid, team_type: TeamType) -> TeamResult<Navigation> {
        let teams = self.teams.find_by_parent(team_type, id).await?;
        let list = Destination::List { id, team_type };

        if teams.is_empty() {
            return Ok(Navigation::to(list).with_note("0 teams were deleted"));
        }

        let removed = self.teams.delete_by_parent(team_type, id).await?;

        let events: Vec<TeamEvent> = teams.iter().map(Team::deleted_event).collect();
        log_events(&events);
        tracing::info!(parent_id = %id, %team_type, removed, "all teams deleted");

        Ok(Navigation::to(list).with_note(format!("{} teams were deleted", removed)))
    }

    /// Places the parent's unassigned participants on random teams
    pub async fn randomize_teams(
        &self,
        id: Uuid,
        team_type: TeamType,
        team_size: i64,
    ) -> TeamResult<Navigation> {
        recover(
            self.try_randomize_teams(id, team_type, team_size).await,
            Destination::List { id, team_type },
        )
    }

    async fn try_randomize_teams(
        &self,
        id: Uuid,
        team_type: TeamType,
        team_size: i64,
    ) -> TeamResult<Navigation> {
        let team_size = usize::try_from(team_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(TeamError::InvalidTeamSize)?;

        let parent = self.require_parent(team_type, id).await?;
        let existing = self.teams.find_by_parent(team_type, id).await?;
        let participants = self.coursework.find_participants(team_type, id).await?;

        let plan = {
            let mut rng = rand::thread_rng();
            randomizer::randomize(
                parent.name(),
                team_type,
                id,
                &existing,
                &participants,
                team_size,
                &mut rng,
            )?
        };

        let changed: Vec<Team> = plan.teams().cloned().collect();
        if !changed.is_empty() {
            self.teams.save_all(&changed).await?;
        }
        log_events(&plan.events);
        tracing::info!(
            parent_id = %id,
            %team_type,
            team_size,
            created = plan.created.len(),
            topped_up = plan.topped_up.len(),
            placed = plan.placed_members(),
            "teams randomized"
        );

        Ok(Navigation::to(Destination::List { id, team_type })
            .with_note(format!("{} teams were created", plan.created.len())))
    }

    /// Copies the owning course's teams into an assignment
    pub async fn copy_to_assignment(&self, id: Uuid) -> TeamResult<Navigation> {
        recover(
            self.try_copy_to_assignment(id).await,
            Destination::List {
                id,
                team_type: TeamType::Assignment,
            },
        )
    }

    async fn try_copy_to_assignment(&self, id: Uuid) -> TeamResult<Navigation> {
        let assignment = self
            .coursework
            .find_assignment(id)
            .await?
            .ok_or(TeamError::AssignmentNotFound)?;

        let course = match assignment.course_id {
            Some(course_id) => self.coursework.find_course(course_id).await?,
            None => None,
        }
        .ok_or(TeamError::NotAssociatedWithCourse)?;

        let list = Destination::List {
            id: assignment.id,
            team_type: TeamType::Assignment,
        };

        let course_teams = self.teams.find_by_parent(TeamType::Course, course.id).await?;
        if course_teams.is_empty() {
            return Ok(Navigation::to(list)
                .with_note("No teams were found when trying to copy to assignment"));
        }

        let taken: HashSet<String> = self
            .teams
            .find_by_parent(TeamType::Assignment, assignment.id)
            .await?
            .into_iter()
            .map(|t| t.name().to_string())
            .collect();
        if let Some(clash) = course_teams.iter().find(|t| taken.contains(t.name())) {
            return Err(TeamError::TeamExists {
                name: clash.name().to_string(),
            });
        }

        let (copies, events) = copy_all(&course_teams, TeamType::Assignment, assignment.id);
        self.teams.save_all(&copies).await?;
        log_events(&events);
        tracing::info!(
            course_id = %course.id,
            assignment_id = %assignment.id,
            copied = copies.len(),
            "course teams copied to assignment"
        );

        Ok(Navigation::to(list).with_note(format!(
            "{} teams were successfully copied to \"{}\"",
            copies.len(),
            assignment.name
        )))
    }

    /// Copies all of an assignment's teams up to its course
    ///
    /// Refused when `team_type` is not `Assignment`, when the assignment has
    /// no course, or when the course already has teams.
    pub async fn bequeath_all(&self, id: Uuid, team_type: &str) -> TeamResult<Navigation> {
        recover(
            self.try_bequeath_all(id, team_type).await,
            Destination::List {
                id,
                team_type: TeamType::Assignment,
            },
        )
    }

    async fn try_bequeath_all(&self, id: Uuid, team_type: &str) -> TeamResult<Navigation> {
        if team_type != TeamType::Assignment.to_string() {
            return Err(TeamError::InvalidTeamTypeForBequeathal);
        }

        let assignment = self
            .coursework
            .find_assignment(id)
            .await?
            .ok_or(TeamError::AssignmentNotFound)?;
        let course_id = assignment
            .course_id
            .ok_or(TeamError::NoCourseForAssignment)?;
        let course = self
            .coursework
            .find_course(course_id)
            .await?
            .ok_or(TeamError::NoCourseForAssignment)?;

        if !self
            .teams
            .find_by_parent(TeamType::Course, course.id)
            .await?
            .is_empty()
        {
            return Err(TeamError::CourseHasTeams);
        }

        let teams = self
            .teams
            .find_by_parent(TeamType::Assignment, assignment.id)
            .await?;
        let (copies, events) = copy_all(&teams, TeamType::Course, course.id);
        if !copies.is_empty() {
            self.teams.save_all(&copies).await?;
        }
        log_events(&events);
        tracing::info!(
            assignment_id = %assignment.id,
            course_id = %course.id,
            copied = copies.len(),
            "assignment teams bequeathed to course"
        );

        Ok(Navigation::to(Destination::List {
            id: assignment.id,
            team_type: TeamType::Assignment,
        })
        .with_note(format!(
            "{} teams were successfully copied to \"{}\"",
            copies.len(),
            course.name
        )))
    }
}
