// Random team formation
// Places every unassigned participant of a parent on a team of bounded size

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use super::events::TeamEvent;
use super::team::Team;
use super::value_objects::{TeamName, TeamType};
use crate::domain::errors::{TeamError, TeamResult};

/// Teams touched by one randomization pass
#[derive(Debug, Default)]
pub struct RandomizedTeams {
    /// Existing teams that received new members
    pub topped_up: Vec<Team>,
    /// Newly formed teams
    pub created: Vec<Team>,
    pub events: Vec<TeamEvent>,
}

impl RandomizedTeams {
    /// Every team that must be written back
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.topped_up.iter().chain(self.created.iter())
    }

    pub fn placed_members(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TeamEvent::MemberAdded { .. }))
            .count()
    }
}

/// Generates `"<prefix> Team_<n>"` with the smallest `n` not in `taken`
///
/// # Example
/// ```
/// use std::collections::HashSet;
/// use coursework_teams_api::domain::team::randomizer::generate_team_name;
///
/// let taken: HashSet<String> = ["Lab 1 Team_1".to_string()].into();
/// let name = generate_team_name("Lab 1", &taken).expect("valid name");
/// assert_eq!(name.as_str(), "Lab 1 Team_2");
/// ```
pub fn generate_team_name(prefix: &str, taken: &HashSet<String>) -> TeamResult<TeamName> {
    let mut counter: u64 = 1;
    loop {
        let candidate = TeamName::new(format!("{} Team_{}", prefix.trim(), counter))
            .or_else(|_| TeamName::new(format!("Team_{}", counter)))
            .map_err(TeamError::InvalidName)?;

        if !taken.contains(candidate.as_str()) {
            return Ok(candidate);
        }
        counter += 1;
    }
}

/// Builds random teams of at most `team_size` members
///
/// Participants already on one of `existing` are left where they are. The
/// rest are shuffled, used first to fill existing teams below `team_size`,
/// then split into new teams named by [`generate_team_name`].
///
/// # Errors
/// `TeamError::InvalidTeamSize` if `team_size` is zero.
pub fn randomize<R: Rng + ?Sized>(
    parent_name: &str,
    team_type: TeamType,
    parent_id: Uuid,
    existing: &[Team],
    participants: &[Uuid],
    team_size: usize,
    rng: &mut R,
) -> TeamResult<RandomizedTeams> {
    if team_size == 0 {
        return Err(TeamError::InvalidTeamSize);
    }

    let mut seen: HashSet<Uuid> = existing
        .iter()
        .flat_map(|team| team.members().iter().copied())
        .collect();
    let mut pool: Vec<Uuid> = participants
        .iter()
        .copied()
        .filter(|user| seen.insert(*user))
        .collect();
    pool.shuffle(rng);

    let mut result = RandomizedTeams::default();
    let mut pool = pool.into_iter().peekable();

    for team in existing {
        if team.size() >= team_size || pool.peek().is_none() {
            continue;
        }

        let mut team = team.clone();
        while team.size() < team_size {
            let Some(user) = pool.next() else { break };
            let event = team.add_member(user).map_err(TeamError::InvalidMembership)?;
            result.events.push(event);
        }
        result.topped_up.push(team);
    }

    let mut taken: HashSet<String> = existing.iter().map(|t| t.name().to_string()).collect();
    let remaining: Vec<Uuid> = pool.collect();

    for chunk in remaining.chunks(team_size) {
        let name = generate_team_name(parent_name, &taken)?;
        taken.insert(name.to_string());

        let (mut team, events) = Team::new(team_type, parent_id, name);
        result.events.extend(events);
        for user in chunk {
            let event = team.add_member(*user).map_err(TeamError::InvalidMembership)?;
            result.events.push(event);
        }
        result.created.push(team);
    }

    Ok(result)
}
