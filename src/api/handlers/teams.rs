use axum::{
    extract::{Query, State},
    http::{header::REFERER, HeaderMap},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::TeamStaff;
use crate::api::redirect::navigate;
use crate::api::state::AppState;
use crate::domain::coursework::TeamParent;
use crate::domain::team::{Team, TeamType};
use crate::service::{ListView, NewView};

/// Query of the team listing
///
/// Both fields stay strings: an unparseable id or unknown type yields an
/// empty listing rather than a rejection.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub team_type: Option<String>,
}

/// Query naming a parent
#[derive(Debug, Deserialize)]
pub struct ParentParams {
    pub id: Uuid,
    #[serde(default)]
    pub team_type: TeamType,
}

/// Query naming a team
#[derive(Debug, Deserialize)]
pub struct TeamParams {
    pub id: Uuid,
}

/// Editable team fields
#[derive(Debug, Deserialize)]
pub struct TeamFields {
    pub name: String,
}

/// Request body for creating a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    /// Parent id
    pub id: Uuid,
    #[serde(default)]
    pub team_type: TeamType,
    pub team: TeamFields,
}

/// Request body for renaming a team
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    /// Team id
    pub id: Uuid,
    pub team: TeamFields,
}

/// Request body for deleting a team
#[derive(Debug, Deserialize)]
pub struct DeleteTeamRequest {
    pub id: Uuid,
}

/// Request body for actions over all teams of a parent
#[derive(Debug, Deserialize)]
pub struct ParentRequest {
    pub id: Uuid,
    #[serde(default)]
    pub team_type: TeamType,
}

/// Request body for random team formation
#[derive(Debug, Deserialize)]
pub struct RandomizeTeamsRequest {
    pub id: Uuid,
    #[serde(default)]
    pub team_type: TeamType,
    pub team_size: i64,
}

/// Request body for copying course teams into an assignment
#[derive(Debug, Deserialize)]
pub struct CopyToAssignmentRequest {
    /// Assignment id
    pub id: Uuid,
}

/// Request body for bequeathing assignment teams to the course
///
/// `team_type` is free text so a wrong type gets the bequeath error flash
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct BequeathAllRequest {
    /// Assignment id
    pub id: Uuid,
    #[serde(default)]
    pub team_type: String,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub team_type: TeamType,
    pub parent_id: Uuid,
    pub members: Vec<Uuid>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            name: team.name().to_string(),
            team_type: team.team_type(),
            parent_id: team.parent_id(),
            members: team.members().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ParentResponse {
    Assignment {
        id: Uuid,
        name: String,
        course_id: Option<Uuid>,
    },
    Course {
        id: Uuid,
        name: String,
    },
}

impl From<&TeamParent> for ParentResponse {
    fn from(parent: &TeamParent) -> Self {
        match parent {
            TeamParent::Assignment(a) => ParentResponse::Assignment {
                id: a.id,
                name: a.name.clone(),
                course_id: a.course_id,
            },
            TeamParent::Course(c) => ParentResponse::Course {
                id: c.id,
                name: c.name.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub assignment: Option<ParentResponse>,
    pub parent: Option<ParentResponse>,
    pub teams: Vec<TeamResponse>,
}

impl From<&ListView> for ListResponse {
    fn from(view: &ListView) -> Self {
        Self {
            assignment: view
                .assignment
                .clone()
                .map(|a| ParentResponse::from(&TeamParent::Assignment(a))),
            parent: view.parent.as_ref().map(ParentResponse::from),
            teams: view.teams.iter().map(TeamResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewTeamResponse {
    pub parent: Option<ParentResponse>,
    pub team_type: TeamType,
}

impl From<&NewView> for NewTeamResponse {
    fn from(view: &NewView) -> Self {
        Self {
            parent: view.parent.as_ref().map(ParentResponse::from),
            team_type: view.team_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditTeamResponse {
    pub team: Option<TeamResponse>,
}

/// List the teams of an assignment or course
///
/// GET /api/teams/list?id=..&type=Assignment|Course
pub async fn list(
    State(state): State<AppState>,
    TeamStaff(_): TeamStaff,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let id = params
        .id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id).ok());
    let team_type = params.team_type.as_deref().and_then(TeamType::parse);

    let view = state.service.list(id, team_type).await?;
    Ok(Json(ListResponse::from(&view)))
}

/// Context for the team creation form
///
/// GET /api/teams/new?id=..&team_type=..
pub async fn new_team(
    State(state): State<AppState>,
    TeamStaff(_): TeamStaff,
    Query(params): Query<ParentParams>,
) -> Result<Json<NewTeamResponse>, ApiError> {
    let view = state.service.new_form(params.id, params.team_type).await?;
    Ok(Json(NewTeamResponse::from(&view)))
}

/// Create a team under a parent
///
/// POST /api/teams/create
pub async fn create(
    State(state): State<AppState>,
    TeamStaff(session): TeamStaff,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, ApiError> {
    tracing::info!(user_id = %session.user_id, parent_id = %req.id, "create team");
    let navigation = state
        .service
        .create(req.id, req.team_type, &req.team.name)
        .await?;
    Ok(navigate(&navigation, None))
}

/// The team behind the edit form
///
/// GET /api/teams/edit?id=..
pub async fn edit(
    State(state): State<AppState>,
    TeamStaff(_): TeamStaff,
    Query(params): Query<TeamParams>,
) -> Result<Json<EditTeamResponse>, ApiError> {
    let team = state.service.edit(params.id).await?;
    Ok(Json(EditTeamResponse {
        team: team.as_ref().map(TeamResponse::from),
    }))
}

/// Rename a team
///
/// POST /api/teams/update
pub async fn update(
    State(state): State<AppState>,
    TeamStaff(session): TeamStaff,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<Response, ApiError> {
    tracing::info!(user_id = %session.user_id, team_id = %req.id, "update team");
    let navigation = state.service.update(req.id, &req.team.name).await?;
    Ok(navigate(&navigation, None))
}

/// Delete a team, returning to the referring page
///
/// POST /api/teams/delete
pub async fn delete(
    State(state): State<AppState>,
    TeamStaff(session): TeamStaff,
    headers: HeaderMap,
    Json(req): Json<DeleteTeamRequest>,
) -> Result<Response, ApiError> {
    tracing::info!(user_id = %session.user_id, team_id = %req.id, "delete team");
    let referrer = headers.get(REFERER).and_then(|value| value.to_str().ok());
    let navigation = state.service.delete(req.id).await?;
    Ok(navigate(&navigation, referrer))
}

/// Delete every team of a parent
///
/// POST /api/teams/delete_all
pub async fn delete_all(
    State(state): State<AppState>,
    TeamStaff(session): TeamStaff,
    Json(req): Json<ParentRequest>,
) -> Result<Response, ApiError> {
    tracing::info!(user_id = %session.user_id, parent_id = %req.id, "delete all teams");
    let navigation = state.service.delete_all(req.id, req.team_type).await?;
    Ok(navigate(&navigation, None))
}

/// Place a parent's unassigned participants on random teams
///
/// POST /api/teams/randomize_teams
pub async fn randomize_teams(
    State(state): State<AppState>,
    TeamStaff(session): TeamStaff,
    Json(req): Json<RandomizeTeamsRequest>,
) -> Result<Response, ApiError> {
    tracing::info!(
        user_id = %session.user_id,
        parent_id = %req.id,
        team_size = req.team_size,
        "randomize teams"
    );
    let navigation = state
        .service
        .randomize_teams(req.id, req.team_type, req.team_size)
        .await?;
    Ok(navigate(&navigation, None))
}

/// Copy the course's teams into an assignment
///
/// POST /api/teams/copy_to_assignment
pub async fn copy_to_assignment(
    State(state): State<AppState>,
    TeamStaff(session): TeamStaff,
    Json(req): Json<CopyToAssignmentRequest>,
) -> Result<Response, ApiError> {
    tracing::info!(user_id = %session.user_id, assignment_id = %req.id, "copy teams to assignment");
    let navigation = state.service.copy_to_assignment(req.id).await?;
    Ok(navigate(&navigation, None))
}

/// Copy an assignment's teams up to its course
///
/// POST /api/teams/bequeath_all
pub async fn bequeath_all(
    State(state): State<AppState>,
    TeamStaff(session): TeamStaff,
    Json(req): Json<BequeathAllRequest>,
) -> Result<Response, ApiError> {
    tracing::info!(user_id = %session.user_id, assignment_id = %req.id, "bequeath teams");
    let navigation = state.service.bequeath_all(req.id, &req.team_type).await?;
    Ok(navigate(&navigation, None))
}
