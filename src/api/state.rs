use std::sync::Arc;

use crate::domain::repositories::{CourseworkRepository, TeamRepository, WaitlistRepository};
use crate::service::TeamService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: TeamService,
    /// HS256 secret session tokens are verified with
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        coursework: Arc<dyn CourseworkRepository>,
        waitlists: Arc<dyn WaitlistRepository>,
        jwt_secret: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            service: TeamService::new(teams, coursework, waitlists),
            jwt_secret: jwt_secret.into(),
        }
    }
}
