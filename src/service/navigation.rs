// Where an action sends the user next, and what it tells them

use serde::Serialize;
use uuid::Uuid;

use crate::domain::team::TeamType;

/// One-shot message shown on the next page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flash {
    Note(String),
    Error(String),
    Success(String),
}

/// Page an action redirects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Team listing of a parent
    List { id: Uuid, team_type: TeamType },
    /// Creation form for a parent
    New { id: Uuid, team_type: TeamType },
    /// Edit form of a team
    Edit { id: Uuid },
    /// The referring page; `fallback` (or `/`) when there is none
    Back { fallback: Option<Box<Destination>> },
}

impl Destination {
    /// Resolves the redirect target
    ///
    /// # Example
    /// ```
    /// use coursework_teams_api::domain::team::TeamType;
    /// use coursework_teams_api::service::Destination;
    /// use uuid::Uuid;
    ///
    /// let list = Destination::List { id: Uuid::nil(), team_type: TeamType::Course };
    /// assert_eq!(
    ///     list.location(None),
    ///     "/api/teams/list?id=00000000-0000-0000-0000-000000000000&type=Course"
    /// );
    /// ```
    pub fn location(&self, referrer: Option<&str>) -> String {
        match self {
            Destination::List { id, team_type } => {
                format!("/api/teams/list?id={}&type={}", id, team_type)
            }
            Destination::New { id, team_type } => {
                format!("/api/teams/new?id={}&team_type={}", id, team_type)
            }
            Destination::Edit { id } => format!("/api/teams/edit?id={}", id),
            Destination::Back { fallback } => match (referrer, fallback) {
                (Some(referrer), _) if !referrer.is_empty() => referrer.to_string(),
                (_, Some(fallback)) => fallback.location(None),
                _ => "/".to_string(),
            },
        }
    }
}

/// Redirect target plus optional flash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: Destination,
    pub flash: Option<Flash>,
}

impl Navigation {
    pub fn to(to: Destination) -> Self {
        Self { to, flash: None }
    }

    pub fn with_note(mut self, message: impl Into<String>) -> Self {
        self.flash = Some(Flash::Note(message.into()));
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.flash = Some(Flash::Error(message.into()));
        self
    }

    pub fn with_success(mut self, message: impl Into<String>) -> Self {
        self.flash = Some(Flash::Success(message.into()));
        self
    }

    pub fn note(&self) -> Option<&str> {
        match &self.flash {
            Some(Flash::Note(m)) => Some(m.as_str()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.flash {
            Some(Flash::Error(m)) => Some(m.as_str()),
            _ => None,
        }
    }
}
