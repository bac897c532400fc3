use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, teams};
use crate::api::middleware::DENIED_PATH;
use crate::api::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let team_routes = Router::new()
        .route("/list", get(teams::list))
        .route("/new", get(teams::new_team))
        .route("/create", post(teams::create))
        .route("/edit", get(teams::edit))
        .route("/update", post(teams::update))
        .route("/delete", post(teams::delete))
        .route("/delete_all", post(teams::delete_all))
        .route("/randomize_teams", post(teams::randomize_teams))
        .route("/copy_to_assignment", post(teams::copy_to_assignment))
        .route("/bequeath_all", post(teams::bequeath_all));

    Router::new()
        .route("/health", get(health::health_check))
        .route(DENIED_PATH, get(health::denied))
        .nest("/api/teams", team_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
