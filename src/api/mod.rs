pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod redirect;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
