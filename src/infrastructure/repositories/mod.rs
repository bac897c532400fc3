// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod postgres_coursework_repository;
pub mod postgres_team_repository;
pub mod postgres_waitlist_repository;

pub use in_memory::InMemoryStore;
pub use postgres_coursework_repository::PostgresCourseworkRepository;
pub use postgres_team_repository::PostgresTeamRepository;
pub use postgres_waitlist_repository::PostgresWaitlistRepository;
