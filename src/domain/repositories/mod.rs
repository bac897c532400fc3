// Repository ports
// Implemented by the adapters in infrastructure::repositories

pub mod coursework_repository;
pub mod team_repository;
pub mod waitlist_repository;

pub use coursework_repository::CourseworkRepository;
pub use team_repository::TeamRepository;
pub use waitlist_repository::{WaitlistEntry, WaitlistRepository};
