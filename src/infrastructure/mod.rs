// Infrastructure layer module
// Database adapters behind the domain repository ports

pub mod database;
pub mod repositories;
