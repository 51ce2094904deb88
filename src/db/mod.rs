pub mod sqlite;
pub mod store;

pub use sqlite::{create_memory_pool, create_pool, run_migrations, SqliteStore};
pub use store::AgendaStore;

#[cfg(test)]
pub use store::MockAgendaStore;
