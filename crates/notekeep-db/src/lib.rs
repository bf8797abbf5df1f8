pub mod errors;
pub mod pool;
pub mod repos;

// Re-export commonly used items
pub use errors::StoreError;
pub use pool::{create_pool, run_migrations};
pub use repos::note::{NoteRepo, NoteRow};
pub use repos::user::{UserRepo, UserRow};
