pub mod auth;
pub mod note;

pub use auth::{Claims, UserId};
pub use note::{Note, NoteSummary, NoteUpdate, Page, SortOrder};
