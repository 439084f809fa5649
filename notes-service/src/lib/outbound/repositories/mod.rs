pub mod note;
pub mod user;

pub use note::SqliteNoteRepository;
pub use user::SqliteUserRepository;
