//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods take any SQLite executor rather than only the pool: a rename,
//! move or swap issues several statements that must commit together, so the
//! service opens the transaction and passes `&mut *tx` to each call. Single
//! statements outside a cascade just pass `&DbPool`.

pub mod day_note_repo;
pub mod path_entry_repo;
pub mod task_repo;

pub use day_note_repo::DayNoteRepo;
pub use path_entry_repo::PathEntryRepo;
pub use task_repo::TaskRepo;
