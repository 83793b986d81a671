//! Row models and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` structs matching the rows a query returns
//! - plain input structs for inserts

pub mod day_note;
pub mod path_entry;
pub mod search;
pub mod task;
