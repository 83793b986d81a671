//! Domain logic for the daybook document tree, kept free of I/O.
//!
//! Everything here operates on plain strings and integers so the database
//! layer and the services can share one definition of path identity,
//! sibling ordering and naming.

pub mod error;
pub mod journal;
pub mod naming;
pub mod ordering;
pub mod paths;
pub mod search;
pub mod tree;
pub mod types;
