//! Daybook: calendar notes, tasks and a hierarchical document tree on
//! SQLite.
//!
//! [`documents::DocumentsService`] owns the document tree: sibling ordering
//! ([`order::OrderAllocator`]), path rewrites ([`rewrite::PathRewriter`]),
//! page CRUD and search. [`journal::JournalService`] holds day notes and
//! tasks. Both are built from an explicit [`context::AppContext`].

pub mod cli;
pub mod config;
pub mod context;
pub mod documents;
pub mod error;
pub mod journal;
pub mod logging;
pub mod order;
pub mod pages;
pub mod prompt;
pub mod rewrite;
pub mod search;
