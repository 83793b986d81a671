//! Command-line front end.
//!
//! Each command calls one service operation and answers with JSON built from
//! a fresh read, the way a UI re-fetches canonical state after a mutation.

use clap::{Parser, Subcommand};
use daybook_core::journal::parse_day;
use daybook_core::ordering::Direction;
use daybook_core::types::DbId;
use serde::Serialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::AppResult;
use crate::prompt::Prompter;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "daybook", version, about = "Calendar notes, tasks and a document tree")]
pub struct Cli {
    /// Database URL, e.g. `sqlite://daybook.db`.
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Answer yes to every confirmation prompt.
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Documents in the tree.
    #[command(subcommand)]
    Docs(DocsCommand),
    /// Pages inside a document.
    #[command(subcommand)]
    Pages(PagesCommand),
    /// Pages containing every term (case-insensitive).
    Search {
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Notes attached to calendar days.
    #[command(subcommand)]
    Note(NoteCommand),
    /// The task list.
    #[command(subcommand)]
    Tasks(TasksCommand),
}

#[derive(Debug, Subcommand)]
pub enum DocsCommand {
    List,
    Tree,
    Create {
        #[arg(long)]
        parent: Option<String>,
        name: Option<String>,
    },
    Rename {
        path: String,
        name: String,
    },
    Delete {
        path: String,
    },
    /// Drop SRC onto DST; omit DST to move to the root.
    Move {
        src: String,
        dst: Option<String>,
    },
    Swap {
        first: String,
        second: String,
    },
    Up {
        path: String,
    },
    Down {
        path: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PagesCommand {
    List {
        doc: String,
    },
    Show {
        doc: String,
        page: String,
    },
    Add {
        doc: String,
        name: Option<String>,
    },
    Write {
        doc: String,
        page: String,
        text: String,
    },
    Rename {
        doc: String,
        old: String,
        new: String,
    },
    Delete {
        doc: String,
        page: String,
    },
    Swap {
        doc: String,
        first: String,
        second: String,
    },
    Up {
        doc: String,
        page: String,
    },
    Down {
        doc: String,
        page: String,
    },
    Indent {
        doc: String,
        page: String,
    },
    Outdent {
        doc: String,
        page: String,
    },
    /// Move PAGE from document SRC to the end of document DST.
    Move {
        src: String,
        page: String,
        dst: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    Show {
        day: String,
    },
    /// Save the note; empty text removes it.
    Write {
        day: String,
        text: String,
    },
    /// Days of a month that have notes.
    Month {
        year: i32,
        month: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    List,
    Add { text: String },
    Edit { id: DbId, text: String },
    Done { id: DbId },
    Undo { id: DbId },
    Delete { id: DbId },
    Up { id: DbId },
    Down { id: DbId },
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

fn output<T: Serialize>(value: T) -> AppResult<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Run one command against the context.
pub async fn execute(ctx: &AppContext, command: Command, prompter: &dyn Prompter) -> AppResult<Value> {
    match command {
        Command::Docs(cmd) => execute_docs(ctx, cmd, prompter).await,
        Command::Pages(cmd) => execute_pages(ctx, cmd, prompter).await,
        Command::Search { terms } => output(ctx.documents().search(&terms.join(" ")).await?),
        Command::Note(cmd) => execute_note(ctx, cmd).await,
        Command::Tasks(cmd) => execute_tasks(ctx, cmd).await,
    }
}

async fn execute_docs(ctx: &AppContext, cmd: DocsCommand, prompter: &dyn Prompter) -> AppResult<Value> {
    let docs = ctx.documents();
    match cmd {
        DocsCommand::List => output(docs.document_paths().await?),
        DocsCommand::Tree => output(docs.document_tree().await?),
        DocsCommand::Create { parent, name } => {
            let path = docs
                .create_document(parent.as_deref(), name.as_deref())
                .await?;
            Ok(json!({ "path": path, "tree": docs.document_tree().await? }))
        }
        DocsCommand::Rename { path, name } => {
            let new_path = docs.rename_document(&path, &name).await?;
            Ok(json!({ "path": new_path, "tree": docs.document_tree().await? }))
        }
        DocsCommand::Delete { path } => {
            if !prompter.confirm(&format!("Delete '{path}' and everything beneath it?")) {
                return Ok(json!({ "deleted": 0 }));
            }
            let removed = docs.delete_document(&path).await?;
            Ok(json!({ "deleted": removed, "tree": docs.document_tree().await? }))
        }
        DocsCommand::Move { src, dst } => {
            let outcome = docs.move_document(&src, dst.as_deref()).await?;
            Ok(json!({ "result": outcome, "tree": docs.document_tree().await? }))
        }
        DocsCommand::Swap { first, second } => {
            let swapped = docs.swap_documents(&first, &second).await?;
            Ok(json!({ "swapped": swapped, "tree": docs.document_tree().await? }))
        }
        DocsCommand::Up { path } => {
            let moved = docs.move_document_up(&path).await?;
            Ok(json!({ "moved": moved, "tree": docs.document_tree().await? }))
        }
        DocsCommand::Down { path } => {
            let moved = docs.move_document_down(&path).await?;
            Ok(json!({ "moved": moved, "tree": docs.document_tree().await? }))
        }
    }
}

async fn execute_pages(ctx: &AppContext, cmd: PagesCommand, prompter: &dyn Prompter) -> AppResult<Value> {
    let docs = ctx.documents();
    match cmd {
        PagesCommand::List { doc } => output(docs.list_pages(&doc).await?),
        PagesCommand::Show { doc, page } => output(docs.get_page(&doc, &page).await?),
        PagesCommand::Add { doc, name } => output(docs.create_page(&doc, name.as_deref()).await?),
        PagesCommand::Write { doc, page, text } => output(docs.save_page(&doc, &page, &text).await?),
        PagesCommand::Rename { doc, old, new } => {
            let name = docs.rename_page(&doc, &old, &new).await?;
            Ok(json!({ "name": name, "pages": docs.list_pages(&doc).await? }))
        }
        PagesCommand::Delete { doc, page } => {
            if !prompter.confirm(&format!("Delete page '{page}' of '{doc}'?")) {
                return Ok(json!({ "deleted": false }));
            }
            let deleted = docs.delete_page(&doc, &page).await?;
            Ok(json!({ "deleted": deleted, "pages": docs.list_pages(&doc).await? }))
        }
        PagesCommand::Swap { doc, first, second } => {
            let swapped = docs.swap_pages(&doc, &first, &second).await?;
            Ok(json!({ "swapped": swapped, "pages": docs.list_pages(&doc).await? }))
        }
        PagesCommand::Up { doc, page } => {
            let moved = docs.move_page_up(&doc, &page).await?;
            Ok(json!({ "moved": moved, "pages": docs.list_pages(&doc).await? }))
        }
        PagesCommand::Down { doc, page } => {
            let moved = docs.move_page_down(&doc, &page).await?;
            Ok(json!({ "moved": moved, "pages": docs.list_pages(&doc).await? }))
        }
        PagesCommand::Indent { doc, page } => {
            let level = docs.indent_page(&doc, &page).await?;
            Ok(json!({ "indent_level": level }))
        }
        PagesCommand::Outdent { doc, page } => {
            let level = docs.outdent_page(&doc, &page).await?;
            Ok(json!({ "indent_level": level }))
        }
        PagesCommand::Move { src, page, dst } => {
            let name = docs.move_page_to_document(&src, &page, &dst).await?;
            Ok(json!({ "name": name, "pages": docs.list_pages(&dst).await? }))
        }
    }
}

async fn execute_note(ctx: &AppContext, cmd: NoteCommand) -> AppResult<Value> {
    let journal = ctx.journal();
    match cmd {
        NoteCommand::Show { day } => output(journal.day_note(parse_day(&day)?).await?),
        NoteCommand::Write { day, text } => {
            output(journal.save_day_note(parse_day(&day)?, &text).await?)
        }
        NoteCommand::Month { year, month } => output(journal.days_with_notes(year, month).await?),
    }
}

async fn execute_tasks(ctx: &AppContext, cmd: TasksCommand) -> AppResult<Value> {
    let journal = ctx.journal();
    match cmd {
        TasksCommand::List => output(journal.tasks().await?),
        TasksCommand::Add { text } => output(journal.add_task(&text).await?),
        TasksCommand::Edit { id, text } => output(journal.edit_task(id, &text).await?),
        TasksCommand::Done { id } => output(journal.set_task_done(id, true).await?),
        TasksCommand::Undo { id } => output(journal.set_task_done(id, false).await?),
        TasksCommand::Delete { id } => Ok(json!({ "deleted": journal.delete_task(id).await? })),
        TasksCommand::Up { id } => {
            let moved = journal.move_task(id, Direction::Up).await?;
            Ok(json!({ "moved": moved, "tasks": journal.tasks().await? }))
        }
        TasksCommand::Down { id } => {
            let moved = journal.move_task(id, Direction::Down).await?;
            Ok(json!({ "moved": moved, "tasks": journal.tasks().await? }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_nested_commands() {
        let cli = Cli::try_parse_from(["daybook", "--yes", "docs", "move", "A/B"]).unwrap();
        assert!(cli.yes);
        assert_matches!(
            cli.command,
            Command::Docs(DocsCommand::Move { ref src, dst: None }) if src == "A/B"
        );
    }

    #[test]
    fn search_requires_terms() {
        assert!(Cli::try_parse_from(["daybook", "search"]).is_err());
        let cli = Cli::try_parse_from(["daybook", "search", "alpha", "beta"]).unwrap();
        assert_matches!(cli.command, Command::Search { ref terms } if terms.len() == 2);
    }

    #[test]
    fn task_ids_must_be_numeric() {
        assert!(Cli::try_parse_from(["daybook", "tasks", "done", "abc"]).is_err());
    }
}
