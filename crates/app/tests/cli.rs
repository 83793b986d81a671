//! Command dispatch tests: parsed command lines run against a migrated
//! database with a scripted prompter.

mod common;

use std::cell::RefCell;

use assert_matches::assert_matches;
use clap::Parser;
use common::context;
use daybook_app::cli::{execute, Cli};
use daybook_app::context::AppContext;
use daybook_app::error::{AppError, AppResult};
use daybook_app::prompt::Prompter;
use daybook_core::error::CoreError;
use serde_json::Value;
use sqlx::SqlitePool;

/// Answers every confirmation with a fixed reply and records what was asked.
struct ScriptedPrompter {
    answer: bool,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer
    }

    fn warn(&self, _message: &str) {}
}

async fn run(ctx: &AppContext, prompter: &ScriptedPrompter, args: &[&str]) -> AppResult<Value> {
    let cli = Cli::try_parse_from(std::iter::once("daybook").chain(args.iter().copied())).unwrap();
    execute(ctx, cli.command, prompter).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_returns_path_and_tree(pool: SqlitePool) {
    let ctx = context(pool);
    let prompter = ScriptedPrompter::new(true);

    run(&ctx, &prompter, &["docs", "create", "Projects"]).await.unwrap();
    let out = run(&ctx, &prompter, &["docs", "create", "--parent", "Projects", "Garden"])
        .await
        .unwrap();

    assert_eq!(out["path"], "Projects/Garden");
    assert_eq!(out["tree"][0]["name"], "Projects");
    assert_eq!(out["tree"][0]["children"][0]["path"], "Projects/Garden");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn declined_delete_keeps_the_document(pool: SqlitePool) {
    let ctx = context(pool);
    let prompter = ScriptedPrompter::new(false);
    run(&ctx, &prompter, &["docs", "create", "Keep"]).await.unwrap();

    let out = run(&ctx, &prompter, &["docs", "delete", "Keep"]).await.unwrap();

    assert_eq!(out["deleted"], 0);
    assert_eq!(prompter.asked.borrow().len(), 1);
    let list = run(&ctx, &prompter, &["docs", "list"]).await.unwrap();
    assert_eq!(list, serde_json::json!(["Keep"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn confirmed_delete_removes_the_subtree(pool: SqlitePool) {
    let ctx = context(pool);
    let prompter = ScriptedPrompter::new(true);
    run(&ctx, &prompter, &["docs", "create", "A"]).await.unwrap();
    run(&ctx, &prompter, &["docs", "create", "--parent", "A", "B"]).await.unwrap();

    let out = run(&ctx, &prompter, &["docs", "delete", "A"]).await.unwrap();

    assert_eq!(out["deleted"], 2);
    assert_eq!(out["tree"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn move_reports_outcome(pool: SqlitePool) {
    let ctx = context(pool);
    let prompter = ScriptedPrompter::new(true);
    run(&ctx, &prompter, &["docs", "create", "A"]).await.unwrap();
    run(&ctx, &prompter, &["docs", "create", "B"]).await.unwrap();
    run(&ctx, &prompter, &["docs", "create", "--parent", "B", "C"]).await.unwrap();

    let swapped = run(&ctx, &prompter, &["docs", "move", "A", "B"]).await.unwrap();
    assert_eq!(swapped["result"]["outcome"], "swapped");

    let moved = run(&ctx, &prompter, &["docs", "move", "A", "B/C"]).await.unwrap();
    assert_eq!(moved["result"]["outcome"], "moved");
    assert_eq!(moved["result"]["path"], "B/C/A");

    let illegal = run(&ctx, &prompter, &["docs", "move", "B", "B/C"]).await.unwrap_err();
    assert_matches!(illegal, AppError::Core(CoreError::IllegalMove { .. }));
    assert!(illegal.is_rejection());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn page_and_search_commands(pool: SqlitePool) {
    let ctx = context(pool);
    let prompter = ScriptedPrompter::new(true);
    run(&ctx, &prompter, &["docs", "create", "Notes"]).await.unwrap();
    run(&ctx, &prompter, &["pages", "add", "Notes"]).await.unwrap();
    run(&ctx, &prompter, &["pages", "write", "Notes", "Page 2", "Remember the milk"])
        .await
        .unwrap();

    let hits = run(&ctx, &prompter, &["search", "milk", "REMEMBER"]).await.unwrap();
    assert_eq!(hits[0]["location"], "Notes");
    assert_eq!(hits[0]["name"], "Page 2");
    assert_eq!(hits[0]["preview"], "Remember the milk");

    let up = run(&ctx, &prompter, &["pages", "up", "Notes", "Page 2"]).await.unwrap();
    assert_eq!(up["moved"], true);
    assert_eq!(up["pages"][0]["name"], "Page 2");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn note_and_task_commands(pool: SqlitePool) {
    let ctx = context(pool);
    let prompter = ScriptedPrompter::new(true);

    let note = run(&ctx, &prompter, &["note", "write", "2024-03-14", "Pi day"]).await.unwrap();
    assert_eq!(note["text"], "Pi day");
    let month = run(&ctx, &prompter, &["note", "month", "2024", "3"]).await.unwrap();
    assert_eq!(month, serde_json::json!(["2024-03-14"]));

    let bad_day = run(&ctx, &prompter, &["note", "show", "14/03/2024"]).await.unwrap_err();
    assert_matches!(bad_day, AppError::Core(CoreError::Validation(_)));

    let task = run(&ctx, &prompter, &["tasks", "add", "Water plants"]).await.unwrap();
    let id = task["id"].as_i64().unwrap().to_string();
    let done = run(&ctx, &prompter, &["tasks", "done", &id]).await.unwrap();
    assert_eq!(done["done"], true);
}
