//! Integration tests for day notes and the task list.

mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use common::journal;
use daybook_app::error::AppError;
use daybook_core::error::CoreError;
use daybook_core::ordering::Direction;
use sqlx::SqlitePool;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Day notes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn note_save_and_overwrite(pool: SqlitePool) {
    let journal = journal(pool);
    let today = day(2024, 3, 14);

    assert!(journal.day_note(today).await.unwrap().is_none());

    journal.save_day_note(today, "first").await.unwrap();
    let saved = journal.save_day_note(today, "second").await.unwrap().unwrap();

    assert_eq!(saved.day, today);
    assert_eq!(saved.text, "second");
    assert_eq!(journal.day_note(today).await.unwrap().unwrap().text, "second");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_note_removes_the_day(pool: SqlitePool) {
    let journal = journal(pool);
    let today = day(2024, 3, 14);
    journal.save_day_note(today, "something").await.unwrap();

    let cleared = journal.save_day_note(today, "  \n ").await.unwrap();

    assert!(cleared.is_none());
    assert!(journal.day_note(today).await.unwrap().is_none());
    assert!(journal.days_with_notes(2024, 3).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn month_listing_is_bounded(pool: SqlitePool) {
    let journal = journal(pool);
    for d in [day(2024, 2, 29), day(2024, 3, 1), day(2024, 3, 31), day(2024, 4, 1)] {
        journal.save_day_note(d, "note").await.unwrap();
    }

    let days = journal.days_with_notes(2024, 3).await.unwrap();

    assert_eq!(days, vec![day(2024, 3, 1), day(2024, 3, 31)]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn december_rolls_into_next_year(pool: SqlitePool) {
    let journal = journal(pool);
    journal.save_day_note(day(2023, 12, 31), "eve").await.unwrap();
    journal.save_day_note(day(2024, 1, 1), "new year").await.unwrap();

    assert_eq!(journal.days_with_notes(2023, 12).await.unwrap(), vec![day(2023, 12, 31)]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_month_is_rejected(pool: SqlitePool) {
    let journal = journal(pool);

    let err = journal.days_with_notes(2024, 13).await.unwrap_err();

    assert_matches!(err, AppError::Core(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn tasks_append_in_order(pool: SqlitePool) {
    let journal = journal(pool);

    let first = journal.add_task("Buy milk").await.unwrap();
    let second = journal.add_task("  Call mum ").await.unwrap();

    assert_eq!(first.task_order, 0);
    assert_eq!(second.task_order, 1);
    assert_eq!(second.text, "Call mum");
    assert!(!second.done);

    let texts: Vec<String> = journal.tasks().await.unwrap().into_iter().map(|t| t.text).collect();
    assert_eq!(texts, vec!["Buy milk", "Call mum"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_task_is_rejected(pool: SqlitePool) {
    let journal = journal(pool);

    let err = journal.add_task("   ").await.unwrap_err();

    assert_matches!(err, AppError::Core(CoreError::Validation(_)));
    assert!(journal.tasks().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_and_toggle_task(pool: SqlitePool) {
    let journal = journal(pool);
    let task = journal.add_task("Draft").await.unwrap();

    let edited = journal.edit_task(task.id, "Final").await.unwrap();
    assert_eq!(edited.text, "Final");

    assert!(journal.set_task_done(task.id, true).await.unwrap().done);
    assert!(!journal.set_task_done(task.id, false).await.unwrap().done);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_task_is_not_found(pool: SqlitePool) {
    let journal = journal(pool);

    let edit = journal.edit_task(42, "text").await.unwrap_err();
    let done = journal.set_task_done(42, true).await.unwrap_err();

    assert_matches!(edit, AppError::Core(CoreError::NotFound { .. }));
    assert_matches!(done, AppError::Core(CoreError::NotFound { .. }));
    assert!(!journal.delete_task(42).await.unwrap());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn move_task_swaps_with_neighbour(pool: SqlitePool) {
    let journal = journal(pool);
    let a = journal.add_task("a").await.unwrap();
    let b = journal.add_task("b").await.unwrap();

    assert!(!journal.move_task(a.id, Direction::Up).await.unwrap());
    assert!(!journal.move_task(b.id, Direction::Down).await.unwrap());
    assert!(!journal.move_task(99, Direction::Up).await.unwrap());

    assert!(journal.move_task(b.id, Direction::Up).await.unwrap());
    let ids: Vec<i64> = journal.tasks().await.unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);

    assert!(journal.move_task(b.id, Direction::Down).await.unwrap());
    let ids: Vec<i64> = journal.tasks().await.unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_task_removes_it(pool: SqlitePool) {
    let journal = journal(pool);
    let task = journal.add_task("gone soon").await.unwrap();

    assert!(journal.delete_task(task.id).await.unwrap());
    assert!(journal.tasks().await.unwrap().is_empty());
}
