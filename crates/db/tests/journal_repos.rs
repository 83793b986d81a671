//! Integration tests for the day note and task repositories.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use daybook_db::repositories::{DayNoteRepo, TaskRepo};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_day_note_upsert_replaces_text(pool: SqlitePool) {
    DayNoteRepo::upsert(&pool, day(2024, 3, 1), "first", Utc::now()).await.unwrap();
    DayNoteRepo::upsert(&pool, day(2024, 3, 1), "second", Utc::now()).await.unwrap();

    let note = DayNoteRepo::find(&pool, day(2024, 3, 1)).await.unwrap().unwrap();
    assert_eq!(note.text, "second");
    assert_eq!(note.day, day(2024, 3, 1));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_days_between_is_half_open(pool: SqlitePool) {
    for d in [day(2024, 2, 29), day(2024, 3, 1), day(2024, 3, 31), day(2024, 4, 1)] {
        DayNoteRepo::upsert(&pool, d, "x", Utc::now()).await.unwrap();
    }

    let days = DayNoteRepo::days_between(&pool, day(2024, 3, 1), day(2024, 4, 1))
        .await
        .unwrap();

    assert_eq!(days, vec![day(2024, 3, 1), day(2024, 3, 31)]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_day_note_delete(pool: SqlitePool) {
    DayNoteRepo::upsert(&pool, day(2024, 3, 1), "x", Utc::now()).await.unwrap();

    assert!(DayNoteRepo::delete(&pool, day(2024, 3, 1)).await.unwrap());
    assert!(!DayNoteRepo::delete(&pool, day(2024, 3, 1)).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_task_lifecycle(pool: SqlitePool) {
    let task = TaskRepo::create(&pool, "Buy milk", 0, Utc::now()).await.unwrap();
    assert!(!task.done);

    let done = TaskRepo::set_done(&pool, task.id, true).await.unwrap().unwrap();
    assert!(done.done);

    let edited = TaskRepo::update_text(&pool, task.id, "Buy oat milk").await.unwrap().unwrap();
    assert_eq!(edited.text, "Buy oat milk");

    assert!(TaskRepo::delete(&pool, task.id).await.unwrap());
    assert!(TaskRepo::find_by_id(&pool, task.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tasks_listed_by_order(pool: SqlitePool) {
    TaskRepo::create(&pool, "later", 5, Utc::now()).await.unwrap();
    TaskRepo::create(&pool, "sooner", 1, Utc::now()).await.unwrap();

    let tasks = TaskRepo::list(&pool).await.unwrap();
    let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();

    assert_eq!(texts, vec!["sooner", "later"]);
    assert_eq!(TaskRepo::max_order(&pool).await.unwrap(), Some(5));
}
