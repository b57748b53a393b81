mod common;

use common::{seed_exercise, seed_user, test_pool};
use ferrum::db::models::{WorkoutPatch, WorkoutStatus};
use ferrum::db::operations::{add_exercise, create_workout, update_workout};
use ferrum::db::reports::{completed_workouts_report, exercise_progress};
use sqlx::SqlitePool;

async fn complete(pool: &SqlitePool, workout_id: i64, user_id: i64) {
    update_workout(
        pool,
        workout_id,
        user_id,
        &WorkoutPatch {
            status: Some(WorkoutStatus::Completed),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to complete workout");
}

#[tokio::test]
async fn test_completed_report_aggregates_per_workout() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "mara").await;
    let squat = seed_exercise(&pool, "Back Squat").await;
    let press = seed_exercise(&pool, "Leg Press").await;
    let workout = create_workout(&pool, user, "Leg Day", "2026-01-10").await.unwrap();

    add_exercise(&pool, workout.workout_id, user, squat, 3, 10, Some(100.0), None)
        .await
        .unwrap();
    add_exercise(&pool, workout.workout_id, user, press, 2, 8, None, Some(600))
        .await
        .unwrap();
    complete(&pool, workout.workout_id, user).await;

    let report = completed_workouts_report(&pool, user).await.unwrap();
    assert_eq!(report.len(), 1);
    let row = &report[0];
    assert_eq!(row.workout_id, workout.workout_id);
    assert_eq!(row.name, "Leg Day");
    assert_eq!(row.total_exercises, 2);
    assert_eq!(row.total_reps, Some(3 * 10 + 2 * 8));
    assert_eq!(row.total_weight, Some(300.0));
    assert_eq!(row.total_duration, Some(600));
}

#[tokio::test]
async fn test_completed_report_excludes_other_statuses_and_other_users() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "mara").await;
    let other = seed_user(&pool, "noah").await;

    let pending = create_workout(&pool, user, "Pending", "2026-01-01").await.unwrap();
    let active = create_workout(&pool, user, "Active", "2026-01-02").await.unwrap();
    update_workout(
        &pool,
        active.workout_id,
        user,
        &WorkoutPatch {
            status: Some(WorkoutStatus::Active),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let foreign = create_workout(&pool, other, "Foreign", "2026-01-03").await.unwrap();
    complete(&pool, foreign.workout_id, other).await;

    let report = completed_workouts_report(&pool, user).await.unwrap();
    assert!(report.is_empty());
    assert!(!report.iter().any(|r| r.workout_id == pending.workout_id));
}

#[tokio::test]
async fn test_completed_report_keeps_workouts_without_assignments() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "mara").await;
    let workout = create_workout(&pool, user, "Rest Day Audit", "2026-01-05").await.unwrap();
    complete(&pool, workout.workout_id, user).await;

    let report = completed_workouts_report(&pool, user).await.unwrap();
    assert_eq!(report.len(), 1);
    let row = &report[0];
    assert_eq!(row.total_exercises, 0);
    assert_eq!(row.total_reps, None);
    assert_eq!(row.total_weight, None);
    assert_eq!(row.total_duration, None);
}

#[tokio::test]
async fn test_completed_report_is_ordered_by_schedule_descending() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "mara").await;

    for (name, date) in [
        ("First", "2026-01-01"),
        ("Third", "2026-03-01"),
        ("Second", "2026-02-01"),
    ] {
        let w = create_workout(&pool, user, name, date).await.unwrap();
        complete(&pool, w.workout_id, user).await;
    }

    let report = completed_workouts_report(&pool, user).await.unwrap();
    let names: Vec<&str> = report.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_exercise_progress_is_ordered_and_not_deduplicated() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "mara").await;
    let squat = seed_exercise(&pool, "Back Squat").await;

    let week2 = create_workout(&pool, user, "Week 2", "2026-02-08").await.unwrap();
    let week1 = create_workout(&pool, user, "Week 1", "2026-02-01").await.unwrap();
    add_exercise(&pool, week2.workout_id, user, squat, 5, 5, Some(110.0), None)
        .await
        .unwrap();
    add_exercise(&pool, week1.workout_id, user, squat, 5, 5, Some(105.0), None)
        .await
        .unwrap();
    // Same exercise twice within one workout stays two entries.
    add_exercise(&pool, week1.workout_id, user, squat, 1, 20, Some(60.0), None)
        .await
        .unwrap();

    let progress = exercise_progress(&pool, user, squat).await.unwrap();
    assert_eq!(progress.len(), 3);
    for pair in progress.windows(2) {
        assert!(pair[0].scheduled_date <= pair[1].scheduled_date);
    }
    assert_eq!(progress.last().unwrap().weight, Some(110.0));
}

#[tokio::test]
async fn test_exercise_progress_is_scoped_to_the_requesting_user() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "mara").await;
    let other = seed_user(&pool, "noah").await;
    let squat = seed_exercise(&pool, "Back Squat").await;

    let theirs = create_workout(&pool, other, "Their Day", "2026-02-01").await.unwrap();
    add_exercise(&pool, theirs.workout_id, other, squat, 3, 10, Some(80.0), None)
        .await
        .unwrap();

    let progress = exercise_progress(&pool, user, squat).await.unwrap();
    assert!(progress.is_empty());
}

#[tokio::test]
async fn test_leg_day_end_to_end() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "mara").await;
    let squat = seed_exercise(&pool, "Back Squat").await;

    let workout = create_workout(&pool, user, "Leg Day", "2024-01-10").await.unwrap();
    add_exercise(&pool, workout.workout_id, user, squat, 3, 12, Some(50.0), None)
        .await
        .unwrap();
    complete(&pool, workout.workout_id, user).await;

    let report = completed_workouts_report(&pool, user).await.unwrap();
    assert_eq!(report.len(), 1);
    let row = &report[0];
    assert_eq!(row.name, "Leg Day");
    assert_eq!(row.scheduled_date.as_deref(), Some("2024-01-10"));
    assert_eq!(row.total_exercises, 1);
    assert_eq!(row.total_reps, Some(36));
    assert_eq!(row.total_weight, Some(150.0));
    assert_eq!(row.total_duration.unwrap_or(0), 0);
}
