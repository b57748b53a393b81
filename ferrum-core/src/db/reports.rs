//! Read-only aggregation across workouts and their assignments.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::Result;

/// One completed workout with its aggregate totals. Workouts with no
/// assignments report NULL sums; normalizing to zero is the caller's
/// display concern.
#[derive(FromRow, Debug, Clone, Serialize)]
pub struct CompletedWorkoutReport {
    pub workout_id: i64,
    pub name: String,
    pub scheduled_date: Option<String>,
    pub created_at: NaiveDateTime,
    pub total_exercises: i64,
    pub total_reps: Option<i64>,
    pub total_weight: Option<f64>,
    pub total_duration: Option<i64>,
}

pub async fn completed_workouts_report(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<CompletedWorkoutReport>> {
    sqlx::query_as::<_, CompletedWorkoutReport>(
        "SELECT w.workout_id, w.name, w.scheduled_date, w.created_at,
                COUNT(we.exercise_id) AS total_exercises,
                SUM(we.sets * we.reps) AS total_reps,
                SUM(we.weight * we.sets) AS total_weight,
                SUM(we.duration) AS total_duration
         FROM workouts w
         LEFT JOIN workout_exercises we ON w.workout_id = we.workout_id
         WHERE w.user_id = ?1 AND w.status = 'completed'
         GROUP BY w.workout_id
         ORDER BY w.scheduled_date DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// One recorded assignment of the exercise, in schedule order. A user who
/// has the same exercise in several workouts gets one entry per
/// assignment, not a deduplicated series.
#[derive(FromRow, Debug, Clone, Serialize)]
pub struct ExerciseProgressEntry {
    pub scheduled_date: Option<String>,
    pub sets: i64,
    pub reps: i64,
    pub weight: Option<f64>,
    pub duration: Option<i64>,
}

pub async fn exercise_progress(
    pool: &SqlitePool,
    user_id: i64,
    exercise_id: i64,
) -> Result<Vec<ExerciseProgressEntry>> {
    sqlx::query_as::<_, ExerciseProgressEntry>(
        "SELECT w.scheduled_date, we.sets, we.reps, we.weight, we.duration
         FROM workout_exercises we
         JOIN workouts w ON we.workout_id = w.workout_id
         WHERE w.user_id = ?1 AND we.exercise_id = ?2
         ORDER BY w.scheduled_date ASC",
    )
    .bind(user_id)
    .bind(exercise_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}
