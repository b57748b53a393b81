use sqlx::SqlitePool;

use crate::db::models::{
    AssignmentPatch, Exercise, NewExercise, User, Workout, WorkoutExercise, WorkoutPatch,
};
use crate::error::{Error, Result, insert_error};

// Users
//
// The identity provider owns registration and credential checks; these
// operations only persist what it hands over.

pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User> {
    if username.trim().is_empty() {
        return Err(Error::validation("username is required"));
    }
    if email.trim().is_empty() {
        return Err(Error::validation("email is required"));
    }
    if password_hash.is_empty() {
        return Err(Error::validation("password_hash is required"));
    }

    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash)
         VALUES (?1, ?2, ?3)
         RETURNING *",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| insert_error(e, "email"))
}

pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
}

// Exercise catalog
//
// Read-only at request time; insert_exercise is the primitive the
// external import process drives.

pub async fn insert_exercise(pool: &SqlitePool, exercise: &NewExercise) -> Result<Exercise> {
    if exercise.title.trim().is_empty() {
        return Err(Error::validation("title is required"));
    }

    sqlx::query_as::<_, Exercise>(
        "INSERT INTO exercises (title, description, type, body_part, equipment, level)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         RETURNING *",
    )
    .bind(&exercise.title)
    .bind(&exercise.description)
    .bind(&exercise.exercise_type)
    .bind(&exercise.body_part)
    .bind(&exercise.equipment)
    .bind(&exercise.level)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<Option<Exercise>> {
    sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE exercise_id = ?1")
        .bind(exercise_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
}

pub async fn get_all_exercises(pool: &SqlitePool) -> Result<Vec<Exercise>> {
    sqlx::query_as::<_, Exercise>("SELECT * FROM exercises ORDER BY exercise_id ASC")
        .fetch_all(pool)
        .await
        .map_err(Into::into)
}

// Workouts
//
// Every mutation is scoped to (workout_id, user_id); a row that exists
// under another user reports not-found.

pub async fn create_workout(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    scheduled_date: &str,
) -> Result<Workout> {
    if name.trim().is_empty() {
        return Err(Error::validation("name is required"));
    }
    if scheduled_date.trim().is_empty() {
        return Err(Error::validation("scheduled_date is required"));
    }

    sqlx::query_as::<_, Workout>(
        "INSERT INTO workouts (user_id, name, status, scheduled_date)
         VALUES (?1, ?2, 'pending', ?3)
         RETURNING *",
    )
    .bind(user_id)
    .bind(name)
    .bind(scheduled_date)
    .fetch_one(pool)
    .await
    .map_err(|e| insert_error(e, "user_id"))
}

pub async fn get_workout(pool: &SqlitePool, workout_id: i64, user_id: i64) -> Result<Workout> {
    sqlx::query_as::<_, Workout>("SELECT * FROM workouts WHERE workout_id = ?1 AND user_id = ?2")
        .bind(workout_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(Error::NotFound("workout"))
}

pub async fn list_active_workouts(pool: &SqlitePool, user_id: i64) -> Result<Vec<Workout>> {
    sqlx::query_as::<_, Workout>(
        "SELECT * FROM workouts
         WHERE user_id = ?1 AND status IN ('active', 'pending')
         ORDER BY scheduled_date ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// Merge `patch` over the stored row. Omitted (or blank, for text) patch
/// fields keep the stored value. The read and the write run in one
/// transaction so concurrent updates cannot resurrect stale fields.
pub async fn update_workout(
    pool: &SqlitePool,
    workout_id: i64,
    user_id: i64,
    patch: &WorkoutPatch,
) -> Result<Workout> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, Workout>(
        "SELECT * FROM workouts WHERE workout_id = ?1 AND user_id = ?2",
    )
    .bind(workout_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(Error::NotFound("workout"))?;

    let name = patch
        .name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(&existing.name);
    let status = patch.status.unwrap_or(existing.status);
    let scheduled_date = patch
        .scheduled_date
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or(existing.scheduled_date.as_deref());

    let updated = sqlx::query_as::<_, Workout>(
        "UPDATE workouts
         SET name = ?1, status = ?2, scheduled_date = ?3, updated_at = CURRENT_TIMESTAMP
         WHERE workout_id = ?4 AND user_id = ?5
         RETURNING *",
    )
    .bind(name)
    .bind(status)
    .bind(scheduled_date)
    .bind(workout_id)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}

pub async fn schedule_workout(
    pool: &SqlitePool,
    workout_id: i64,
    user_id: i64,
    scheduled_date: &str,
) -> Result<()> {
    if scheduled_date.trim().is_empty() {
        return Err(Error::validation("scheduled_date is required"));
    }

    let result = sqlx::query(
        "UPDATE workouts
         SET scheduled_date = ?1, updated_at = CURRENT_TIMESTAMP
         WHERE workout_id = ?2 AND user_id = ?3",
    )
    .bind(scheduled_date)
    .bind(workout_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("workout"));
    }
    Ok(())
}

/// Delete a workout and, via cascade, all of its assignments.
pub async fn delete_workout(pool: &SqlitePool, workout_id: i64, user_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM workouts WHERE workout_id = ?1 AND user_id = ?2")
        .bind(workout_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("workout"));
    }
    Ok(())
}

// Workout exercises

pub async fn add_exercise(
    pool: &SqlitePool,
    workout_id: i64,
    user_id: i64,
    exercise_id: i64,
    sets: i64,
    reps: i64,
    weight: Option<f64>,
    duration: Option<i64>,
) -> Result<WorkoutExercise> {
    if sets <= 0 {
        return Err(Error::validation("sets must be a positive integer"));
    }
    if reps <= 0 {
        return Err(Error::validation("reps must be a positive integer"));
    }

    // Ownership first: a workout under another user must look identical
    // to one that does not exist.
    get_workout(pool, workout_id, user_id).await?;

    sqlx::query_as::<_, WorkoutExercise>(
        "INSERT INTO workout_exercises (workout_id, exercise_id, sets, reps, weight, duration)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         RETURNING *",
    )
    .bind(workout_id)
    .bind(exercise_id)
    .bind(sets)
    .bind(reps)
    .bind(weight)
    .bind(duration)
    .fetch_one(pool)
    .await
    .map_err(|e| insert_error(e, "exercise_id"))
}

pub async fn list_assignments(
    pool: &SqlitePool,
    workout_id: i64,
    user_id: i64,
) -> Result<Vec<WorkoutExercise>> {
    get_workout(pool, workout_id, user_id).await?;

    sqlx::query_as::<_, WorkoutExercise>(
        "SELECT * FROM workout_exercises
         WHERE workout_id = ?1
         ORDER BY workout_exercise_id ASC",
    )
    .bind(workout_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// Merge-update an assignment, scoped through its parent workout's owner.
pub async fn update_assignment(
    pool: &SqlitePool,
    workout_exercise_id: i64,
    user_id: i64,
    patch: &AssignmentPatch,
) -> Result<WorkoutExercise> {
    if patch.sets.is_some_and(|s| s <= 0) {
        return Err(Error::validation("sets must be a positive integer"));
    }
    if patch.reps.is_some_and(|r| r <= 0) {
        return Err(Error::validation("reps must be a positive integer"));
    }

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, WorkoutExercise>(
        "SELECT we.* FROM workout_exercises we
         JOIN workouts w ON w.workout_id = we.workout_id
         WHERE we.workout_exercise_id = ?1 AND w.user_id = ?2",
    )
    .bind(workout_exercise_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(Error::NotFound("workout exercise"))?;

    let sets = patch.sets.unwrap_or(existing.sets);
    let reps = patch.reps.unwrap_or(existing.reps);
    let weight = patch.weight.or(existing.weight);
    let duration = patch.duration.or(existing.duration);

    let updated = sqlx::query_as::<_, WorkoutExercise>(
        "UPDATE workout_exercises
         SET sets = ?1, reps = ?2, weight = ?3, duration = ?4
         WHERE workout_exercise_id = ?5
         RETURNING *",
    )
    .bind(sets)
    .bind(reps)
    .bind(weight)
    .bind(duration)
    .bind(workout_exercise_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}
