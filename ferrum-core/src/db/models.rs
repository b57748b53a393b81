use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::Error;

/// Account row owned by the identity provider. The core stores the
/// credential hash as opaque text and never produces or checks it, so it
/// stays out of serialized output.
#[derive(FromRow, Debug, Clone, Serialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

// Catalog models
#[derive(FromRow, Debug, Clone, Serialize)]
pub struct Exercise {
    pub exercise_id: i64,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub exercise_type: Option<String>,
    pub body_part: Option<String>,
    pub equipment: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewExercise {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub exercise_type: Option<String>,
    pub body_part: Option<String>,
    pub equipment: Option<String>,
    pub level: Option<String>,
}

/// Lifecycle tag on a workout. Transitions are caller-supplied; the only
/// guarantee is that no value outside this set ever reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum WorkoutStatus {
    Pending,
    Active,
    Completed,
}

impl WorkoutStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutStatus::Pending => "pending",
            WorkoutStatus::Active => "active",
            WorkoutStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkoutStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WorkoutStatus::Pending),
            "active" => Ok(WorkoutStatus::Active),
            "completed" => Ok(WorkoutStatus::Completed),
            other => Err(Error::Validation(format!(
                "status must be one of pending, active, completed (got '{other}')"
            ))),
        }
    }
}

// Workout models
#[derive(FromRow, Debug, Clone, Serialize)]
pub struct Workout {
    pub workout_id: i64,
    pub user_id: i64,
    pub name: String,
    pub status: WorkoutStatus,
    pub scheduled_date: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Merge patch for a workout: `None` keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutPatch {
    pub name: Option<String>,
    pub status: Option<WorkoutStatus>,
    pub scheduled_date: Option<String>,
}

// Assignment models
#[derive(FromRow, Debug, Clone, Serialize)]
pub struct WorkoutExercise {
    pub workout_exercise_id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight: Option<f64>,
    pub duration: Option<i64>,
}

/// Merge patch for an assignment. A stored `weight`/`duration` cannot be
/// reset to NULL through a patch; `None` always means "keep".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentPatch {
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration: Option<i64>,
}
