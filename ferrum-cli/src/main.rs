use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::env;

use ferrum::db;
use ferrum::db::models::{AssignmentPatch, NewExercise, WorkoutPatch, WorkoutStatus};
use ferrum::db::operations::{
    add_exercise, create_user, create_workout, delete_workout, get_all_exercises,
    insert_exercise, list_active_workouts, list_assignments, schedule_workout,
    update_assignment, update_workout,
};
use ferrum::db::reports::{completed_workouts_report, exercise_progress};

#[derive(Parser, Debug)]
#[command(version, about = "Ferrum - workout tracking backend CLI", long_about = None)]
struct Args {
    /// sqlite: URL of the tracking database (falls back to DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database file and apply pending migrations
    Init,
    /// Store a user record on behalf of the identity provider
    CreateUser {
        username: String,
        email: String,
        /// Pre-computed credential hash; this tool never hashes anything
        password_hash: String,
    },
    /// Insert a catalog exercise (primitive used by the external import)
    ImportExercise {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "type")]
        exercise_type: Option<String>,
        #[arg(long)]
        body_part: Option<String>,
        #[arg(long)]
        equipment: Option<String>,
        #[arg(long)]
        level: Option<String>,
    },
    /// List the exercise catalog
    ListExercises,
    /// Create a workout in pending status
    CreateWorkout {
        #[arg(long)]
        user: i64,
        name: String,
        scheduled_date: String,
    },
    /// List the user's active and pending workouts in schedule order
    ListWorkouts {
        #[arg(long)]
        user: i64,
    },
    /// Merge the given fields over a workout; omitted fields keep their value
    UpdateWorkout {
        #[arg(long)]
        user: i64,
        workout_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        status: Option<WorkoutStatus>,
        #[arg(long)]
        scheduled_date: Option<String>,
    },
    /// Change only a workout's scheduled date
    ScheduleWorkout {
        #[arg(long)]
        user: i64,
        workout_id: i64,
        scheduled_date: String,
    },
    /// Delete a workout and all of its exercise assignments
    DeleteWorkout {
        #[arg(long)]
        user: i64,
        workout_id: i64,
    },
    /// Attach a catalog exercise to a workout with performance targets
    AddExercise {
        #[arg(long)]
        user: i64,
        workout_id: i64,
        exercise_id: i64,
        sets: i64,
        reps: i64,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        duration: Option<i64>,
    },
    /// List a workout's exercise assignments
    ListAssignments {
        #[arg(long)]
        user: i64,
        workout_id: i64,
    },
    /// Merge the given fields over an assignment
    UpdateAssignment {
        #[arg(long)]
        user: i64,
        workout_exercise_id: i64,
        #[arg(long)]
        sets: Option<i64>,
        #[arg(long)]
        reps: Option<i64>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        duration: Option<i64>,
    },
    /// Completion report over the user's completed workouts
    ReportCompleted {
        #[arg(long)]
        user: i64,
    },
    /// Per-assignment progress series for one exercise
    ExerciseProgress {
        #[arg(long)]
        user: i64,
        exercise_id: i64,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:ferrum.db".to_string());

    let pool = db::connect(&database_url).await?;
    db::init_database(&pool).await?;

    match args.command {
        Commands::Init => {
            println!("database ready at {database_url}");
        }
        Commands::CreateUser {
            username,
            email,
            password_hash,
        } => {
            let user = create_user(&pool, &username, &email, &password_hash).await?;
            print_json(&user)?;
        }
        Commands::ImportExercise {
            title,
            description,
            exercise_type,
            body_part,
            equipment,
            level,
        } => {
            let exercise = insert_exercise(
                &pool,
                &NewExercise {
                    title,
                    description,
                    exercise_type,
                    body_part,
                    equipment,
                    level,
                },
            )
            .await?;
            print_json(&exercise)?;
        }
        Commands::ListExercises => {
            let exercises = get_all_exercises(&pool).await?;
            print_json(&exercises)?;
        }
        Commands::CreateWorkout {
            user,
            name,
            scheduled_date,
        } => {
            let workout = create_workout(&pool, user, &name, &scheduled_date).await?;
            print_json(&workout)?;
        }
        Commands::ListWorkouts { user } => {
            let workouts = list_active_workouts(&pool, user).await?;
            print_json(&workouts)?;
        }
        Commands::UpdateWorkout {
            user,
            workout_id,
            name,
            status,
            scheduled_date,
        } => {
            let patch = WorkoutPatch {
                name,
                status,
                scheduled_date,
            };
            let workout = update_workout(&pool, workout_id, user, &patch).await?;
            print_json(&workout)?;
        }
        Commands::ScheduleWorkout {
            user,
            workout_id,
            scheduled_date,
        } => {
            schedule_workout(&pool, workout_id, user, &scheduled_date).await?;
            println!("workout {workout_id} scheduled for {scheduled_date}");
        }
        Commands::DeleteWorkout { user, workout_id } => {
            delete_workout(&pool, workout_id, user).await?;
            println!("workout {workout_id} deleted");
        }
        Commands::AddExercise {
            user,
            workout_id,
            exercise_id,
            sets,
            reps,
            weight,
            duration,
        } => {
            let assignment =
                add_exercise(&pool, workout_id, user, exercise_id, sets, reps, weight, duration)
                    .await?;
            print_json(&assignment)?;
        }
        Commands::ListAssignments { user, workout_id } => {
            let assignments = list_assignments(&pool, workout_id, user).await?;
            print_json(&assignments)?;
        }
        Commands::UpdateAssignment {
            user,
            workout_exercise_id,
            sets,
            reps,
            weight,
            duration,
        } => {
            let patch = AssignmentPatch {
                sets,
                reps,
                weight,
                duration,
            };
            let assignment = update_assignment(&pool, workout_exercise_id, user, &patch).await?;
            print_json(&assignment)?;
        }
        Commands::ReportCompleted { user } => {
            let report = completed_workouts_report(&pool, user).await?;
            print_json(&report)?;
        }
        Commands::ExerciseProgress { user, exercise_id } => {
            let progress = exercise_progress(&pool, user, exercise_id).await?;
            print_json(&progress)?;
        }
    }

    pool.close().await;
    Ok(())
}
