mod app;
mod database;
mod seeding;

pub use app::AppConfig;
pub use database::{run_migrations, DatabaseConfig};
pub use seeding::{parse_exercise_rows, ExerciseLibrarySeeder};
