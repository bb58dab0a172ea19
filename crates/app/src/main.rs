use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use formcheck_core::exercises::Counting;
use formcheck_core::{run_session, EngineConfig, ExerciseType, RecordedSession};
use tracing_subscriber::EnvFilter;

fn main() -> formcheck_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            exercise,
            config,
            output,
        } => run_analyze(&input, &exercise, config.as_deref(), output.as_deref()),
        Commands::Exercises => {
            list_exercises();
            Ok(())
        }
    }
}

fn run_analyze(
    input: &Path,
    exercise: &str,
    config: Option<&Path>,
    output: Option<&Path>,
) -> formcheck_core::Result<()> {
    let exercise: ExerciseType = exercise.parse()?;
    let config = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    tracing::info!(?input, %exercise, "analysing recorded session");

    let session = RecordedSession::load(input)?;
    let report = run_session(&session, exercise, config)?;
    tracing::info!(
        reps = report.rep_count,
        mean_score = report.mean_score,
        "session analysed"
    );

    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(?path, "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn list_exercises() {
    for exercise in ExerciseType::ALL {
        let counting = match exercise.profile().map(|profile| profile.counting) {
            Some(Counting::Reps { .. }) => "reps",
            Some(Counting::Hold { .. }) => "hold (seconds)",
            Some(Counting::Twist { .. }) => "side-to-side reps",
            None => "-",
        };
        println!("{:<22} {:<20} {counting}", exercise.id(), exercise.name());
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Exercise form analysis from pose landmarks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded landmark session and report reps and form.
    Analyze {
        /// JSON file with `recordingStart` and timestamped landmark frames.
        input: PathBuf,
        /// Exercise name or id, or `auto` to detect it.
        #[arg(short, long, default_value = "auto")]
        exercise: String,
        /// Optional engine config file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the report here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List supported exercises.
    Exercises,
}
