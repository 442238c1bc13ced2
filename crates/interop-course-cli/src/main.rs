//! interop-course CLI — work through the interoperability course from the
//! terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use interop_course_core::model::{ComponentId, ModuleId, PathwayKey, QuestionId, ScenarioId};

mod commands;
mod presentation;
mod session;

use session::Settings;

#[derive(Parser)]
#[command(
    name = "interop-course",
    version,
    about = "Health-data interoperability course: quizzes, clinical scenarios and achievements"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding saved progress (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show module progress, points and achievements
    Status {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Answer a quiz question
    Answer {
        /// Module (foundation, standards, interoperability, scenarios, master)
        #[arg(long)]
        module: ModuleId,

        /// Question number (1-3)
        #[arg(long)]
        question: QuestionId,

        /// Answer token
        #[arg(long)]
        choice: String,
    },

    /// Complete a module once all its questions are answered
    Complete {
        #[arg(long)]
        module: ModuleId,

        /// Master module only: evaluate this solution first, comma-separated
        #[arg(long, value_delimiter = ',')]
        components: Vec<ComponentId>,
    },

    /// Choose a pathway in a clinical scenario
    Pathway {
        /// Scenario (diabetic-ed, medication-reconciliation)
        #[arg(long)]
        scenario: ScenarioId,

        #[arg(long)]
        pathway: PathwayKey,
    },

    /// Record a clinical scenario as finished
    FinishScenario {
        #[arg(long)]
        scenario: ScenarioId,
    },

    /// Build and evaluate a solution for the master challenge
    Challenge {
        /// Components, comma-separated (e.g. "hl7-fhir,rxnorm")
        #[arg(long, value_delimiter = ',')]
        components: Vec<ComponentId>,

        /// Show the analysis without scoring the solution
        #[arg(long)]
        analyze_only: bool,
    },

    /// Show the achievement board
    Achievements,

    /// Validate a course content file
    Validate {
        /// Content TOML file (defaults to the configured or built-in course)
        #[arg(long)]
        content: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,

    /// Delete saved progress
    Reset,
}

fn main() {
    let filter =
        EnvFilter::try_from_env("INTEROP_COURSE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Status { format } => commands::status::execute(&settings, &format),
        Commands::Answer {
            module,
            question,
            choice,
        } => commands::answer::execute(&settings, module, question, &choice),
        Commands::Complete { module, components } => {
            commands::complete::execute(&settings, module, &components)
        }
        Commands::Pathway { scenario, pathway } => {
            commands::pathway::execute(&settings, scenario, pathway)
        }
        Commands::FinishScenario { scenario } => {
            commands::finish_scenario::execute(&settings, scenario)
        }
        Commands::Challenge {
            components,
            analyze_only,
        } => commands::challenge::execute(&settings, &components, analyze_only),
        Commands::Achievements => commands::achievements::execute(&settings),
        Commands::Validate { content } => commands::validate::execute(&settings, content),
        Commands::Init => commands::init::execute(),
        Commands::Reset => commands::reset::execute(&settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
