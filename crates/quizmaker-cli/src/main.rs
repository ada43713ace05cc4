//! quizmaker CLI — author quizzes and test yourself from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quizmaker", version, about = "Author multiple-choice quizzes and test yourself")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the quiz collection (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List quizzes
    List {
        /// Case-insensitive text to look for in titles
        #[arg(long, default_value = "")]
        search: String,

        /// Only show this category ("all" for every category)
        #[arg(long, default_value = "all")]
        category: String,

        /// Print the matching quizzes as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the categories in use
    Categories,

    /// Create a quiz from a TOML draft file
    Create {
        /// Path to the draft file
        #[arg(long)]
        draft: PathBuf,
    },

    /// Delete a quiz
    Delete {
        /// Quiz id
        #[arg(long)]
        id: String,

        /// Don't ask for confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Take a quiz interactively
    Take {
        /// Quiz id
        #[arg(long)]
        id: String,
    },

    /// Create starter config and example draft
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match commands::load_settings(cli.config.as_deref(), cli.data_dir) {
        Ok(config) => match cli.command {
            Commands::List {
                search,
                category,
                json,
            } => commands::list::execute(&config, search, category, json),
            Commands::Categories => commands::categories::execute(&config),
            Commands::Create { draft } => commands::create::execute(&config, draft),
            Commands::Delete { id, yes } => commands::delete::execute(&config, id, yes),
            Commands::Take { id } => commands::take::execute(&config, id).await,
            Commands::Init => commands::init::execute(&config),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` plus a default `quizmaker_core=warn`, unless `RUST_LOG` already
/// sets a level for `quizmaker_core`.
fn env_filter() -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    let sets_core = std::env::var("RUST_LOG").is_ok_and(|value| value.contains("quizmaker_core"));
    if sets_core {
        return filter;
    }
    match "quizmaker_core=warn".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}
