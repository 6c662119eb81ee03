//! CLI frontend for Story Forge: character chat and the Aurora story.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sf_story::config::DEFAULT_DATA_DIR;

#[derive(Parser)]
#[command(
    name = "sf",
    about = "Story Forge: chat with your characters and play a short sci-fi story",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create characters and worlds and chat with them
    Chat {
        /// RNG seed for reply selection
        #[arg(short, long, env = "STORY_FORGE_SEED")]
        seed: Option<u64>,

        /// Reply delay in milliseconds
        #[arg(long, default_value = "1000")]
        delay_ms: u64,
    },

    /// Play the branching story (progress and crew are saved)
    Story {
        /// Directory for saved progress and crew
        #[arg(short, long, env = "STORY_FORGE_DATA", default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// Keep everything in memory; nothing is saved
        #[arg(long)]
        memory: bool,
    },

    /// Print the story's scene graph
    Scenes {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Launch the terminal UI
    Tui {
        /// Start on a specific tab (chat, characters, worlds, home, crew, game, profile)
        #[arg(long, default_value = "home")]
        tab: String,

        /// RNG seed for chat replies
        #[arg(short, long, env = "STORY_FORGE_SEED")]
        seed: Option<u64>,

        /// Directory for saved progress and crew
        #[arg(short, long, env = "STORY_FORGE_DATA", default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chat { seed, delay_ms } => {
            init_logging();
            commands::chat::run(seed, delay_ms)
        }
        Commands::Story { data_dir, memory } => {
            init_logging();
            commands::story::run(&data_dir, memory)
        }
        Commands::Scenes { json } => commands::scenes::run(json),
        Commands::Tui {
            tab,
            seed,
            data_dir,
        } => sf_tui::launch(&tab, seed, &data_dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
