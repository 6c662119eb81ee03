//! Standalone TUI binary for Story Forge.

use std::path::PathBuf;
use std::process;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "sf-tui",
    about = "Terminal UI for Story Forge character chat and story",
    version
)]
struct Args {
    /// Start on a specific tab (chat, characters, worlds, home, crew, game, profile)
    #[arg(long, default_value = "home")]
    tab: String,

    /// RNG seed for chat replies
    #[arg(long, env = "STORY_FORGE_SEED")]
    seed: Option<u64>,

    /// Directory for saved story progress and crew
    #[arg(long, env = "STORY_FORGE_DATA", default_value = sf_story::config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = sf_tui::launch(&args.tab, args.seed, &args.data_dir) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
