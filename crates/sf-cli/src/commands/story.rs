//! Line-based story REPL with saved progress.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use sf_story::{MemoryStore, StoryConfig, StorySession};

pub fn run(data_dir: &Path, memory: bool) -> Result<(), String> {
    let config = StoryConfig::default().with_data_dir(data_dir);
    let session = if memory {
        StorySession::with_store(config, Box::new(MemoryStore::new()))
    } else {
        StorySession::open(config)
    };
    let mut session = session.map_err(|e| format!("failed to open story: {e}"))?;

    println!("  {}\n", session.intro().cyan());
    println!("{}\n", session.render_scene());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e @ (sf_story::StoryError::Io(_) | sf_story::StoryError::Json(_))) => {
                return Err(e.to_string());
            }
            Err(e) => println!("{}\n", e.to_string().yellow()),
        }
    }

    Ok(())
}
