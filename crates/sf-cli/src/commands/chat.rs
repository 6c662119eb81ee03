//! Line-based chat REPL.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use colored::Colorize;

use sf_chat::{ChatConfig, ChatSession};

pub fn run(seed: Option<u64>, delay_ms: u64) -> Result<(), String> {
    let mut config = ChatConfig::default().with_reply_delay(Duration::from_millis(delay_ms));
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut session = ChatSession::new(config);

    println!("  {}\n", session.intro().cyan());

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

        match session.process(input, Instant::now()) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => println!("{}", e.to_string().yellow()),
        }

        wait_for_replies(&mut session);
        println!();
    }

    wait_for_replies(&mut session);
    Ok(())
}

/// Sleep until every scheduled reply is due, printing each as it arrives.
fn wait_for_replies(session: &mut ChatSession) {
    while let Some(due) = session.next_due() {
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
        for reply in session.poll(Instant::now()) {
            println!("{}", reply.cyan());
        }
    }
}
