use std::io::{self, BufRead, Write};

use ewondo_core::{Transducer, report};

/// Interactive read-evaluate-print loop.
///
/// Prompts for comma-separated Essono words and prints the human-mode table
/// for each batch. `quit` (any case) leaves the loop with a farewell; empty
/// input re-prompts with a hint and does not count as a word. End of input
/// on stdin ends the loop cleanly.
pub fn run(transducer: &Transducer) {
    println!("=== EWONDO TRANSCRIPTOR: ESSONO → PICHON ===");
    println!("Enter words separated by commas, or 'quit' to exit\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Enter Essono word(s): ");
        io::stdout().flush().ok();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let input = line.trim();

        if input.eq_ignore_ascii_case("quit") {
            println!("Goodbye!");
            break;
        }
        if input.is_empty() {
            println!("Please enter some text to transcribe.\n");
            continue;
        }

        let results: Vec<_> = transducer.analyze_many(input).collect();
        println!();
        print!("{}", report::render_table(&results));
        println!();
    }
}
