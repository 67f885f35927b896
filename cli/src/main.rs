use std::path::{Path, PathBuf};

use clap::{Arg, ArgMatches, Command};
use ewondo_core::{RuleTable, Transducer, generate_error_report, report};

mod lexicon;
mod repl;
mod versioning;

fn main() {
    env_logger::init();

    let cli = Command::new("Ewondo Transcriptor CLI")
        .version("0.1.0")
        .about("Transcribe Ewondo from the Essono (2012) to the Pichon (1950) convention");

    let cli = setup_cli(cli);
    let matches = cli.get_matches();

    let transducer = Transducer::new(RuleTable::default());
    dispatch_commands(&matches, &transducer);
}

/// Sets up the CLI arguments and subcommands.
/// With a bare word list the process runs once and prints the machine-mode
/// JSON document; with no arguments at all it drops into the interactive
/// loop. The `csv` and `process` subcommands drive the dictionary pipeline.
fn setup_cli(cli: Command) -> Command {
    cli.arg(
        Arg::new("words")
            .help("Comma-separated Essono words to transcribe")
            .index(1),
    )
    .subcommand(
        Command::new("csv")
            .about("Append a transcribed 'Ewondo (Pichon)' column to a dictionary CSV")
            .arg(
                Arg::new("input")
                    .help("The dictionary CSV to read")
                    .required(true)
                    .index(1),
            )
            .arg(
                Arg::new("output")
                    .help("Where to write the transcribed CSV")
                    .short('o')
                    .long("output")
                    .required(true)
                    .value_parser(clap::value_parser!(String))
                    .value_name("FILE"),
            ),
    )
    .subcommand(
        Command::new("process")
            .about("Version and transcribe every pending dictionary CSV")
            .arg(
                Arg::new("source")
                    .help("Directory scanned for pending CSV files")
                    .long("source")
                    .value_name("DIR")
                    .default_value("csv_to_process"),
            )
            .arg(
                Arg::new("versions")
                    .help("Directory receiving versioned source files")
                    .long("versions")
                    .value_name("DIR")
                    .default_value("source_versions"),
            )
            .arg(
                Arg::new("processed")
                    .help("Directory receiving transcribed copies")
                    .long("processed")
                    .value_name("DIR")
                    .default_value("processed"),
            )
            .arg(
                Arg::new("log")
                    .help("Append-only log of processed files")
                    .long("log")
                    .value_name("FILE")
                    .default_value("processed/log.csv"),
            ),
    )
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(matches: &ArgMatches, transducer: &Transducer) {
    match matches.subcommand() {
        Some(("csv", sub_m)) => {
            let input = sub_m.get_one::<String>("input").expect("required argument");
            let output = sub_m.get_one::<String>("output").expect("required argument");

            match lexicon::transcribe_csv(transducer, Path::new(input), Path::new(output)) {
                Ok(rows) => println!("Transcription complete: {} ({} rows)", output, rows),
                Err(e) => println!("{}", generate_error_report(&e)),
            }
        }
        Some(("process", sub_m)) => {
            let dirs = versioning::PipelineDirs {
                source: arg_path(sub_m, "source"),
                versions: arg_path(sub_m, "versions"),
                processed: arg_path(sub_m, "processed"),
                log: arg_path(sub_m, "log"),
            };

            let processed = versioning::process_pending(transducer, &dirs);
            println!("Processed {} file(s).", processed);
        }
        _ => match matches.get_one::<String>("words") {
            Some(words) => {
                let results: Vec<_> = transducer.analyze_many(words).collect();
                match report::to_json(&results) {
                    Ok(document) => println!("{}", document),
                    Err(e) => println!("Failed to serialize results: {}", e),
                }
            }
            None => repl::run(transducer),
        },
    }
}

fn arg_path(matches: &ArgMatches, name: &str) -> PathBuf {
    PathBuf::from(matches.get_one::<String>(name).expect("defaulted argument"))
}
