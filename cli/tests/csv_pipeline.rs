use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

fn run_csv(input: &str) -> String {
    let dir = TempDir::new().expect("tempdir");
    let input_path = dir.path().join("letter_a.csv");
    let output_path = dir.path().join("transcribed.csv");
    fs::write(&input_path, input).expect("write input");

    let output = Command::cargo_bin("ewondo")
        .expect("binary builds")
        .arg("csv")
        .arg(&input_path)
        .arg("--output")
        .arg(&output_path)
        .output()
        .expect("failed to spawn ewondo binary");
    assert!(output.status.success());

    fs::read_to_string(&output_path).expect("read output")
}

#[test]
fn header_row_gains_the_pichon_column_once() {
    let transcribed = run_csv("French,Ewondo,Part of speech\nabeille,fub,noun\n");
    let mut lines = transcribed.lines();

    assert_eq!(
        lines.next(),
        Some("French,Ewondo,Part of speech,Ewondo (Pichon)")
    );
}

#[test]
fn data_rows_get_the_transcribed_form_appended() {
    let transcribed = run_csv(&format!(
        "French,Ewondo,Part of speech\nserpent,{},noun\n",
        "ŋɔ\u{0300}"
    ));

    let row = transcribed.lines().nth(1).expect("data row");
    assert_eq!(
        row,
        format!("serpent,ŋɔ\u{0300},noun,{}{}", '\u{1E45}', '\u{00F2}')
    );
}

#[test]
fn short_rows_pass_through_unchanged() {
    let transcribed = run_csv("French,Ewondo,Part of speech\nonly-two,fields\n");

    assert_eq!(transcribed.lines().nth(1), Some("only-two,fields"));
}

#[test]
fn empty_ewondo_cell_yields_an_empty_column() {
    let transcribed = run_csv("French,Ewondo,Part of speech\nvide,,noun\n");

    assert_eq!(transcribed.lines().nth(1), Some("vide,,noun,"));
}

#[test]
fn missing_input_reports_one_error_line() {
    let dir = TempDir::new().expect("tempdir");
    let output = Command::cargo_bin("ewondo")
        .expect("binary builds")
        .arg("csv")
        .arg(dir.path().join("does_not_exist.csv"))
        .arg("--output")
        .arg(dir.path().join("out.csv"))
        .output()
        .expect("failed to spawn ewondo binary");

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.contains("EWONDO | ERROR | ewondo.lexicon"));
}

#[test]
fn process_versions_transcribes_and_logs_pending_files() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("csv_to_process");
    let versions = dir.path().join("source_versions");
    let processed = dir.path().join("processed");
    let log = processed.join("log.csv");

    fs::create_dir_all(&source).expect("create source dir");
    fs::write(
        source.join("letter_a.csv"),
        "French,Ewondo,Part of speech\nserpent,ŋɔ\u{0300},noun\n",
    )
    .expect("write pending csv");

    let output = Command::cargo_bin("ewondo")
        .expect("binary builds")
        .arg("process")
        .arg("--source")
        .arg(&source)
        .arg("--versions")
        .arg(&versions)
        .arg("--processed")
        .arg(&processed)
        .arg("--log")
        .arg(&log)
        .output()
        .expect("failed to spawn ewondo binary");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.contains("Processed 1 file(s)."));

    // Source file moved out, versioned copy in place.
    assert!(!source.join("letter_a.csv").exists());
    let versioned: Vec<_> = fs::read_dir(&versions)
        .expect("read versions dir")
        .map(|e| e.expect("dir entry").file_name().into_string().expect("utf-8 name"))
        .collect();
    assert_eq!(versioned.len(), 1);
    assert!(versioned[0].starts_with("letter_a_"));
    assert!(versioned[0].ends_with("_v1.csv"));

    // Transcribed copy carries the new column.
    let transcribed_name = fs::read_dir(&processed)
        .expect("read processed dir")
        .map(|e| e.expect("dir entry").file_name().into_string().expect("utf-8 name"))
        .find(|name| name.ends_with("_v1_transcribed.csv"))
        .expect("transcribed copy present");
    let transcribed =
        fs::read_to_string(processed.join(&transcribed_name)).expect("read transcribed");
    assert!(transcribed.starts_with("French,Ewondo,Part of speech,Ewondo (Pichon)"));
    assert!(transcribed.contains(&format!("{}{}", '\u{1E45}', '\u{00F2}')));

    // One header line plus one record in the append-only log.
    let log_content = fs::read_to_string(&log).expect("read log");
    let log_lines: Vec<&str> = log_content.lines().collect();
    assert_eq!(log_lines[0], "CSV Source,Timestamp,Processed,Rows added,Version");
    assert_eq!(log_lines.len(), 2);
    assert!(log_lines[1].contains(&versioned[0]));
    assert!(log_lines[1].ends_with(",1"));
}

#[test]
fn version_suffix_increments_on_collision() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("csv_to_process");
    let versions = dir.path().join("source_versions");
    let processed = dir.path().join("processed");

    fs::create_dir_all(&source).expect("create source dir");
    let content = "French,Ewondo,Part of speech\nserpent,ŋɔ\u{0300},noun\n";

    // Two runs inside the same minute collide on the timestamp and must
    // fall through to _v2.
    for _ in 0..2 {
        fs::write(source.join("letter_a.csv"), content).expect("write pending csv");
        let output = Command::cargo_bin("ewondo")
            .expect("binary builds")
            .arg("process")
            .arg("--source")
            .arg(&source)
            .arg("--versions")
            .arg(&versions)
            .arg("--processed")
            .arg(&processed)
            .arg("--log")
            .arg(processed.join("log.csv"))
            .output()
            .expect("failed to spawn ewondo binary");
        assert!(output.status.success());
    }

    let mut names: Vec<_> = fs::read_dir(&versions)
        .expect("read versions dir")
        .map(|e| e.expect("dir entry").file_name().into_string().expect("utf-8 name"))
        .collect();
    names.sort();
    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("_v1.csv") || names[1].ends_with("_v1.csv"));
    assert!(names.iter().any(|n| n.ends_with("_v2.csv")) || stamps_differ(&names));
}

// A run that straddles a minute boundary gets fresh timestamps instead of a
// bumped version; both outcomes are correct.
fn stamps_differ(names: &[String]) -> bool {
    let stamp = |name: &str| name.trim_end_matches("_v1.csv").to_string();
    names.len() == 2 && stamp(&names[0]) != stamp(&names[1])
}
