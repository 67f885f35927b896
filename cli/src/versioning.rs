use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use ewondo_core::{EwondoErrorExt, Level, Transducer, generate_error_report};
use glob::glob;
use log::{info, warn};

use crate::lexicon::{self, LexiconError};

/// Timestamp embedded in versioned filenames.
const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// Directories and log file driven by the `process` command.
#[derive(Debug, Clone)]
pub struct PipelineDirs {
    /// Scanned for pending `*.csv` files.
    pub source: PathBuf,
    /// Receives the versioned originals.
    pub versions: PathBuf,
    /// Receives the transcribed copies.
    pub processed: PathBuf,
    /// Append-only record of every processed file.
    pub log: PathBuf,
}

/// Failure in a versioning step (rename, copy, log append).
#[derive(Debug)]
pub struct PipelineError {
    pub path: PathBuf,
    pub detail: String,
}

impl PipelineError {
    fn new(path: &Path, detail: impl fmt::Display) -> Self {
        PipelineError {
            path: path.to_path_buf(),
            detail: detail.to_string(),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pipeline step failed for {:?}: {}", self.path, self.detail)
    }
}

impl std::error::Error for PipelineError {}

impl EwondoErrorExt for PipelineError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "ewondo.versioning".to_string()
    }
}

impl From<LexiconError> for PipelineError {
    fn from(e: LexiconError) -> Self {
        PipelineError {
            path: e.path,
            detail: e.detail,
        }
    }
}

/// First free `{base}_{timestamp}_v{N}{suffix}.csv` in `dir`, with the
/// version number that was chosen. N starts at 1 and grows until the name
/// does not collide with an existing file.
pub fn versioned_filename(dir: &Path, base: &str, suffix: &str) -> (PathBuf, u32) {
    let stamp = Local::now().format(STAMP_FORMAT).to_string();
    let mut version = 1u32;
    loop {
        let candidate = dir.join(format!("{}_{}_v{}{}.csv", base, stamp, version, suffix));
        if !candidate.exists() {
            return (candidate, version);
        }
        version += 1;
    }
}

/// Version and transcribe every pending CSV under the source directory.
///
/// Per file: move the original into the versions directory under a
/// timestamped name, write a transcribed copy into the processed directory
/// with the `_transcribed` suffix, and append one record to the log. A file
/// that fails is reported with a single message and skipped; steps already
/// completed for earlier files stay in place. Returns the number of files
/// fully processed.
pub fn process_pending(transducer: &Transducer, dirs: &PipelineDirs) -> usize {
    let pattern = dirs.source.join("*.csv");
    let entries = match glob(&pattern.to_string_lossy()) {
        Ok(entries) => entries,
        Err(e) => {
            println!("Invalid source pattern {:?}: {}", pattern, e);
            return 0;
        }
    };

    let mut completed = 0usize;
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        let Some(base) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };

        match process_one(transducer, dirs, &path, &base) {
            Ok(outcome) => {
                println!("CSV source versioned: {}", outcome.versioned.display());
                println!(
                    "CSV processed created: {} ({} rows)",
                    outcome.processed.display(),
                    outcome.rows
                );
                completed += 1;
            }
            Err(e) => println!("{}", generate_error_report(&e)),
        }
    }
    completed
}

struct Outcome {
    versioned: PathBuf,
    processed: PathBuf,
    rows: usize,
}

fn process_one(
    transducer: &Transducer,
    dirs: &PipelineDirs,
    pending: &Path,
    base: &str,
) -> Result<Outcome, PipelineError> {
    fs::create_dir_all(&dirs.versions).map_err(|e| PipelineError::new(&dirs.versions, e))?;
    let (versioned, _) = versioned_filename(&dirs.versions, base, "");
    fs::rename(pending, &versioned).map_err(|e| PipelineError::new(pending, e))?;
    info!("versioned {} as {}", pending.display(), versioned.display());

    fs::create_dir_all(&dirs.processed).map_err(|e| PipelineError::new(&dirs.processed, e))?;
    let (processed, version) = versioned_filename(&dirs.processed, base, "_transcribed");
    let rows = lexicon::transcribe_csv(transducer, &versioned, &processed)?;

    append_log(&dirs.log, &versioned, &processed, rows, version)?;

    Ok(Outcome {
        versioned,
        processed,
        rows,
    })
}

/// Append one record to the log, creating it (with a header) on first use.
fn append_log(
    log_path: &Path,
    versioned: &Path,
    processed: &Path,
    rows: usize,
    version: u32,
) -> Result<(), PipelineError> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).map_err(|e| PipelineError::new(parent, e))?;
    }

    let is_new = !log_path.exists();
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| PipelineError::new(log_path, e))?;

    let mut writer = csv::Writer::from_writer(file);
    if is_new {
        writer
            .write_record(["CSV Source", "Timestamp", "Processed", "Rows added", "Version"])
            .map_err(|e| PipelineError::new(log_path, e))?;
    }

    writer
        .write_record([
            file_name(versioned),
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            file_name(processed),
            rows.to_string(),
            version.to_string(),
        ])
        .map_err(|e| PipelineError::new(log_path, e))?;
    writer.flush().map_err(|e| PipelineError::new(log_path, e))?;
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
