use std::fmt;
use std::path::{Path, PathBuf};

use ewondo_core::{EwondoErrorExt, Level, Transducer};
use log::info;

/// Column name appended to transcribed dictionaries.
pub const PICHON_COLUMN: &str = "Ewondo (Pichon)";

/// Failure while reading or writing a dictionary CSV. Reported to the user
/// as a single message; versioning steps already completed are not undone.
#[derive(Debug)]
pub struct LexiconError {
    pub path: PathBuf,
    pub detail: String,
}

impl LexiconError {
    fn new(path: &Path, detail: impl fmt::Display) -> Self {
        LexiconError {
            path: path.to_path_buf(),
            detail: detail.to_string(),
        }
    }
}

impl fmt::Display for LexiconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to process dictionary {:?}: {}",
            self.path, self.detail
        )
    }
}

impl std::error::Error for LexiconError {}

impl EwondoErrorExt for LexiconError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "ewondo.lexicon".to_string()
    }
}

/// Add an `Ewondo (Pichon)` column to a dictionary CSV.
///
/// Data rows are `(French, Ewondo, PartOfSpeech, ...)`; the transcription of
/// the Ewondo cell is appended as a new trailing column, with an empty cell
/// transcribing to an empty cell. The header row gets the column name
/// appended once. Rows with fewer than three fields pass through unchanged.
/// Returns the number of data rows that received a transcription.
pub fn transcribe_csv(
    transducer: &Transducer,
    input: &Path,
    output: &Path,
) -> Result<usize, LexiconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(input)
        .map_err(|e| LexiconError::new(input, e))?;

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(output)
        .map_err(|e| LexiconError::new(output, e))?;

    let mut transcribed_rows = 0usize;
    for (row_num, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LexiconError::new(input, e))?;
        let mut row: Vec<String> = record.iter().map(String::from).collect();

        if row_num == 0 {
            row.push(PICHON_COLUMN.to_string());
        } else if row.len() >= 3 {
            let ewondo = &row[1];
            let pichon = if ewondo.is_empty() {
                String::new()
            } else {
                transducer.analyze(ewondo).transcribed
            };
            row.push(pichon);
            transcribed_rows += 1;
        }

        writer
            .write_record(&row)
            .map_err(|e| LexiconError::new(output, e))?;
    }

    writer.flush().map_err(|e| LexiconError::new(output, e))?;
    info!(
        "transcribed {} data rows from {}",
        transcribed_rows,
        input.display()
    );
    Ok(transcribed_rows)
}
