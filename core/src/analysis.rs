use serde::{Deserialize, Serialize};

/// Outcome of transcribing a single word.
///
/// An immutable value created fresh per call: the trimmed Essono input, the
/// computed Pichon form, and a human-readable trace of every rule that
/// fired, in the order the passes ran. Serializes under the field names the
/// downstream tooling expects (`essono`, `pichon`, `rules`).
///
/// # Examples
/// ```
/// use ewondo_core::Transducer;
///
/// let result = Transducer::default().analyze("mə");
/// assert_eq!(result.transcribed, "m\u{00EB}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The trimmed input word, Essono form.
    #[serde(rename = "essono")]
    pub source: String,
    /// The computed Pichon form.
    #[serde(rename = "pichon")]
    pub transcribed: String,
    /// Rule-application descriptions, insertion order = pass order.
    #[serde(rename = "rules")]
    pub trace: Vec<String>,
}

impl AnalysisResult {
    pub fn new(source: &str, transcribed: String, trace: Vec<String>) -> Self {
        AnalysisResult {
            source: source.to_string(),
            transcribed,
            trace,
        }
    }

    /// Convenience conversion to JSON for a single result.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
