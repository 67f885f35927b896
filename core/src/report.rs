// Presentation surfaces for analysis results. Both renderings are part of
// the transducer's contract: downstream tooling parses the machine form and
// the interactive loop prints the human form, so each must be reproduced
// byte for byte.

use console::measure_text_width;

use crate::analysis::AnalysisResult;

/// Width of the `=` rule lines bounding the table.
const RULE_WIDTH: usize = 60;
/// Visible width of the two word columns.
const WORD_COLUMN: usize = 20;

/// Machine mode: the ordered results as a pretty-printed JSON array.
///
/// Field names follow the original tooling (`essono`, `pichon`, `rules`)
/// and non-ASCII characters are preserved verbatim, never escaped.
pub fn to_json(results: &[AnalysisResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Human mode: a fixed-width three-column table.
///
/// One data row per result: original word, transcribed word, and the trace
/// joined with `"; "`. Word columns are padded to a fixed visible width
/// (combining marks measure zero columns, so accented words line up) and the
/// header and body are bounded by `=` rule lines.
///
/// ```text
/// ============================================================
/// ESSONO               PICHON               RULES APPLIED
/// ============================================================
/// aba                  aba                  No changes needed
/// ============================================================
/// ```
pub fn render_table(results: &[AnalysisResult]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');
    push_row(&mut out, "ESSONO", "PICHON", "RULES APPLIED");
    out.push_str(&rule);
    out.push('\n');

    for result in results {
        let rules = result.trace.join("; ");
        push_row(&mut out, &result.source, &result.transcribed, &rules);
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

fn push_row(out: &mut String, source: &str, transcribed: &str, rules: &str) {
    out.push_str(&pad(source));
    out.push(' ');
    out.push_str(&pad(transcribed));
    out.push(' ');
    out.push_str(rules);
    out.push('\n');
}

fn pad(text: &str) -> String {
    let fill = WORD_COLUMN.saturating_sub(measure_text_width(text));
    format!("{}{}", text, " ".repeat(fill))
}
