use ewondo_core::{RuleTable, Transducer, report};

fn results_for(text: &str) -> Vec<ewondo_core::AnalysisResult> {
    Transducer::new(RuleTable::default())
        .analyze_many(text)
        .collect()
}

#[test]
fn machine_mode_uses_the_original_field_names() {
    let document = report::to_json(&results_for("ŋɔ\u{0300}")).expect("serializable");

    assert!(document.trim_start().starts_with('['));
    assert!(document.contains("\"essono\""));
    assert!(document.contains("\"pichon\""));
    assert!(document.contains("\"rules\""));
}

#[test]
fn machine_mode_keeps_non_ascii_verbatim() {
    let document = report::to_json(&results_for("ŋɔ\u{0300}, mə")).expect("serializable");

    assert!(document.contains('ŋ'));
    assert!(document.contains('ə'));
    assert!(!document.contains("\\u"), "non-ASCII must not be escaped: {}", document);
}

#[test]
fn machine_mode_preserves_word_order() {
    let document = report::to_json(&results_for("ba, da")).expect("serializable");

    let ba = document.find("\"ba\"").expect("first word present");
    let da = document.find("\"da\"").expect("second word present");
    assert!(ba < da);
}

#[test]
fn table_is_bounded_by_rule_lines() {
    let table = report::render_table(&results_for("aba"));
    let lines: Vec<&str> = table.lines().collect();

    let rule = "=".repeat(60);
    assert_eq!(lines[0], rule);
    assert_eq!(lines[2], rule);
    assert_eq!(lines[lines.len() - 1], rule);
    assert_eq!(lines.len(), 5);
}

#[test]
fn table_header_names_both_conventions() {
    let table = report::render_table(&results_for("aba"));
    let header = table.lines().nth(1).expect("header row");

    assert!(header.starts_with("ESSONO"));
    assert!(header.contains("PICHON"));
    assert!(header.ends_with("RULES APPLIED"));
    assert_eq!(&header[21..27], "PICHON");
}

#[test]
fn table_rows_join_the_trace_with_semicolons() {
    let table = report::render_table(&results_for("əkɔ"));

    assert!(table.contains(&format!(
        "Vowel: ɔ → {}; Vowel: ə → {}",
        '\u{00F2}', '\u{00EB}'
    )));
}

#[test]
fn table_pads_ascii_words_to_fixed_columns() {
    let table = report::render_table(&results_for("aba"));
    let row = table.lines().nth(3).expect("data row");

    assert_eq!(&row[..21], format!("{:<21}", "aba"));
    assert!(row.ends_with("No changes needed"));
}

#[test]
fn table_has_one_row_per_word() {
    let table = report::render_table(&results_for("a, b, c"));

    // 3 rule lines + header + 3 data rows
    assert_eq!(table.lines().count(), 7);
}
