use std::collections::BTreeSet;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::compose;

use crate::analysis::AnalysisResult;
use crate::rules::RuleTable;

/// Sentinel trace entry for a word no rule applied to.
pub const NO_CHANGES: &str = "No changes needed";

/// Essono→Pichon transducer with rule tracking.
///
/// Owns a fixed [`RuleTable`] and applies three ordered rewrite passes per
/// word: consonant substitution, vowel substitution on the decomposed form,
/// and tone-diacritic stripping. Every call is a pure function of its input
/// and the table, so repeated calls are byte-identical and independent words
/// may be analyzed concurrently without locking.
pub struct Transducer {
    rules: RuleTable,
}

impl Transducer {
    pub fn new(rules: RuleTable) -> Self {
        Transducer { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Transcribe one word, tracking every rule that fired.
    ///
    /// Leading and trailing whitespace is insignificant. A word that is
    /// empty after trimming is returned as-is (untrimmed) with an empty
    /// trace; a word no rule touched gets the [`NO_CHANGES`] sentinel. The
    /// operation is total: any Unicode string is valid input.
    ///
    /// # Examples
    /// ```
    /// use ewondo_core::Transducer;
    ///
    /// let result = Transducer::default().analyze("ŋɔ\u{0300}");
    /// assert_eq!(result.transcribed, "\u{1E45}\u{00F2}");
    /// ```
    pub fn analyze(&self, word: &str) -> AnalysisResult {
        let trimmed = word.trim();
        if trimmed.is_empty() {
            return AnalysisResult::new(word, word.to_string(), Vec::new());
        }

        let mut trace = Vec::new();
        let step1 = self.substitute_consonants(trimmed, &mut trace);
        let step2 = self.substitute_vowels(&step1, &mut trace);
        let step3 = self.strip_tones(&step2, &mut trace);

        if trace.is_empty() {
            trace.push(NO_CHANGES.to_string());
        }

        AnalysisResult::new(trimmed, step3, trace)
    }

    /// Transcribe a comma-separated word list.
    ///
    /// Splits on `,`, trims each piece, drops empty pieces, and analyzes the
    /// survivors left to right. The returned iterator is lazy and cheap to
    /// restart; results come back in input order.
    pub fn analyze_many<'a>(&'a self, text: &'a str) -> impl Iterator<Item = AnalysisResult> + 'a {
        text.split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(|piece| self.analyze(piece))
    }

    /// Pass 1: replace every occurrence of each mapped consonant, one trace
    /// entry per rule that found a match, in table order.
    fn substitute_consonants(&self, word: &str, trace: &mut Vec<String>) -> String {
        let mut current = word.to_string();
        for &(essono, pichon) in self.rules.consonants() {
            if current.contains(essono) {
                current = current.replace(essono, pichon.encode_utf8(&mut [0u8; 4]));
                trace.push(format!("Consonant: {} → {}", essono, pichon));
            }
        }
        current
    }

    /// Pass 2: decompose (NFD) so diacritics sit apart from their base
    /// letters, then map vowels code point by code point. Distinct
    /// substitutions are collected as a set and traced in lexicographic
    /// order so the output does not depend on scan order.
    fn substitute_vowels(&self, word: &str, trace: &mut Vec<String>) -> String {
        let decomposed: Vec<char> = word.nfd().collect();
        let mut output = String::with_capacity(word.len());
        let mut changes = BTreeSet::new();

        let mut chars = decomposed.into_iter().peekable();
        while let Some(ch) = chars.next() {
            if let Some(replacement) = self.rules.vowel(ch) {
                output.push(replacement);
                changes.insert(format!("{} → {}", ch, replacement));
                // The replacement grapheme statically encodes the accent;
                // tone marks riding on the substituted vowel are consumed
                // here and never reach the tone pass.
                while chars.peek().is_some_and(|&next| self.rules.is_tone_mark(next)) {
                    chars.next();
                }
            } else if let Some(pichon) = self.recompose_replacement(ch, chars.peek().copied()) {
                // Base + tone mark that recompose into a Pichon vowel are
                // already in the target convention; keep them combined so
                // the tone pass does not dismantle prior output.
                output.push(pichon);
                chars.next();
            } else {
                output.push(ch);
            }
        }

        for change in changes {
            trace.push(format!("Vowel: {}", change));
        }
        output
    }

    /// A decomposed `base` + `mark` pair counts as already-Pichon when the
    /// mark is tonal and the canonical composition of the pair is the
    /// replacement side of a vowel rule.
    fn recompose_replacement(&self, base: char, mark: Option<char>) -> Option<char> {
        let mark = mark.filter(|&m| self.rules.is_tone_mark(m))?;
        compose(base, mark).filter(|&c| self.rules.is_vowel_replacement(c))
    }

    /// Pass 3: drop tonal diacritics, collecting their display names, then
    /// recompose (NFC) so accented output displays as single glyphs. Names
    /// are reported once each, lexicographically, in a single trace entry.
    fn strip_tones(&self, word: &str, trace: &mut Vec<String>) -> String {
        let mut output = String::with_capacity(word.len());
        let mut removed = BTreeSet::new();

        for ch in word.chars() {
            match self.rules.tone_name(ch) {
                Some(name) => {
                    removed.insert(name.to_string());
                }
                None => output.push(ch),
            }
        }

        if !removed.is_empty() {
            let names: Vec<String> = removed.into_iter().collect();
            trace.push(format!("Removed tones: {}", names.join(", ")));
        }

        output.nfc().collect()
    }
}

impl Default for Transducer {
    fn default() -> Self {
        Transducer::new(RuleTable::default())
    }
}
