use std::collections::HashMap;

/// Correspondence tables between the Essono (2012) and Pichon (1950)
/// writing conventions for Ewondo.
///
/// Built once at startup and handed to the transducer; the tables are read
/// only from then on. Consonant rules keep their insertion order because the
/// consonant pass (and its trace entries) iterates them in table order.
///
/// # Examples
/// ```
/// use ewondo_core::rules::RuleTable;
///
/// let table = RuleTable::default();
/// assert_eq!(table.vowel('ɔ'), Some('\u{00F2}'));
/// assert!(table.is_tone_mark('\u{0300}'));
/// ```
#[derive(Debug, Clone)]
pub struct RuleTable {
    consonants: Vec<(char, char)>,
    vowels: HashMap<char, char>,
    tones: Vec<(char, String)>,
}

impl RuleTable {
    /// An empty table. Every word passes through such a table unchanged.
    pub fn empty() -> Self {
        RuleTable {
            consonants: Vec::new(),
            vowels: HashMap::new(),
            tones: Vec::new(),
        }
    }

    /// ============================================================
    /// Builder methods for assembling custom tables

    /// Add a consonant correspondence. Rules fire in insertion order.
    pub fn with_consonant(mut self, essono: char, pichon: char) -> Self {
        self.consonants.push((essono, pichon));
        self
    }

    /// Add a vowel correspondence. The Essono side is matched against the
    /// canonically decomposed form of the word, so it must be a bare base
    /// letter, not a letter-plus-diacritic sequence.
    pub fn with_vowel(mut self, essono: char, pichon: char) -> Self {
        self.vowels.insert(essono, pichon);
        self
    }

    /// Add a combining code point that carries tone in Essono. Pichon has no
    /// surface form for tones; the display name only ever appears in traces.
    pub fn with_tone_mark(mut self, mark: char, name: &str) -> Self {
        self.tones.push((mark, name.to_string()));
        self
    }

    /// ============================================================
    /// Lookups used by the transducer passes

    /// The consonant rules, in the order the consonant pass applies them.
    pub fn consonants(&self) -> &[(char, char)] {
        &self.consonants
    }

    /// The Pichon replacement for a decomposed Essono vowel, if one exists.
    pub fn vowel(&self, essono: char) -> Option<char> {
        self.vowels.get(&essono).copied()
    }

    /// Whether `pichon` is the replacement side of some vowel rule.
    pub fn is_vowel_replacement(&self, pichon: char) -> bool {
        self.vowels.values().any(|&v| v == pichon)
    }

    /// Display name of a tonal diacritic, if `mark` is one.
    pub fn tone_name(&self, mark: char) -> Option<&str> {
        self.tones
            .iter()
            .find(|(m, _)| *m == mark)
            .map(|(_, name)| name.as_str())
    }

    pub fn is_tone_mark(&self, mark: char) -> bool {
        self.tone_name(mark).is_some()
    }
}

impl Default for RuleTable {
    /// The published Essono→Pichon correspondences.
    fn default() -> Self {
        RuleTable::empty()
            // Only consonant that changes (velar nasal → dot above)
            .with_consonant('ŋ', '\u{1E45}')
            // Vowels, matched character by character on the decomposed form
            .with_vowel('ə', '\u{00EB}') // schwa → e with diaeresis
            .with_vowel('ɛ', '\u{00E8}') // epsilon → e with grave accent
            .with_vowel('ɔ', '\u{00F2}') // open o → o with grave accent
            // Tonal diacritics with no Pichon surface form
            .with_tone_mark('\u{0300}', "low tone (◌̀)")
            .with_tone_mark('\u{0301}', "high tone (◌́)")
            .with_tone_mark('\u{0304}', "mid tone (◌̄)")
            .with_tone_mark('\u{030C}', "rising tone (◌̌)")
            .with_tone_mark('\u{0302}', "falling tone (◌̂)")
    }
}
