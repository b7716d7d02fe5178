//! Word-valence lexicon.
//!
//! Valences are integers in `[-5, 5]` in the AFINN convention: positive words
//! score above zero, negative words below. Keys are stored lowercase.

use std::collections::HashMap;
use std::path::Path;

use crate::error::LexiconError;

const MIN_VALENCE: i32 = -5;
const MAX_VALENCE: i32 = 5;

/// English word list shipped with the crate, a subset of AFINN-165.
const BUILTIN: &[(&str, i32)] = &[
    // Positive
    ("accept", 1),
    ("accepted", 1),
    ("admire", 3),
    ("adore", 3),
    ("advantage", 2),
    ("agree", 1),
    ("amazed", 2),
    ("amazing", 4),
    ("appreciate", 2),
    ("appreciated", 2),
    ("approve", 2),
    ("awesome", 4),
    ("beautiful", 3),
    ("benefit", 2),
    ("best", 3),
    ("better", 2),
    ("bless", 2),
    ("blessed", 3),
    ("brave", 2),
    ("breathtaking", 5),
    ("brilliant", 4),
    ("calm", 2),
    ("care", 2),
    ("celebrate", 3),
    ("charming", 3),
    ("cheer", 2),
    ("cheerful", 2),
    ("clean", 2),
    ("clever", 2),
    ("comfortable", 2),
    ("congrats", 2),
    ("congratulations", 2),
    ("cool", 1),
    ("cute", 2),
    ("delight", 3),
    ("delighted", 3),
    ("eager", 2),
    ("easy", 1),
    ("enjoy", 2),
    ("enjoyed", 2),
    ("excellent", 3),
    ("excited", 3),
    ("exciting", 3),
    ("fabulous", 4),
    ("fair", 2),
    ("fantastic", 4),
    ("fine", 2),
    ("free", 1),
    ("fresh", 1),
    ("friendly", 2),
    ("fun", 4),
    ("funny", 4),
    ("glad", 3),
    ("good", 3),
    ("gorgeous", 3),
    ("grateful", 3),
    ("great", 3),
    ("happy", 3),
    ("help", 2),
    ("helpful", 2),
    ("hero", 2),
    ("hope", 2),
    ("hopeful", 2),
    ("hurrah", 5),
    ("impressive", 3),
    ("inspiration", 2),
    ("inspired", 2),
    ("interesting", 2),
    ("joy", 3),
    ("kind", 2),
    ("laugh", 1),
    ("like", 2),
    ("liked", 2),
    ("lol", 3),
    ("love", 3),
    ("loved", 3),
    ("lovely", 3),
    ("loves", 3),
    ("loving", 2),
    ("lucky", 3),
    ("nice", 3),
    ("outstanding", 5),
    ("perfect", 3),
    ("pleased", 3),
    ("positive", 2),
    ("pretty", 1),
    ("proud", 2),
    ("recommend", 2),
    ("relief", 1),
    ("safe", 1),
    ("smile", 2),
    ("strong", 2),
    ("success", 2),
    ("successful", 3),
    ("super", 3),
    ("superb", 5),
    ("support", 2),
    ("terrific", 4),
    ("thank", 2),
    ("thanks", 2),
    ("thrilled", 5),
    ("true", 2),
    ("trust", 1),
    ("want", 1),
    ("warm", 1),
    ("welcome", 2),
    ("win", 4),
    ("winner", 4),
    ("wins", 4),
    ("won", 3),
    ("wonderful", 4),
    ("wow", 4),
    ("yay", 2),
    ("yes", 1),
    // Negative
    ("abandon", -2),
    ("abandoned", -2),
    ("abuse", -3),
    ("accident", -2),
    ("afraid", -2),
    ("aggressive", -2),
    ("alarm", -2),
    ("alone", -2),
    ("anger", -3),
    ("angry", -3),
    ("annoy", -2),
    ("annoyed", -2),
    ("annoying", -2),
    ("anxious", -2),
    ("awful", -3),
    ("bad", -3),
    ("bitter", -2),
    ("blame", -2),
    ("bored", -2),
    ("boring", -3),
    ("broken", -1),
    ("confused", -2),
    ("crap", -3),
    ("crash", -2),
    ("crazy", -2),
    ("crisis", -3),
    ("cruel", -3),
    ("cry", -1),
    ("damage", -3),
    ("damn", -4),
    ("danger", -2),
    ("dead", -3),
    ("death", -2),
    ("depressed", -2),
    ("destroy", -3),
    ("disappoint", -2),
    ("disappointed", -2),
    ("disappointing", -2),
    ("disaster", -2),
    ("disgusting", -3),
    ("dislike", -2),
    ("dumb", -3),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
    ("fake", -3),
    ("fear", -2),
    ("fraud", -4),
    ("greed", -3),
    ("grief", -2),
    ("hate", -3),
    ("hated", -3),
    ("hates", -3),
    ("hating", -3),
    ("heartbroken", -3),
    ("hell", -4),
    ("horrible", -3),
    ("hurt", -2),
    ("ignore", -1),
    ("ill", -2),
    ("kill", -3),
    ("lame", -2),
    ("liar", -3),
    ("lonely", -2),
    ("lose", -3),
    ("loss", -3),
    ("lost", -3),
    ("mad", -3),
    ("mess", -2),
    ("miss", -2),
    ("mistake", -2),
    ("no", -1),
    ("pain", -2),
    ("panic", -3),
    ("pity", -2),
    ("poor", -2),
    ("problem", -2),
    ("protest", -2),
    ("rage", -2),
    ("sad", -2),
    ("scam", -2),
    ("scared", -2),
    ("shame", -2),
    ("sick", -2),
    ("sorry", -1),
    ("stupid", -2),
    ("suck", -3),
    ("sucks", -3),
    ("terrible", -3),
    ("tired", -2),
    ("trouble", -2),
    ("ugly", -3),
    ("unhappy", -2),
    ("upset", -2),
    ("useless", -2),
    ("violence", -3),
    ("war", -2),
    ("waste", -1),
    ("weak", -2),
    ("worried", -3),
    ("worry", -3),
    ("worse", -3),
    ("worst", -3),
    ("wrong", -2),
];

/// Immutable mapping from lowercase word to integer valence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashMap<String, i32>,
}

impl Lexicon {
    /// The English word list bundled with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN.iter().copied())
    }

    /// Builds a lexicon from `(word, valence)` pairs. Words are lowercased;
    /// later duplicates overwrite earlier ones.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: AsRef<str>,
    {
        let words = pairs
            .into_iter()
            .map(|(word, valence)| (word.as_ref().to_lowercase(), valence))
            .collect();
        Self { words }
    }

    /// Parses AFINN-format text: one `word<TAB>valence` entry per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Multi-word
    /// entries are dropped since tokens never contain whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Malformed`] naming the 1-based line when a
    /// line has no tab, an empty word, a non-integer valence, or a valence
    /// outside `[-5, 5]`.
    pub fn parse_afinn(text: &str) -> Result<Self, LexiconError> {
        let mut words = HashMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let (word, valence) = line
                .rsplit_once('\t')
                .ok_or_else(|| LexiconError::Malformed {
                    line: line_no,
                    reason: "expected word<TAB>valence".to_string(),
                })?;

            let word = word.trim().to_lowercase();
            if word.is_empty() {
                return Err(LexiconError::Malformed {
                    line: line_no,
                    reason: "empty word".to_string(),
                });
            }

            let valence: i32 = valence
                .trim()
                .parse()
                .map_err(|e| LexiconError::Malformed {
                    line: line_no,
                    reason: format!("invalid valence \"{}\": {e}", valence.trim()),
                })?;
            if !(MIN_VALENCE..=MAX_VALENCE).contains(&valence) {
                return Err(LexiconError::Malformed {
                    line: line_no,
                    reason: format!("valence {valence} outside [{MIN_VALENCE}, {MAX_VALENCE}]"),
                });
            }

            if word.contains(char::is_whitespace) {
                tracing::debug!(line = line_no, word = %word, "skipping multi-word lexicon entry");
                continue;
            }

            words.insert(word, valence);
        }

        Ok(Self { words })
    }

    /// Reads and parses an AFINN-format file.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Io`] if the file cannot be read, or
    /// [`LexiconError::Malformed`] if its contents do not parse.
    pub fn from_path(path: &Path) -> Result<Self, LexiconError> {
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::parse_afinn(&text)?;
        tracing::info!(path = %path.display(), words = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    /// Valence of an already-lowercased token, if the lexicon knows it.
    #[must_use]
    pub fn valence(&self, token: &str) -> Option<i32> {
        self.words.get(token).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_common_words() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.valence("great"), Some(3));
        assert_eq!(lexicon.valence("amazing"), Some(4));
        assert_eq!(lexicon.valence("terrible"), Some(-3));
        assert_eq!(lexicon.valence("cat"), None);
    }

    #[test]
    fn builtin_valences_are_in_range() {
        for &(word, valence) in BUILTIN {
            assert!(
                (MIN_VALENCE..=MAX_VALENCE).contains(&valence),
                "{word} has out-of-range valence {valence}"
            );
            assert_eq!(word, word.to_lowercase(), "{word} should be lowercase");
        }
    }

    #[test]
    fn from_pairs_lowercases_keys() {
        let lexicon = Lexicon::from_pairs([("Shiny", 2)]);
        assert_eq!(lexicon.valence("shiny"), Some(2));
        assert_eq!(lexicon.valence("Shiny"), None);
    }

    #[test]
    fn parse_afinn_reads_entries_and_skips_comments() {
        let text = "# test list\nabandon\t-2\n\nawesome\t4\r\n";
        let lexicon = Lexicon::parse_afinn(text).expect("parse");
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.valence("abandon"), Some(-2));
        assert_eq!(lexicon.valence("awesome"), Some(4));
    }

    #[test]
    fn parse_afinn_drops_multi_word_entries() {
        let lexicon = Lexicon::parse_afinn("does not work\t-3\nworks\t1\n").expect("parse");
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.valence("works"), Some(1));
    }

    #[test]
    fn parse_afinn_rejects_missing_tab() {
        let err = Lexicon::parse_afinn("good 3").unwrap_err();
        assert!(matches!(err, LexiconError::Malformed { line: 1, .. }), "got {err:?}");
    }

    #[test]
    fn parse_afinn_rejects_bad_valence_with_line_number() {
        let err = Lexicon::parse_afinn("good\t3\nbad\tvery\n").unwrap_err();
        assert!(matches!(err, LexiconError::Malformed { line: 2, .. }), "got {err:?}");
    }

    #[test]
    fn parse_afinn_rejects_out_of_range_valence() {
        let err = Lexicon::parse_afinn("ecstatic\t9").unwrap_err();
        assert!(matches!(err, LexiconError::Malformed { line: 1, .. }), "got {err:?}");
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = Lexicon::from_path(Path::new("/nonexistent/afinn.tsv")).unwrap_err();
        assert!(matches!(err, LexiconError::Io { .. }), "got {err:?}");
    }
}
