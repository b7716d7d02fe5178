//! Text tokenizer and lexicon scorer.

use serde::Serialize;

use crate::lexicon::Lexicon;

/// Characters treated as token separators in addition to whitespace.
/// Apostrophes and hyphens are kept so contractions stay one token.
const SEPARATORS: &[char] = &[
    '.', ',', '/', '#', '!', '?', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '_', '`',
    '"', '~', '(', ')', '[', ']',
];

/// Sentiment of one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    /// Sum of matched word valences.
    pub score: i32,
    /// `score / tokens`, or `0.0` when there are no tokens.
    pub comparative: f64,
    /// Number of tokens the text split into.
    pub tokens: usize,
    /// Matched words with positive valence, in text order.
    pub positive: Vec<String>,
    /// Matched words with negative valence, in text order.
    pub negative: Vec<String>,
}

/// Lowercases `text` and splits it on whitespace and punctuation.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Scores `text` against `lexicon`.
///
/// Never fails: empty or non-linguistic input yields a zero score.
#[must_use]
pub fn analyze(text: &str, lexicon: &Lexicon) -> SentimentResult {
    let tokens = tokenize(text);
    let mut score = 0_i32;
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for token in &tokens {
        match lexicon.valence(token) {
            Some(v) if v > 0 => {
                score = score.saturating_add(v);
                positive.push(token.clone());
            }
            Some(v) if v < 0 => {
                score = score.saturating_add(v);
                negative.push(token.clone());
            }
            _ => {}
        }
    }

    let comparative = if tokens.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let denom = tokens.len() as f64;
        f64::from(score) / denom
    };

    SentimentResult {
        score,
        comparative,
        tokens: tokens.len(),
        positive,
        negative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mini() -> Lexicon {
        Lexicon::from_pairs([("good", 2), ("bad", -2), ("don't", -1)])
    }

    #[test]
    fn empty_string_scores_zero() {
        let result = analyze("", &mini());
        assert_eq!(result.score, 0);
        assert_eq!(result.comparative, 0.0);
        assert_eq!(result.tokens, 0);
    }

    #[test]
    fn punctuation_only_has_no_tokens() {
        let result = analyze("?!... ()", &mini());
        assert_eq!(result.tokens, 0);
        assert_eq!(result.comparative, 0.0);
    }

    #[test]
    fn unknown_words_score_zero() {
        let result = analyze("the quick brown fox", &mini());
        assert_eq!(result.score, 0);
        assert_eq!(result.comparative, 0.0);
        assert_eq!(result.tokens, 4);
    }

    #[test]
    fn comparative_is_score_over_token_count() {
        let result = analyze("good good day", &mini());
        assert_eq!(result.score, 4);
        assert_eq!(result.tokens, 3);
        assert!((result.comparative - 4.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn matching_is_case_insensitive_and_strips_punctuation() {
        let result = analyze("GOOD! (bad), Good.", &mini());
        assert_eq!(result.score, 2);
        assert_eq!(result.positive, vec!["good", "good"]);
        assert_eq!(result.negative, vec!["bad"]);
    }

    #[test]
    fn apostrophes_stay_inside_tokens() {
        assert_eq!(tokenize("I don't know"), vec!["i", "don't", "know"]);
        assert_eq!(analyze("I don't know", &mini()).score, -1);
    }

    #[test]
    fn newlines_split_tokens() {
        assert_eq!(tokenize("good\nbad"), vec!["good", "bad"]);
    }

    #[test]
    fn scoring_is_deterministic() {
        let lexicon = Lexicon::builtin();
        let text = "What a great, amazing day. Terrible traffic though!";
        assert_eq!(analyze(text, &lexicon), analyze(text, &lexicon));
    }

    #[test]
    fn builtin_lexicon_orders_reference_posts() {
        let lexicon = Lexicon::builtin();
        assert!(analyze("great amazing love", &lexicon).score > 0);
        assert!(analyze("bad terrible hate", &lexicon).score < 0);
        assert_eq!(analyze("the cat sat", &lexicon).score, 0);
    }

    #[test]
    fn comparative_is_always_finite() {
        let lexicon = Lexicon::builtin();
        for text in ["", " ", "🙂🙂", "love", "1 2 3 4", "hate\t\t\n"] {
            assert!(analyze(text, &lexicon).comparative.is_finite(), "{text:?}");
        }
    }
}
