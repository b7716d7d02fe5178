//! Lexicon-based sentiment scoring for SocialPulse.
//!
//! Text is tokenized, each token is looked up in an injected [`Lexicon`] of
//! integer word valences, and the matches are summed. The lexicon is an
//! immutable value so callers (and tests) choose which word list applies.

pub mod error;
pub mod lexicon;
pub mod scorer;

pub use error::LexiconError;
pub use lexicon::Lexicon;
pub use scorer::{analyze, tokenize, SentimentResult};
