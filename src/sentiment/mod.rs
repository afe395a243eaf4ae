//! Lexicon-based sentiment scoring for free-form text such as product reviews.
//!
//! Each known word carries an integer valence. A word directly after a negator
//! ("not", "don't", ...) has its valence flipped. The text score is the sum; the
//! comparative score divides it by the token count.

mod analyzer;
mod lexicon;

pub use analyzer::{tokenize, SentimentAnalyzer, SentimentLabel, SentimentResult};
pub use lexicon::Lexicon;
