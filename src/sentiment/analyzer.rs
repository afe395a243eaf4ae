use super::lexicon::{is_negator, Lexicon};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Punctuation treated as whitespace when splitting text into words
const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '?', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '_', '`',
    '"', '~', '(', ')',
];

/// Overall polarity of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    fn from_score(score: i32) -> Self {
        match score {
            s if s > 0 => SentimentLabel::Positive,
            s if s < 0 => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

/// Lexicon-based sentiment of one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    /// The analyzed text, unchanged
    pub text: String,
    /// Sum of word scores after negation
    pub score: i32,
    /// `score` divided by the number of tokens
    pub comparative: f64,
    pub sentiment: SentimentLabel,
    /// Words that contributed positively, in order of appearance
    pub positive: Vec<String>,
    /// Words that contributed negatively, in order of appearance
    pub negative: Vec<String>,
    /// `|comparative| * 100`, capped at 100 and rounded to two decimals
    pub confidence: f64,
}

/// Scores free text against a word valence lexicon
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    /// Analyzer backed by the built-in AFINN list
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::afinn(),
        }
    }

    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score a single text. Never fails; text with no known words is neutral.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let tokens = tokenize(text);

        let mut score = 0;
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut word_score) = self.lexicon.score(token) else {
                continue;
            };

            if i > 0 && is_negator(&tokens[i - 1]) {
                word_score = -word_score;
            }

            if word_score > 0 {
                positive.push(token.clone());
            } else if word_score < 0 {
                negative.push(token.clone());
            }
            score += word_score;
        }

        let comparative = if tokens.is_empty() {
            0.0
        } else {
            f64::from(score) / tokens.len() as f64
        };
        let confidence = round2((comparative.abs() * 100.0).min(100.0));

        SentimentResult {
            text: text.to_string(),
            score,
            comparative,
            sentiment: SentimentLabel::from_score(score),
            positive,
            negative,
            confidence,
        }
    }

    /// Score several texts, preserving input order
    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SentimentResult> {
        texts.iter().map(|t| self.analyze(t.as_ref())).collect()
    }
}

/// Lowercase, blank out punctuation, split on whitespace
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(STRIPPED_PUNCTUATION, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
