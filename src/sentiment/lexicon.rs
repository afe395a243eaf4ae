use crate::error::{AppError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

static AFINN_SOURCE: &str = include_str!("afinn.tsv");

static AFINN: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    Arc::new(Lexicon::from_tsv(AFINN_SOURCE).expect("embedded AFINN lexicon is well-formed"))
});

/// Words that flip the score of the word that follows them
const NEGATORS: &[&str] = &[
    "aint", "ain't", "arent", "aren't", "cannot", "cant", "can't", "couldnt", "couldn't",
    "darent", "daren't", "didnt", "didn't", "doesnt", "doesn't", "dont", "don't", "hadnt",
    "hadn't", "hasnt", "hasn't", "havent", "haven't", "isnt", "isn't", "mightnt", "mightn't",
    "mustnt", "mustn't", "neednt", "needn't", "neither", "never", "no", "nobody", "none",
    "nor", "not", "nothing", "nowhere", "oughtnt", "oughtn't", "shant", "shan't", "shouldnt",
    "shouldn't", "wasnt", "wasn't", "werent", "weren't", "without", "wont", "won't",
    "wouldnt", "wouldn't",
];

/// Word valence table
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    scores: HashMap<String, i32>,
}

impl Lexicon {
    /// Shared copy of the built-in word list, a review-oriented subset of AFINN-165
    pub fn afinn() -> Arc<Lexicon> {
        Arc::clone(&AFINN)
    }

    /// Parse `word<TAB>score` lines. Blank lines and `#` comments are skipped.
    pub fn from_tsv(source: &str) -> Result<Self> {
        let mut scores = HashMap::new();

        for (line_no, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (word, score) = line.rsplit_once('\t').ok_or_else(|| {
                AppError::Configuration(format!("Lexicon line {} has no score", line_no + 1))
            })?;
            let score: i32 = score.trim().parse().map_err(|_| {
                AppError::Configuration(format!(
                    "Lexicon line {} has an invalid score: {}",
                    line_no + 1,
                    score
                ))
            })?;

            scores.insert(word.trim().to_lowercase(), score);
        }

        Ok(Self { scores })
    }

    /// Load a `word<TAB>score` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let lexicon = Self::from_tsv(&source)?;
        tracing::info!(path = ?path, words = lexicon.len(), "Loaded sentiment lexicon");
        Ok(lexicon)
    }

    /// Override or add word scores
    pub fn with_extras<I, S>(mut self, extras: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        for (word, score) in extras {
            self.scores.insert(word.into().to_lowercase(), score);
        }
        self
    }

    pub fn score(&self, word: &str) -> Option<i32> {
        self.scores.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

pub fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token)
}
