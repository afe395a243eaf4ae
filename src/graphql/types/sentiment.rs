//! GraphQL types for sentiment analysis

use async_graphql::*;

use crate::sentiment;

#[derive(InputObject, Debug, Clone)]
pub struct SentimentAnalysisInput {
    pub text: String,
}

#[derive(Clone)]
pub struct SentimentResult(pub sentiment::SentimentResult);

#[Object]
impl SentimentResult {
    async fn text(&self) -> &str {
        &self.0.text
    }

    async fn score(&self) -> i32 {
        self.0.score
    }

    async fn comparative(&self) -> f64 {
        self.0.comparative
    }

    /// `positive`, `neutral` or `negative`
    async fn sentiment(&self) -> String {
        self.0.sentiment.to_string()
    }

    async fn positive(&self) -> &[String] {
        &self.0.positive
    }

    async fn negative(&self) -> &[String] {
        &self.0.negative
    }

    /// 0 to 100
    async fn confidence(&self) -> f64 {
        self.0.confidence
    }
}
