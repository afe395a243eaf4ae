//! Review sentiment scoring

use sales_analytics::sentiment::{tokenize, Lexicon, SentimentAnalyzer, SentimentLabel};
use std::sync::Arc;

#[test]
fn test_mixed_review() {
    let analyzer = SentimentAnalyzer::new();
    let result = analyzer.analyze("Great monitor, but the stand is broken and the box was damaged.");

    // great 3, broken -1, damaged -3
    assert_eq!(result.score, -1);
    assert_eq!(result.sentiment, SentimentLabel::Negative);
    assert_eq!(result.positive, vec!["great"]);
    assert_eq!(result.negative, vec!["broken", "damaged"]);
    assert_eq!(result.text, "Great monitor, but the stand is broken and the box was damaged.");
}

#[test]
fn test_negation_only_affects_next_word() {
    let analyzer = SentimentAnalyzer::new();

    let result = analyzer.analyze("don't hate it, love it");
    assert_eq!(result.score, 6);
    assert_eq!(result.positive, vec!["hate", "love"]);

    let result = analyzer.analyze("not very good");
    assert_eq!(result.score, 3);
}

#[test]
fn test_confidence_is_capped() {
    let result = SentimentAnalyzer::new().analyze("outstanding");

    assert_eq!(result.score, 5);
    assert_eq!(result.comparative, 5.0);
    assert_eq!(result.confidence, 100.0);
}

#[test]
fn test_custom_lexicon() {
    let lexicon = Lexicon::from_tsv("sturdy\t2\nwobbly\t-2\n").unwrap();
    let analyzer = SentimentAnalyzer::with_lexicon(Arc::new(lexicon));

    let result = analyzer.analyze("Sturdy legs, not wobbly at all");
    assert_eq!(result.score, 4);
    assert_eq!(result.sentiment, SentimentLabel::Positive);
}

#[test]
fn test_tokenizer_keeps_apostrophes_and_hyphens() {
    assert_eq!(
        tokenize("USB-C (cable) isn't \"bad\"; 10/10"),
        vec!["usb-c", "cable", "isn't", "bad", "10", "10"]
    );
}

#[test]
fn test_result_json_shape() {
    let result = SentimentAnalyzer::new().analyze("good");
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["sentiment"], "positive");
    assert_eq!(json["comparative"], serde_json::json!(3.0));
    assert!(json["positive"].is_array());
    assert!(json["confidence"].is_number());
}
