// Scoring abstraction for sentiment backends.

/// Assigns a signed sentiment score to a piece of text.
///
/// Implementations must be pure: the same text always yields the same
/// score, with no I/O at scoring time. Positive values lean positive,
/// negative values lean negative, zero is neutral or unknown.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> f64;
}
