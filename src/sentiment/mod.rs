// Sentiment scoring and per-cluster aggregation.

pub mod aggregate;
pub mod lexicon;
pub mod traits;
