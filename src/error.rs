// Typed errors for the clustering and sentiment core.
//
// The pipeline layer wraps these in anyhow for user-facing messages; the
// core itself never logs or retries, it fails precisely and lets the caller
// decide what to tell the user.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// Corpus is empty or degenerates to nothing after stop-word removal.
    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },

    /// Requested reduction target is invalid for the matrix shape.
    #[error(
        "invalid reduction target: {requested} component(s) for {documents} document(s) x \
         {terms} term(s); valid range is [1, {max_valid}]"
    )]
    Dimensionality {
        requested: usize,
        documents: usize,
        terms: usize,
        max_valid: usize,
    },

    /// Cluster count incompatible with the document count.
    #[error("invalid cluster count: {requested} cluster(s) for {documents} document(s)")]
    InvalidClusterCount { requested: usize, documents: usize },

    /// Intermediate artifacts disagree, e.g. a label with no descriptor entry.
    #[error("inconsistent artifacts: {detail}")]
    DataConsistency { detail: String },
}

impl AnalysisError {
    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    pub fn dimensionality(requested: usize, documents: usize, terms: usize) -> Self {
        Self::Dimensionality {
            requested,
            documents,
            terms,
            max_valid: documents.min(terms).saturating_sub(1),
        }
    }

    pub fn invalid_cluster_count(requested: usize, documents: usize) -> Self {
        Self::InvalidClusterCount {
            requested,
            documents,
        }
    }

    pub fn data_consistency(detail: impl Into<String>) -> Self {
        Self::DataConsistency {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionality_reports_valid_range() {
        let err = AnalysisError::dimensionality(100, 5, 40);
        assert!(matches!(
            err,
            AnalysisError::Dimensionality { max_valid: 4, .. }
        ));
        let msg = err.to_string();
        assert!(msg.contains("100"), "message should name the request: {msg}");
        assert!(msg.contains("[1, 4]"), "message should name the range: {msg}");
    }

    #[test]
    fn test_messages_name_the_counts() {
        let err = AnalysisError::invalid_cluster_count(7, 3);
        let msg = err.to_string();
        assert!(msg.contains('7') && msg.contains('3'), "got: {msg}");
    }
}
