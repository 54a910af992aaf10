// Cluster descriptors: the vocabulary terms that characterize a centroid.
//
// Each centroid lives in component space, so it is mapped back through the
// projection into vocabulary-weight space and the heaviest terms win.

use std::cmp::Ordering;

use crate::cluster::svd::Projection;

/// Top descriptor terms per centroid, heaviest first.
///
/// Equal weights break toward the lower vocabulary index, which keeps the
/// output stable across runs. Asking for more terms than the vocabulary
/// holds returns the whole vocabulary in weight order.
pub fn top_terms(
    centroids: &[Vec<f64>],
    projection: &Projection,
    vocabulary: &[String],
    k_terms: usize,
) -> Vec<Vec<String>> {
    centroids
        .iter()
        .map(|centroid| {
            let weights = projection.inverse_transform(centroid);
            let mut ranked: Vec<(usize, f64)> = weights.into_iter().enumerate().collect();
            ranked.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(Ordering::Equal)
                    .then(a.0.cmp(&b.0))
            });
            ranked
                .into_iter()
                .take(k_terms)
                .map(|(index, _)| vocabulary[index].clone())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> Vec<String> {
        ["ansible", "docker", "grafana", "kubernetes"]
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    /// Identity-like projection so centroid coordinates read directly as
    /// term weights.
    fn identity_projection() -> Projection {
        Projection::new(
            vec![
                vec![1.0, 0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 1.0],
            ],
            vec![1.0; 4],
        )
    }

    #[test]
    fn test_terms_rank_by_descending_weight() {
        let centroids = vec![vec![0.1, 0.9, 0.05, 0.4]];
        let terms = top_terms(&centroids, &identity_projection(), &vocabulary(), 3);
        assert_eq!(terms, vec![vec!["docker", "kubernetes", "ansible"]]);
    }

    #[test]
    fn test_equal_weights_break_toward_lower_index() {
        let centroids = vec![vec![0.5, 0.5, 0.9, 0.5]];
        let terms = top_terms(&centroids, &identity_projection(), &vocabulary(), 4);
        assert_eq!(
            terms,
            vec![vec!["grafana", "ansible", "docker", "kubernetes"]]
        );
    }

    #[test]
    fn test_oversized_request_returns_whole_vocabulary() {
        let centroids = vec![vec![0.0, 0.2, 0.0, 0.1]];
        let terms = top_terms(&centroids, &identity_projection(), &vocabulary(), 50);
        assert_eq!(terms[0].len(), 4);
        assert_eq!(terms[0][0], "docker");
        assert_eq!(terms[0][1], "kubernetes");
    }

    #[test]
    fn test_one_list_per_centroid() {
        let centroids = vec![vec![1.0, 0.0, 0.0, 0.0], vec![0.0, 0.0, 0.0, 1.0]];
        let terms = top_terms(&centroids, &identity_projection(), &vocabulary(), 1);
        assert_eq!(terms, vec![vec!["ansible"], vec!["kubernetes"]]);
    }

    #[test]
    fn test_reranking_is_idempotent() {
        let centroids = vec![vec![0.3, 0.1, 0.7, 0.2]];
        let first = top_terms(&centroids, &identity_projection(), &vocabulary(), 2);
        let second = top_terms(&centroids, &identity_projection(), &vocabulary(), 2);
        assert_eq!(first, second);
    }
}
