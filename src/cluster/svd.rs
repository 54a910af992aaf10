// Truncated SVD (latent semantic analysis) over the TF-IDF matrix.
//
// Power iteration with deflation recovers the top-K right singular vectors
// of the document-term matrix X. Every matrix product runs through the
// sparse rows as X^T (X v), so the n_terms x n_terms Gram matrix is never
// materialized. Initialization draws from the fixed Lcg, which makes the
// factorization (component signs included) reproducible for a given seed.

use tracing::debug;

use crate::cluster::rng::Lcg;
use crate::cluster::vectorizer::CorpusVectors;
use crate::error::AnalysisError;

/// Iteration cap per component; convergence usually lands far earlier.
const POWER_MAX_ITER: usize = 100;
/// Relative eigenvalue change below which a component counts as converged.
const POWER_TOL: f64 = 1e-10;

/// Truncated SVD configuration.
pub struct TruncatedSvd {
    pub n_components: usize,
    pub seed: u64,
}

/// Frozen projection operator: the retained right singular directions, one
/// row per component, each of vocabulary length and unit norm.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    components: Vec<Vec<f64>>,
    singular_values: Vec<f64>,
}

impl Projection {
    pub fn new(components: Vec<Vec<f64>>, singular_values: Vec<f64>) -> Self {
        Self {
            components,
            singular_values,
        }
    }

    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    pub fn n_terms(&self) -> usize {
        self.components.first().map_or(0, Vec::len)
    }

    pub fn singular_values(&self) -> &[f64] {
        &self.singular_values
    }

    /// Map a point in component space back into vocabulary-weight space.
    pub fn inverse_transform(&self, point: &[f64]) -> Vec<f64> {
        let mut weights = vec![0.0; self.n_terms()];
        for (coord, component) in point.iter().zip(&self.components) {
            for (w, &c) in weights.iter_mut().zip(component) {
                *w += coord * c;
            }
        }
        weights
    }
}

/// Largest reduction target the data shape admits is min(docs, terms) - 1;
/// callers pass their configured target through this before fitting.
pub fn clamp_components(requested: usize, n_docs: usize, n_terms: usize) -> usize {
    requested.min(n_docs.min(n_terms).saturating_sub(1))
}

impl TruncatedSvd {
    pub fn new(n_components: usize, seed: u64) -> Self {
        Self { n_components, seed }
    }

    /// Fit the factorization and project every document row.
    ///
    /// Returns the dense reduced matrix (one row per document, rescaled to
    /// unit norm; an all-zero projection stays zero) and the reusable
    /// projection operator.
    pub fn fit_transform(
        &self,
        corpus: &CorpusVectors,
    ) -> Result<(Vec<Vec<f64>>, Projection), AnalysisError> {
        let n_docs = corpus.n_docs();
        let n_terms = corpus.n_terms();
        let max_valid = n_docs.min(n_terms).saturating_sub(1);
        if self.n_components == 0 || self.n_components > max_valid {
            return Err(AnalysisError::dimensionality(
                self.n_components,
                n_docs,
                n_terms,
            ));
        }

        let mut components: Vec<Vec<f64>> = Vec::with_capacity(self.n_components);
        let mut singular_values = Vec::with_capacity(self.n_components);
        let mut rng = Lcg::new(self.seed);

        for _ in 0..self.n_components {
            let (component, sigma) = dominant_direction(corpus, &components, &mut rng);
            singular_values.push(sigma);
            components.push(component);
        }

        debug!(
            components = components.len(),
            leading_sigma = singular_values.first().copied().unwrap_or(0.0),
            "Computed truncated factorization"
        );

        let projection = Projection::new(components, singular_values);

        let reduced = corpus
            .rows
            .iter()
            .map(|row| {
                let mut point: Vec<f64> = projection
                    .components
                    .iter()
                    .map(|component| row.dot_dense(component))
                    .collect();
                let norm = point.iter().map(|x| x * x).sum::<f64>().sqrt();
                // Zero-norm guard: a document orthogonal to every retained
                // component keeps its zero vector
                if norm > 0.0 {
                    for x in &mut point {
                        *x /= norm;
                    }
                }
                point
            })
            .collect();

        Ok((reduced, projection))
    }
}

/// The dominant right singular direction of X orthogonal to every component
/// in `found`, plus its singular value.
fn dominant_direction(
    corpus: &CorpusVectors,
    found: &[Vec<f64>],
    rng: &mut Lcg,
) -> (Vec<f64>, f64) {
    let n_terms = corpus.n_terms();
    let mut v = rng.unit_vector(n_terms);
    orthogonalize(&mut v, found);
    if normalize(&mut v) == 0.0 {
        // Degenerate draw inside the found span; restart from a coordinate
        // direction
        v = vec![0.0; n_terms];
        v[found.len() % n_terms] = 1.0;
        orthogonalize(&mut v, found);
        normalize(&mut v);
    }

    let mut eigenvalue = 0.0;
    for _ in 0..POWER_MAX_ITER {
        let mut w = gram_apply(corpus, &v);
        orthogonalize(&mut w, found);
        let lambda = normalize(&mut w);
        if lambda <= f64::EPSILON {
            // Rank exhausted: v lies in the null space beyond the found
            // components, so the direction carries singular value zero
            return (v, 0.0);
        }
        v = w;
        let settled = (lambda - eigenvalue).abs() <= POWER_TOL * lambda.max(1.0);
        eigenvalue = lambda;
        if settled {
            break;
        }
    }
    (v, eigenvalue.sqrt())
}

/// Apply the implicit Gram operator: X^T (X v), two passes over the rows.
fn gram_apply(corpus: &CorpusVectors, v: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; v.len()];
    for row in &corpus.rows {
        let projected = row.dot_dense(v);
        if projected != 0.0 {
            for (&i, &w) in row.indices.iter().zip(&row.weights) {
                out[i] += projected * w;
            }
        }
    }
    out
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Scale to unit norm in place, returning the original norm (0.0 when the
/// vector is numerically zero and left untouched).
fn normalize(v: &mut [f64]) -> f64 {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
        norm
    } else {
        0.0
    }
}

/// Gram-Schmidt: remove the projection of `v` onto each basis vector.
fn orthogonalize(v: &mut [f64], basis: &[Vec<f64>]) {
    for b in basis {
        let proj = dot(v, b);
        if proj != 0.0 {
            for (x, &y) in v.iter_mut().zip(b) {
                *x -= proj * y;
            }
        }
    }
}
