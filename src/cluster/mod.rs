// Topic clustering: TF-IDF vectorization, truncated SVD, and k-means.

pub mod descriptors;
pub mod kmeans;
pub mod rng;
pub mod svd;
pub mod vectorizer;
