//! Density-based clustering of document embeddings.

use std::collections::HashMap;

use linfa::traits::Transformer;
use linfa_clustering::Dbscan;
use ndarray::Array2;
use tracing::debug;

use crate::error::BackendError;

/// Label assigned to documents that belong to no cluster.
pub const OUTLIER: i32 = -1;

const MIN_RADIUS: f64 = 1e-6;
const SPREAD_FRACTION: f64 = 0.5;

/// Minimum cluster size for a corpus: a tenth of the documents, at least two.
pub fn min_cluster_size(corpus_size: usize) -> usize {
    (corpus_size / 10).max(2)
}

/// Cluster embeddings with DBSCAN, choosing the neighbourhood radius from the data.
///
/// Returns one label per embedding. Clusters smaller than `min_size` are folded
/// into [`OUTLIER`], and the survivors are numbered from 0 by descending size.
pub fn density_cluster(embeddings: &[Vec<f32>], min_size: usize) -> Result<Vec<i32>, BackendError> {
    let rows = embeddings.len();
    if rows == 0 {
        return Ok(Vec::new());
    }
    let dims = embeddings[0].len();
    if dims == 0 || embeddings.iter().any(|e| e.len() != dims) {
        return Err(BackendError::Clustering(
            "embeddings must be non-empty and share one width".into(),
        ));
    }
    let min_size = min_size.max(2);

    let flat: Vec<f64> = embeddings
        .iter()
        .flat_map(|e| e.iter().map(|v| f64::from(*v)))
        .collect();
    let observations = Array2::from_shape_vec((rows, dims), flat)
        .map_err(|e| BackendError::Clustering(e.to_string()))?;

    let radius = neighbourhood_radius(embeddings, min_size);
    debug!(rows, dims, min_size, radius, "running dbscan");

    let memberships = Dbscan::params(min_size)
        .tolerance(radius)
        .transform(&observations)
        .map_err(|e| BackendError::Clustering(e.to_string()))?;

    let raw: Vec<Option<usize>> = memberships.iter().copied().collect();
    Ok(relabel_by_size(&raw, min_size))
}

/// Neighbourhood radius: the median distance from each point to its `k`-th
/// nearest neighbour, capped at half the median pairwise distance.
///
/// Points that sit no closer to each other than to the rest of the corpus
/// end up as outliers.
fn neighbourhood_radius(embeddings: &[Vec<f32>], k: usize) -> f64 {
    let rows = embeddings.len();
    if rows < 2 {
        return MIN_RADIUS;
    }
    let mut pairwise = vec![vec![0.0f64; rows]; rows];
    for i in 0..rows {
        for j in (i + 1)..rows {
            let d = euclidean(&embeddings[i], &embeddings[j]);
            pairwise[i][j] = d;
            pairwise[j][i] = d;
        }
    }

    let mut kth: Vec<f64> = pairwise
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut distances: Vec<f64> = row
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, d)| *d)
                .collect();
            distances.sort_by(f64::total_cmp);
            distances[(k - 1).min(distances.len() - 1)]
        })
        .collect();
    let mut spread: Vec<f64> = (0..rows)
        .flat_map(|i| ((i + 1)..rows).map(move |j| (i, j)))
        .map(|(i, j)| pairwise[i][j])
        .collect();

    let radius = median(&mut kth).min(SPREAD_FRACTION * median(&mut spread));
    radius.max(MIN_RADIUS)
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    values[values.len() / 2]
}

fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Renumber raw cluster ids by descending size, dropping undersized clusters.
pub fn relabel_by_size(raw: &[Option<usize>], min_size: usize) -> Vec<i32> {
    let mut sizes: HashMap<usize, usize> = HashMap::new();
    for id in raw.iter().flatten() {
        *sizes.entry(*id).or_insert(0) += 1;
    }
    let mut kept: Vec<(usize, usize)> = sizes
        .into_iter()
        .filter(|(_, size)| *size >= min_size)
        .collect();
    // ties broken by original id so numbering is deterministic
    kept.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let mapping: HashMap<usize, i32> = kept
        .iter()
        .enumerate()
        .map(|(new_id, (old_id, _))| (*old_id, new_id as i32))
        .collect();

    raw.iter()
        .map(|id| {
            id.and_then(|id| mapping.get(&id).copied())
                .unwrap_or(OUTLIER)
        })
        .collect()
}
