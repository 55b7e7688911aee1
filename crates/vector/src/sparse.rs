use std::cmp::Ordering;

/// Sparse vector over vocabulary dimensions
///
/// Entries are kept sorted by dimension with no duplicates and no zero weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Build from `(dimension, weight)` pairs
    ///
    /// Pairs are sorted, weights for a repeated dimension are summed, and
    /// zero weights are dropped.
    pub fn from_pairs(mut pairs: Vec<(u32, f32)>) -> Self {
        pairs.sort_by_key(|&(dim, _)| dim);

        let mut entries: Vec<(u32, f32)> = Vec::with_capacity(pairs.len());
        for (dim, weight) in pairs {
            match entries.last_mut() {
                Some((last_dim, last_weight)) if *last_dim == dim => *last_weight += weight,
                _ => entries.push((dim, weight)),
            }
        }
        entries.retain(|&(_, weight)| weight != 0.0);

        Self { entries }
    }

    /// Non-zero entries in ascending dimension order
    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    /// Number of non-zero dimensions
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at a dimension (zero when absent)
    pub fn get(&self, dim: u32) -> f32 {
        self.entries
            .binary_search_by_key(&dim, |&(d, _)| d)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Euclidean norm
    pub fn norm(&self) -> f32 {
        self.entries
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f32>()
            .sqrt()
    }

    /// Scale to unit length in place; zero vectors stay zero
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
    }

    /// Dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (da, wa) = self.entries[i];
            let (db, wb) = other.entries[j];
            match da.cmp(&db) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }
}

/// Cosine similarity between two sparse vectors
///
/// Returns 0.0 when either vector is zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let norm = a.norm() * b.norm();
    if norm == 0.0 {
        return 0.0;
    }
    (a.dot(b) / norm).clamp(-1.0, 1.0)
}

/// Cosine distance (`1 - cosine similarity`)
pub fn cosine_distance(a: &SparseVector, b: &SparseVector) -> f32 {
    1.0 - cosine_similarity(a, b)
}
