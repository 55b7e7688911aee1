use std::cmp::Ordering;

use crate::sparse::SparseVector;

/// One neighbor returned by [`NeighborIndex::kneighbors`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the document in the corpus
    pub index: usize,

    /// Cosine distance to the query (0.0 = same direction)
    pub distance: f32,
}

/// Exact cosine k-NN index over unit-length document vectors
///
/// Keeps the document vectors in corpus order plus an inverted list per
/// dimension, so a query only touches documents sharing at least one term.
/// Documents sharing no term with the query sit at distance 1.0.
#[derive(Debug, Clone)]
pub struct NeighborIndex {
    vectors: Vec<SparseVector>,
    postings: Vec<Vec<(u32, f32)>>,
}

impl NeighborIndex {
    /// Build over unit-length (or zero) vectors in `dimensions`-wide space
    pub fn fit(vectors: Vec<SparseVector>, dimensions: usize) -> Self {
        let mut postings: Vec<Vec<(u32, f32)>> = vec![Vec::new(); dimensions];

        for (doc, vector) in vectors.iter().enumerate() {
            for &(dim, weight) in vector.entries() {
                postings[dim as usize].push((doc as u32, weight));
            }
        }

        Self { vectors, postings }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Document vector at a corpus position
    pub fn vector(&self, index: usize) -> Option<&SparseVector> {
        self.vectors.get(index)
    }

    /// The `k` nearest documents to a unit-length query, nearest first
    ///
    /// Equal distances are ordered by ascending corpus index. `k` larger
    /// than the corpus returns every document.
    pub fn kneighbors(&self, query: &SparseVector, k: usize) -> Vec<Neighbor> {
        self.kneighbors_pinned(query, k, &[])
    }

    /// Like [`kneighbors`](Self::kneighbors), with `pinned` documents forced to distance 0.0
    ///
    /// Used for documents the caller has matched by other means, such as
    /// term-less texts equal to the query.
    pub fn kneighbors_pinned(
        &self,
        query: &SparseVector,
        k: usize,
        pinned: &[usize],
    ) -> Vec<Neighbor> {
        let k = k.min(self.vectors.len());
        if k == 0 {
            return Vec::new();
        }

        let mut dots = vec![0.0f32; self.vectors.len()];
        for &(dim, q_weight) in query.entries() {
            if let Some(list) = self.postings.get(dim as usize) {
                for &(doc, d_weight) in list {
                    dots[doc as usize] += q_weight * d_weight;
                }
            }
        }
        for &doc in pinned {
            if let Some(dot) = dots.get_mut(doc) {
                *dot = 1.0;
            }
        }

        let mut neighbors: Vec<Neighbor> = dots
            .into_iter()
            .enumerate()
            .map(|(index, dot)| Neighbor {
                index,
                distance: (1.0 - dot).clamp(0.0, 2.0),
            })
            .collect();

        if k < neighbors.len() {
            neighbors.select_nth_unstable_by(k - 1, compare_neighbors);
            neighbors.truncate(k);
        }
        neighbors.sort_by(compare_neighbors);

        neighbors
    }
}

fn compare_neighbors(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.index.cmp(&b.index))
}
