//! Flat (brute-force) L2 vector index.
//!
//! Every query scans all stored vectors. Distances are squared Euclidean,
//! the value a flat L2 index reports. The corpus is tens of entries, so no
//! approximate structure is warranted.

use crate::error::SearchError;

/// One hit from a [`FlatL2Index`] search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorHit {
    /// Position of the vector in insertion order.
    pub position: usize,
    /// Squared L2 distance to the query.
    pub distance: f32,
}

impl VectorHit {
    /// Similarity in (0, 1]: `1 / (1 + d)`. Monotonically decreasing in
    /// distance; not a calibrated probability.
    #[must_use]
    pub fn relevance(&self) -> f32 {
        1.0 / (1.0 + self.distance)
    }
}

/// Fixed-dimension vectors stored contiguously in insertion order.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatL2Index {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
        }
    }

    /// Append a vector.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DimensionMismatch`] if `vector` has the wrong length.
    pub fn add(&mut self, vector: &[f32]) -> Result<(), SearchError> {
        self.check_dimension(vector)?;
        self.data.extend_from_slice(vector);
        Ok(())
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `k` nearest stored vectors, closest first. Equal distances keep
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DimensionMismatch`] if `query` has the wrong length.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<VectorHit>, SearchError> {
        self.check_dimension(query)?;
        if k == 0 || self.dimension == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<VectorHit> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(position, stored)| VectorHit {
                position,
                distance: squared_l2(stored, query),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.position.cmp(&b.position))
        });
        hits.truncate(k);
        Ok(hits)
    }

    const fn check_dimension(&self, vector: &[f32]) -> Result<(), SearchError> {
        if vector.len() == self.dimension {
            Ok(())
        } else {
            Err(SearchError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            })
        }
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
