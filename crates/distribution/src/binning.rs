//! Equal-Width Bin Edges

use serde::Serialize;

/// Number of bins used for continuous attributes
pub const DEFAULT_BIN_COUNT: usize = 50;

/// Monotonic bin edges
///
/// Bins are half-open `[edge[i], edge[i + 1])` except the last one, which
/// also includes its right edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Equal-width edges spanning the min/max of `values`
    ///
    /// No values spans `[0, 1]`; a single distinct value `v` spans
    /// `[v - 0.5, v + 0.5]`.
    pub fn equal_width(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let (low, high) = if values.is_empty() {
            (0.0, 1.0)
        } else if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let width = (high - low) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| low + width * i as f64).collect();
        edges[bins] = high;

        Self { edges }
    }

    /// Use caller-supplied edges; needs at least two increasing edges
    pub fn from_edges(edges: Vec<f64>) -> Option<Self> {
        let increasing = edges.windows(2).all(|w| w[0] < w[1]);
        (edges.len() >= 2 && increasing).then_some(Self { edges })
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn lower(&self) -> f64 {
        self.edges[0]
    }

    pub fn upper(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Bin holding `value`, or `None` outside the edges
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if !(value >= self.lower() && value <= self.upper()) {
            return None;
        }
        let index = self.edges.partition_point(|e| *e <= value) - 1;
        Some(index.min(self.bin_count() - 1))
    }

    /// Count values per bin
    pub fn count<I>(&self, values: I) -> Vec<u64>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut counts = vec![0u64; self.bin_count()];
        for value in values {
            if let Some(index) = self.bin_index(value) {
                counts[index] += 1;
            }
        }
        counts
    }
}
