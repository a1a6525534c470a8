//! Stacking per-bookmark vectors into one sparse co-occurrence matrix.

use crate::collections::{FeatureSpace, SparseVector};
use crate::graph::NodeId;

/// One stored cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Bookmark the row belongs to.
    pub row: NodeId,
    /// Column from the matrix's [`FeatureSpace`].
    pub column: usize,
    /// Accumulated weight.
    pub value: f64,
}

/// Sparse matrix in coordinate form, cells sorted by `(row, column)`.
///
/// Rows are bookmarks; columns follow a [`FeatureSpace`], nodes first, then predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct CooccurrenceMatrix {
    space: FeatureSpace,
    cells: Vec<Cell>,
}

impl CooccurrenceMatrix {
    /// Builds the matrix from per-bookmark vectors.
    ///
    /// Features outside `space` are dropped. Vectors sharing a bookmark are summed.
    pub fn from_vectors<'v>(
        space: FeatureSpace,
        vectors: impl IntoIterator<Item = &'v SparseVector>,
    ) -> Self {
        let mut cells: Vec<Cell> = vectors
            .into_iter()
            .flat_map(|v| {
                let row = v.bookmark();
                v.iter().filter_map(move |(feature, value)| {
                    space.index(feature).map(|column| Cell { row, column, value })
                })
            })
            .collect();
        cells.sort_unstable_by_key(|c| (c.row, c.column));
        cells.dedup_by(|next, kept| {
            if next.row == kept.row && next.column == kept.column {
                kept.value += next.value;
                true
            } else {
                false
            }
        });
        Self { space, cells }
    }

    /// Column layout.
    #[inline]
    pub fn space(&self) -> FeatureSpace {
        self.space
    }

    /// Number of columns.
    #[inline]
    pub fn feature_count(&self) -> usize {
        self.space.dimension()
    }

    /// Number of stored cells.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.cells.len()
    }

    /// All cells in `(row, column)` order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Value at `(row, column)`, `0.0` if not stored.
    pub fn get(&self, row: NodeId, column: usize) -> f64 {
        self.cells
            .binary_search_by_key(&(row, column), |c| (c.row, c.column))
            .map_or(0.0, |i| self.cells[i].value)
    }

    /// Cells of one row.
    pub fn row(&self, row: NodeId) -> &[Cell] {
        let start = self.cells.partition_point(|c| c.row < row);
        let end = self.cells.partition_point(|c| c.row <= row);
        &self.cells[start..end]
    }

    /// Distinct rows, ascending.
    pub fn rows(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut last = None;
        self.cells.iter().filter_map(move |c| {
            if last == Some(c.row) {
                None
            } else {
                last = Some(c.row);
                Some(c.row)
            }
        })
    }

    /// Largest stored value, `0.0` for an empty matrix. GloVe-style optimizers use it
    /// as the weighting cutoff `x_max`.
    pub fn max_value(&self) -> f64 {
        self.cells.iter().map(|c| c.value).fold(0.0, f64::max)
    }
}
