//! Dense similarity matrix -> sparse edge list.

use crate::errors::{AlignError, Result};
use crate::graph::AlignmentEdge;
use crate::types::FrameId;

/// Convert a dense matrix into `(rows[i], cols[j], m[i][j])` for every
/// positive entry, in row-major order.
///
/// Non-positive and NaN entries mean "no relation" and are dropped. Entries
/// above 1 are clamped to 1.
pub fn matrix_to_edges(
    matrix: &[Vec<f64>],
    rows: &[FrameId],
    cols: &[FrameId],
) -> Result<Vec<AlignmentEdge>> {
    if matrix.len() != rows.len() {
        return Err(AlignError::MalformedDataset(format!(
            "matrix has {} rows but inventory 0 has {} ids",
            matrix.len(),
            rows.len()
        )));
    }

    let mut edges = Vec::new();
    let mut clamped = 0usize;

    for (i, row) in matrix.iter().enumerate() {
        if row.len() != cols.len() {
            return Err(AlignError::MalformedDataset(format!(
                "matrix row {} has {} columns but inventory 1 has {} ids",
                i,
                row.len(),
                cols.len()
            )));
        }
        for (j, &value) in row.iter().enumerate() {
            if value > 0.0 {
                if value > 1.0 {
                    clamped += 1;
                }
                edges.push(AlignmentEdge::new(
                    rows[i].clone(),
                    cols[j].clone(),
                    value.min(1.0),
                ));
            }
        }
    }

    if clamped > 0 {
        tracing::warn!(clamped, "matrix scores above 1 clamped to 1");
    }

    Ok(edges)
}
