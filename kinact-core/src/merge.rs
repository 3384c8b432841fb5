//! Merging curated evidence into a prediction matrix.

use std::collections::{HashMap, HashSet};

use crate::matrix::{AdjacencyMatrix, MatrixBuilder};

/// Overlays curated evidence on a prediction matrix.
///
/// The result keeps the prediction rows, in order, and no others. Columns
/// are the prediction columns followed by every curated column whose label
/// is not already present; curated columns without a label are always
/// appended as columns of their own.
///
/// On rows shared by both matrices each defined, non-zero curated cell
/// overrides the prediction: -1 stays -1, any other value becomes +1.
/// Curated zeros count as missing evidence. When several curated columns
/// share a label, a -1 from any of them takes precedence over +1.
///
/// # Examples
///
/// ```rust
/// use kinact_core::matrix::{EnzymeColumn, MatrixBuilder};
/// use kinact_core::merge::merge;
///
/// let mut predicted = MatrixBuilder::new();
/// let row = predicted.add_row("B_T10");
/// let col = predicted.add_column(EnzymeColumn::labelled("K1"));
/// predicted.set(row, col, 1.0);
///
/// let mut curated = MatrixBuilder::new();
/// let row = curated.add_row("B_T10");
/// let col = curated.add_column(EnzymeColumn::labelled("P1"));
/// curated.set(row, col, -1.0);
///
/// let merged = merge(&predicted.build(), &curated.build());
/// assert_eq!(merged.get("B_T10", "K1"), Some(1.0));
/// assert_eq!(merged.get("B_T10", "P1"), Some(-1.0));
/// ```
#[must_use]
pub fn merge(prediction: &AdjacencyMatrix, curated: &AdjacencyMatrix) -> AdjacencyMatrix {
    let mut builder = MatrixBuilder::from(prediction.clone());

    let mut label_position: HashMap<&str, usize> = HashMap::new();
    for (position, column) in prediction.columns().iter().enumerate() {
        if let Some(label) = column.label.as_deref() {
            label_position.entry(label).or_insert(position);
        }
    }

    let mut target_column = Vec::with_capacity(curated.n_columns());
    let mut appended = 0usize;
    for column in curated.columns() {
        let existing = column
            .label
            .as_deref()
            .and_then(|label| label_position.get(label).copied());
        let position = existing.unwrap_or_else(|| {
            appended += 1;
            let position = builder.add_column(column.clone());
            if let Some(label) = column.label.as_deref() {
                label_position.insert(label, position);
            }
            position
        });
        target_column.push(position);
    }

    let mut overrides = 0usize;
    let mut shared_rows = 0usize;
    let mut dephosphorylated: HashSet<(usize, usize)> = HashSet::new();
    for (curated_row, site) in curated.rows().iter().enumerate() {
        let Some(row) = prediction.row_position(site) else {
            continue;
        };
        shared_rows += 1;
        for (curated_column, value) in curated.row_values(curated_row) {
            if value == 0.0 {
                continue;
            }
            let column = target_column[curated_column];
            if value == -1.0 {
                dephosphorylated.insert((row, column));
                builder.set(row, column, -1.0);
            } else if !dephosphorylated.contains(&(row, column)) {
                builder.set(row, column, 1.0);
            }
            overrides += 1;
        }
    }

    let merged = builder.build();
    tracing::info!(
        shared_rows,
        appended_columns = appended,
        overrides,
        sites = merged.n_rows(),
        enzymes = merged.n_columns(),
        "merged curated evidence into prediction matrix"
    );
    merged
}
