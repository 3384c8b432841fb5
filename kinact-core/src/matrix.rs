//! Sparse signed adjacency matrices.
//!
//! Rows are phospho-site identifiers, columns are enzymes. A cell is either
//! defined (a signed value) or undefined (no evidence). Matrices are values:
//! they are assembled through [`MatrixBuilder`] and never mutated afterwards.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::constants::UNDEFINED_LABEL;

/// Column of an adjacency matrix.
///
/// `label` is the canonical enzyme name used for lookups and merging; it is
/// `None` when the origin identifier could not be translated. `origin` is the
/// identifier the column was built from and keeps unlabeled columns apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnzymeColumn {
    /// Canonical enzyme name, if known
    pub label: Option<String>,
    /// Identifier the column was created from
    pub origin: String,
}

impl EnzymeColumn {
    #[must_use]
    pub fn new(label: Option<String>, origin: impl Into<String>) -> Self {
        Self {
            label,
            origin: origin.into(),
        }
    }

    /// Column whose label and origin are the same identifier.
    #[must_use]
    pub fn labelled(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: Some(name.clone()),
            origin: name,
        }
    }

    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }

    /// Label for display, `NA` when undefined
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(UNDEFINED_LABEL)
    }
}

impl fmt::Display for EnzymeColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_label())
    }
}

/// Signed site × enzyme evidence table.
///
/// Positive values denote kinase activity on the site, negative values
/// phosphatase activity. Row identifiers are unique; column labels may
/// collide, in which case label-based lookups resolve to the first column.
///
/// # Examples
///
/// ```rust
/// use kinact_core::matrix::{EnzymeColumn, MatrixBuilder};
///
/// let mut builder = MatrixBuilder::new();
/// let row = builder.add_row("P06239_S59");
/// let col = builder.add_column(EnzymeColumn::labelled("LCK"));
/// builder.set(row, col, 1.0);
/// let matrix = builder.build();
///
/// assert_eq!(matrix.get("P06239_S59", "LCK"), Some(1.0));
/// assert_eq!(matrix.defined_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyMatrix {
    rows: Vec<String>,
    row_index: HashMap<String, usize>,
    columns: Vec<EnzymeColumn>,
    cells: BTreeMap<(usize, usize), f64>,
}

impl AdjacencyMatrix {
    /// Site identifiers in row order.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Enzyme columns in column order.
    #[must_use]
    pub fn columns(&self) -> &[EnzymeColumn] {
        &self.columns
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    /// Number of defined cells.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn row_position(&self, site: &str) -> Option<usize> {
        self.row_index.get(site).copied()
    }

    #[must_use]
    pub fn contains_row(&self, site: &str) -> bool {
        self.row_index.contains_key(site)
    }

    /// Position of the first column carrying `label`.
    #[must_use]
    pub fn column_position(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.has_label(label))
    }

    /// Value at a row/column position, `None` when undefined or out of range.
    #[must_use]
    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(&(row, column)).copied()
    }

    /// Value for a site and column label.
    #[must_use]
    pub fn get(&self, site: &str, label: &str) -> Option<f64> {
        let row = self.row_position(site)?;
        let column = self.column_position(label)?;
        self.value(row, column)
    }

    /// Defined cells in row-major order with their site and column.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &EnzymeColumn, f64)> + '_ {
        self.cells
            .iter()
            .map(|(&(r, c), &v)| (self.rows[r].as_str(), &self.columns[c], v))
    }

    /// Defined cells of one row as `(column position, value)`.
    pub fn row_values(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.cells
            .range((row, 0)..(row + 1, 0))
            .map(|(&(_, c), &v)| (c, v))
    }
}

/// Incremental constructor for [`AdjacencyMatrix`].
#[derive(Debug, Default)]
pub struct MatrixBuilder {
    rows: Vec<String>,
    row_index: HashMap<String, usize>,
    columns: Vec<EnzymeColumn>,
    cells: BTreeMap<(usize, usize), f64>,
}

impl MatrixBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a row if absent and returns its position.
    pub fn add_row(&mut self, site: &str) -> usize {
        if let Some(&position) = self.row_index.get(site) {
            return position;
        }
        let position = self.rows.len();
        self.rows.push(site.to_string());
        self.row_index.insert(site.to_string(), position);
        position
    }

    /// Appends a column and returns its position.
    ///
    /// Columns are never deduplicated here; two columns with the same label
    /// stay separate.
    pub fn add_column(&mut self, column: EnzymeColumn) -> usize {
        self.columns.push(column);
        self.columns.len() - 1
    }

    /// Defines a cell, overwriting any earlier value.
    pub fn set(&mut self, row: usize, column: usize, value: f64) {
        debug_assert!(row < self.rows.len() && column < self.columns.len());
        self.cells.insert((row, column), value);
    }

    #[must_use]
    pub fn build(self) -> AdjacencyMatrix {
        AdjacencyMatrix {
            rows: self.rows,
            row_index: self.row_index,
            columns: self.columns,
            cells: self.cells,
        }
    }
}

impl From<AdjacencyMatrix> for MatrixBuilder {
    fn from(matrix: AdjacencyMatrix) -> Self {
        Self {
            rows: matrix.rows,
            row_index: matrix.row_index,
            columns: matrix.columns,
            cells: matrix.cells,
        }
    }
}
