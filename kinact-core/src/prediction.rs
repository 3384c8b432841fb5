//! Prediction-tool scores to signed adjacency matrices.

use std::collections::{BTreeMap, BTreeSet};

use crate::constants::DEFAULT_SCORE_CUTOFF;
use crate::matrix::{AdjacencyMatrix, EnzymeColumn, MatrixBuilder};
use crate::types::{EnzymeClass, KinactError, PredictionRecord};

/// How repeated predictions for the same site and enzyme are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The record appearing last wins
    #[default]
    LastSeen,
    /// The highest score wins
    MaxScore,
}

impl DuplicatePolicy {
    fn combine(self, previous: f64, incoming: f64) -> f64 {
        match self {
            Self::LastSeen => incoming,
            Self::MaxScore => previous.max(incoming),
        }
    }
}

/// Builds signed matrices from prediction records.
///
/// Scores at or below `cutoff` are discarded. Surviving scores become 1
/// when `binarize` is set; otherwise every row is scaled by its own maximum
/// surviving score. Phosphatase columns are negated last.
///
/// # Examples
///
/// ```rust
/// use kinact_core::prediction::PredictionMatrixBuilder;
/// use kinact_core::types::{EnzymeClass, PredictionRecord};
///
/// let records = vec![
///     PredictionRecord {
///         substrate: "P06239".to_string(),
///         position: "S59".to_string(),
///         enzyme: "MAPK1".to_string(),
///         class: EnzymeClass::Kinase,
///         score: 0.8,
///     },
///     PredictionRecord {
///         substrate: "P06239".to_string(),
///         position: "S59".to_string(),
///         enzyme: "PTPN6".to_string(),
///         class: EnzymeClass::Phosphatase,
///         score: 0.6,
///     },
/// ];
///
/// let matrix = PredictionMatrixBuilder::default().build(&records)?;
/// assert_eq!(matrix.get("P06239_S59", "MAPK1"), Some(1.0));
/// assert_eq!(matrix.get("P06239_S59", "PTPN6"), Some(-1.0));
/// # Ok::<(), kinact_core::types::KinactError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionMatrixBuilder {
    /// Scores must exceed this value to be kept
    pub cutoff: f64,
    /// Replace surviving scores by 1 instead of row-normalizing them
    pub binarize: bool,
    /// Resolution of repeated site/enzyme pairs
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for PredictionMatrixBuilder {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_SCORE_CUTOFF,
            binarize: true,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl PredictionMatrixBuilder {
    #[must_use]
    pub fn new(cutoff: f64, binarize: bool) -> Self {
        Self {
            cutoff,
            binarize,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Builds the prediction matrix.
    ///
    /// Records of classes other than kinase or phosphatase are dropped.
    /// Every remaining site and enzyme keeps its row and column even when
    /// all of its scores fall below the cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::InvalidCutoff`] if the cutoff is negative or
    /// not finite.
    pub fn build(&self, records: &[PredictionRecord]) -> Result<AdjacencyMatrix, KinactError> {
        if !self.cutoff.is_finite() || self.cutoff < 0.0 {
            return Err(KinactError::InvalidCutoff(self.cutoff));
        }

        let relevant: Vec<&PredictionRecord> = records
            .iter()
            .filter(|r| matches!(r.class, EnzymeClass::Kinase | EnzymeClass::Phosphatase))
            .collect();
        let dropped = records.len() - relevant.len();

        let site_ids: Vec<String> = relevant.iter().map(|r| r.site_id()).collect();
        let sites: BTreeSet<&str> = site_ids.iter().map(String::as_str).collect();
        let enzymes: BTreeSet<&str> = relevant.iter().map(|r| r.enzyme.as_str()).collect();

        let mut builder = MatrixBuilder::new();
        for site in &sites {
            builder.add_row(site);
        }
        let mut column_of: BTreeMap<&str, usize> = BTreeMap::new();
        for enzyme in &enzymes {
            column_of.insert(*enzyme, builder.add_column(EnzymeColumn::labelled(*enzyme)));
        }

        // an enzyme reported with a phosphatase domain anywhere is negated
        let mut column_sign = vec![1.0; enzymes.len()];
        for record in &relevant {
            let sign = &mut column_sign[column_of[record.enzyme.as_str()]];
            *sign = f64::min(*sign, record.class.sign());
        }
        let phosphatases = column_sign.iter().filter(|&&s| s < 0.0).count();

        let mut raw: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (record, site) in relevant.iter().zip(&site_ids) {
            let key = (builder.add_row(site), column_of[record.enzyme.as_str()]);
            raw.entry(key)
                .and_modify(|score| *score = self.duplicate_policy.combine(*score, record.score))
                .or_insert(record.score);
        }

        let mut surviving: BTreeMap<usize, Vec<(usize, f64)>> = BTreeMap::new();
        for (&(row, column), &score) in &raw {
            if score > self.cutoff {
                surviving.entry(row).or_default().push((column, score));
            }
        }

        for (row, cells) in surviving {
            let row_max = cells
                .iter()
                .map(|&(_, score)| score)
                .fold(f64::NEG_INFINITY, f64::max);
            for (column, score) in cells {
                let magnitude = if self.binarize { 1.0 } else { score / row_max };
                builder.set(row, column, column_sign[column] * magnitude);
            }
        }
        let matrix = builder.build();

        tracing::debug!(
            dropped,
            cutoff = self.cutoff,
            binarize = self.binarize,
            policy = ?self.duplicate_policy,
            "filtered prediction records"
        );
        tracing::info!(
            sites = matrix.n_rows(),
            enzymes = matrix.n_columns(),
            phosphatases,
            interactions = matrix.defined_count(),
            "built prediction adjacency matrix"
        );
        Ok(matrix)
    }
}
