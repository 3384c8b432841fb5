use std::path::Path;

use crate::config::KinactConfig;
use crate::curated::{CuratedMatrixBuilder, SourceSelection};
use crate::io::{read_interaction_records, read_prediction_records};
use crate::matrix::AdjacencyMatrix;
use crate::merge::merge;
use crate::prediction::PredictionMatrixBuilder;
use crate::translator::IdentifierTable;
use crate::types::{InteractionRecord, KinactError, PredictionRecord};

/// High-level entry point tying the builders and the merge together.
///
/// The analyzer owns the identifier table and a [`KinactConfig`]; every
/// matrix it produces follows that configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use kinact_core::KinactAnalyzer;
/// use kinact_core::config::KinactConfig;
/// use kinact_core::translator::IdentifierTable;
///
/// let table = IdentifierTable::from_csv("identifiers.tsv")?;
/// let analyzer = KinactAnalyzer::new(KinactConfig::default(), table)?;
///
/// let matrix = analyzer.networkin_matrix_from_files(
///     "networkin_results.tsv",
///     Some("ptm_interactions.tsv"),
/// )?;
/// println!("{} sites x {} enzymes", matrix.n_rows(), matrix.n_columns());
/// # Ok::<(), kinact_core::types::KinactError>(())
/// ```
#[derive(Debug)]
pub struct KinactAnalyzer {
    /// Settings applied to every matrix built by this analyzer
    pub config: KinactConfig,
    table: IdentifierTable,
}

impl KinactAnalyzer {
    /// Creates an analyzer.
    ///
    /// When `config.num_threads` is set, the global Rayon pool is sized
    /// accordingly. The global pool can only be configured once per process.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::ThreadPool`] if the pool cannot be configured
    /// and [`KinactError::UnsupportedSource`] if the configured sources are
    /// not recognized.
    pub fn new(config: KinactConfig, table: IdentifierTable) -> Result<Self, KinactError> {
        config.sources.validate()?;

        if let Some(num_threads) = config.num_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
                .map_err(|e| {
                    KinactError::ThreadPool(format!("Failed to configure thread pool: {e}"))
                })?;
        }

        Ok(Self { config, table })
    }

    fn prediction_builder(&self) -> PredictionMatrixBuilder {
        PredictionMatrixBuilder::new(self.config.score_cutoff, self.config.binarize)
            .with_duplicate_policy(self.config.duplicate_policy)
    }

    /// Curated matrix restricted to the configured sources.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::UnsupportedSource`] for unrecognized sources.
    pub fn curated_matrix(
        &self,
        records: &[InteractionRecord],
    ) -> Result<AdjacencyMatrix, KinactError> {
        CuratedMatrixBuilder::new(&self.table).build(records, &self.config.sources)
    }

    /// Prediction matrix with the configured cutoff, scaling and duplicate
    /// policy. Curated evidence is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::InvalidCutoff`] for an unusable cutoff.
    pub fn prediction_matrix(
        &self,
        predictions: &[PredictionRecord],
    ) -> Result<AdjacencyMatrix, KinactError> {
        self.prediction_builder().build(predictions)
    }

    /// Prediction matrix with curated evidence merged in.
    ///
    /// When `add_curated` is disabled this is the bare prediction matrix.
    /// Otherwise the curated matrix is built from every recognized source,
    /// regardless of `config.sources`, concurrently with the prediction
    /// matrix, and overlaid on it.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::InvalidCutoff`] for an unusable cutoff.
    pub fn networkin_matrix(
        &self,
        predictions: &[PredictionRecord],
        curated_records: &[InteractionRecord],
    ) -> Result<AdjacencyMatrix, KinactError> {
        if !self.config.add_curated {
            return self.prediction_matrix(predictions);
        }

        let (prediction, curated) = rayon::join(
            || self.prediction_matrix(predictions),
            || {
                CuratedMatrixBuilder::new(&self.table)
                    .build(curated_records, &SourceSelection::All)
            },
        );
        Ok(merge(&prediction?, &curated?))
    }

    /// Reads a curated export and builds its matrix.
    ///
    /// # Errors
    ///
    /// Propagates read errors and those of [`Self::curated_matrix`].
    pub fn curated_matrix_from_file<P: AsRef<Path>>(
        &self,
        interactions: P,
    ) -> Result<AdjacencyMatrix, KinactError> {
        let records = read_interaction_records(interactions)?;
        self.curated_matrix(&records)
    }

    /// Reads a NetworKIN result file, and optionally a curated export, and
    /// builds the merged matrix.
    ///
    /// Without a curated file no curated evidence is merged, whatever
    /// `add_curated` says.
    ///
    /// # Errors
    ///
    /// Propagates read errors and those of [`Self::networkin_matrix`].
    pub fn networkin_matrix_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        predictions: P,
        interactions: Option<Q>,
    ) -> Result<AdjacencyMatrix, KinactError> {
        let predictions = read_prediction_records(predictions)?;
        match interactions {
            Some(path) if self.config.add_curated => {
                let curated = read_interaction_records(path)?;
                self.networkin_matrix(&predictions, &curated)
            }
            _ => self.prediction_matrix(&predictions),
        }
    }
}
