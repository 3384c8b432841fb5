use crate::constants::DEFAULT_SCORE_CUTOFF;
use crate::curated::SourceSelection;
use crate::prediction::DuplicatePolicy;

/// Output format options for adjacency matrices.
///
/// # Examples
///
/// ```rust
/// use kinact_core::config::{KinactConfig, MatrixFormat};
///
/// let config = KinactConfig {
///     output_format: MatrixFormat::Long,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixFormat {
    /// Dense tab-separated table, one row per site and one column per enzyme.
    ///
    /// Undefined cells are left empty and unlabeled enzymes are headed `NA`.
    #[default]
    Tsv,

    /// One `site<TAB>enzyme<TAB>value` line per defined cell.
    ///
    /// Compact for large, sparse matrices.
    Long,
}

/// Configuration settings for adjacency matrix construction.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use kinact_core::config::KinactConfig;
///
/// let config = KinactConfig::default();
/// assert_eq!(config.score_cutoff, 0.5);
/// assert!(config.binarize);
/// ```
///
/// ## Normalized scores without curated evidence
///
/// ```rust
/// use kinact_core::config::KinactConfig;
///
/// let config = KinactConfig {
///     binarize: false,
///     add_curated: false,
///     score_cutoff: 0.3,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct KinactConfig {
    /// Curated databases admitted when building a curated matrix on its own.
    ///
    /// Merging into a prediction matrix always uses every source.
    ///
    /// **Default**: `PhosphoSite`
    pub sources: SourceSelection,

    /// Prediction scores at or below this value are discarded.
    ///
    /// **Default**: `0.5`
    pub score_cutoff: f64,

    /// Replace surviving prediction scores by 1.
    ///
    /// When `false`, each site's scores are divided by its best score.
    ///
    /// **Default**: `true`
    pub binarize: bool,

    /// Resolution of repeated site/enzyme predictions.
    ///
    /// **Default**: [`DuplicatePolicy::LastSeen`]
    pub duplicate_policy: DuplicatePolicy,

    /// Merge curated evidence into prediction matrices.
    ///
    /// **Default**: `true`
    pub add_curated: bool,

    /// Output format for written matrices.
    ///
    /// **Default**: [`MatrixFormat::Tsv`]
    pub output_format: MatrixFormat,

    /// Number of threads used to build curated and predicted matrices.
    ///
    /// When set, configures the global Rayon pool. `None` keeps Rayon's
    /// default of one thread per core.
    ///
    /// **Default**: `None`
    pub num_threads: Option<usize>,
}

impl Default for KinactConfig {
    fn default() -> Self {
        Self {
            sources: SourceSelection::default(),
            score_cutoff: DEFAULT_SCORE_CUTOFF,
            binarize: true,
            duplicate_policy: DuplicatePolicy::LastSeen,
            add_curated: true,
            output_format: MatrixFormat::Tsv,
            num_threads: None,
        }
    }
}
