// =============================================================================
// Curated sources
// =============================================================================

/// Databases integrated into the curated PTM export
pub const RECOGNIZED_SOURCES: [&str; 9] = [
    "HPRD",
    "Li2012",
    "MIMP",
    "PhosphoNetworks",
    "PhosphoSite",
    "Signor",
    "dbPTM",
    "phosphoELM",
    "DEPOD",
];

/// Source used when the caller does not select any
pub const DEFAULT_SOURCE: &str = "PhosphoSite";

/// Keyword that selects every recognized source
pub const ALL_SOURCES_KEYWORD: &str = "all";

/// Separator between database labels in the curated export
pub const SOURCE_TAG_SEPARATOR: char = ';';

// =============================================================================
// Prediction tool
// =============================================================================

/// Enzyme class label for kinase domains
pub const KINASE_CLASS: &str = "KIN";

/// Enzyme class label for phosphatase domains
pub const PHOSPHATASE_CLASS: &str = "PTP";

/// Scores at or below this value are discarded by default
pub const DEFAULT_SCORE_CUTOFF: f64 = 0.5;

/// File listing the sites submitted to the prediction tool
pub const SITE_FILE_NAME: &str = "site_file.txt";

/// File holding the substrate sequences submitted to the prediction tool
pub const FASTA_FILE_NAME: &str = "fasta_file.txt";

// =============================================================================
// Time-course data
// =============================================================================

/// Time point the fold changes are computed against
pub const BASELINE_TIME_POINT: &str = "0min";

/// Separator marking ambiguous protein assignments in the raw dataset
pub const AMBIGUOUS_PROTEIN_SEPARATOR: char = ';';

// =============================================================================
// Output
// =============================================================================

/// Placeholder written for columns without a canonical label
pub const UNDEFINED_LABEL: &str = "NA";
