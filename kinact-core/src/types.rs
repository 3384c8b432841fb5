use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{KINASE_CLASS, PHOSPHATASE_CLASS};

/// A modifiable residue on a protein, e.g. `P06239_S59` for serine 59 of Lck.
///
/// The textual form is `{protein}_{residue}{position}`. Parsing splits on the
/// last underscore, so protein identifiers that contain underscores survive
/// a round trip.
///
/// # Examples
///
/// ```rust
/// use kinact_core::types::PhosphoSite;
///
/// let site: PhosphoSite = "P06239_S59".parse()?;
/// assert_eq!(site.protein, "P06239");
/// assert_eq!(site.residue, 'S');
/// assert_eq!(site.position, 59);
/// assert_eq!(site.to_string(), "P06239_S59");
/// # Ok::<(), kinact_core::types::KinactError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhosphoSite {
    /// Accession of the substrate protein
    pub protein: String,
    /// One-letter amino acid code of the modified residue
    pub residue: char,
    /// 1-based residue position within the protein
    pub position: u32,
}

impl PhosphoSite {
    #[must_use]
    pub fn new(protein: impl Into<String>, residue: char, position: u32) -> Self {
        Self {
            protein: protein.into(),
            residue,
            position,
        }
    }
}

impl fmt::Display for PhosphoSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}{}", self.protein, self.residue, self.position)
    }
}

impl FromStr for PhosphoSite {
    type Err = KinactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KinactError::InvalidSite(s.to_string());

        let (protein, token) = s.rsplit_once('_').ok_or_else(invalid)?;
        if protein.is_empty() {
            return Err(invalid());
        }
        let mut chars = token.chars();
        let residue = chars
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or_else(invalid)?;
        let position = chars.as_str().parse::<u32>().map_err(|_| invalid())?;

        Ok(Self::new(protein, residue, position))
    }
}

/// Kind of post-translational modification reported by a curated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModificationType {
    /// Phosphate added by a kinase
    Phosphorylation,
    /// Phosphate removed by a phosphatase
    Dephosphorylation,
    /// Any other modification (acetylation, ubiquitination, ...)
    Other(String),
}

impl ModificationType {
    /// Regulatory sign carried by this modification, `None` for unrelated types.
    #[must_use]
    pub const fn sign(&self) -> Option<f64> {
        match self {
            Self::Phosphorylation => Some(1.0),
            Self::Dephosphorylation => Some(-1.0),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for ModificationType {
    fn from(label: &str) -> Self {
        let normalized = label.trim().to_ascii_lowercase();
        if !normalized.contains("phosphorylation") {
            Self::Other(label.to_string())
        } else if normalized.starts_with("de") {
            Self::Dephosphorylation
        } else {
            Self::Phosphorylation
        }
    }
}

impl fmt::Display for ModificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phosphorylation => write!(f, "phosphorylation"),
            Self::Dephosphorylation => write!(f, "dephosphorylation"),
            Self::Other(label) => write!(f, "{label}"),
        }
    }
}

/// Domain class assigned by the prediction tool to a scoring enzyme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnzymeClass {
    /// Kinase domain (`KIN`)
    Kinase,
    /// Phosphatase domain (`PTP`)
    Phosphatase,
    /// Phospho-binding and other domains, ignored when building matrices
    Other,
}

impl EnzymeClass {
    /// Sign applied to cells contributed by this class.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Phosphatase => -1.0,
            Self::Kinase | Self::Other => 1.0,
        }
    }
}

impl From<&str> for EnzymeClass {
    fn from(label: &str) -> Self {
        match label.trim() {
            KINASE_CLASS => Self::Kinase,
            PHOSPHATASE_CLASS => Self::Phosphatase,
            _ => Self::Other,
        }
    }
}

/// One curated enzyme-substrate interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    /// Accession of the modifying enzyme
    pub enzyme: String,
    /// Accession of the substrate protein
    pub substrate: String,
    /// One-letter code of the modified residue
    pub residue_letter: char,
    /// Position of the modified residue
    pub residue_number: u32,
    /// Reported modification
    pub modification: ModificationType,
    /// Databases reporting the interaction
    pub sources: BTreeSet<String>,
}

impl InteractionRecord {
    /// Phospho-site modified by this interaction.
    #[must_use]
    pub fn site(&self) -> PhosphoSite {
        PhosphoSite::new(
            self.substrate.clone(),
            self.residue_letter,
            self.residue_number,
        )
    }
}

/// One scored site/enzyme pair reported by the prediction tool.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    /// Substrate name as submitted to the tool
    pub substrate: String,
    /// Position token of the residue, e.g. `S59`
    pub position: String,
    /// Enzyme name, used as the column label
    pub enzyme: String,
    /// Domain class of the enzyme
    pub class: EnzymeClass,
    /// Prediction confidence
    pub score: f64,
}

impl PredictionRecord {
    /// Row key for this prediction: `{substrate}_{position}`.
    #[must_use]
    pub fn site_id(&self) -> String {
        format!("{}_{}", self.substrate, self.position)
    }
}

/// Error types raised while building or merging adjacency matrices
#[derive(Error, Debug)]
pub enum KinactError {
    /// Translation requested between identical or unknown namespaces
    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),
    /// Curated source label outside the recognized list
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),
    /// Malformed phospho-site identifier
    #[error("Invalid phospho-site identifier: {0}")]
    InvalidSite(String),
    /// Score cutoff that cannot be compared against scores
    #[error("Invalid score cutoff: {0}")]
    InvalidCutoff(f64),
    /// Required column absent from an input table
    #[error("Missing column: {0}")]
    MissingColumn(String),
    /// Worker pool could not be configured
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Error parsing input data
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phospho_site_parse_and_display() {
        let site: PhosphoSite = "P06239_S59".parse().unwrap();
        assert_eq!(site, PhosphoSite::new("P06239", 'S', 59));
        assert_eq!(site.to_string(), "P06239_S59");
    }

    #[test]
    fn test_phospho_site_splits_on_last_underscore() {
        let site: PhosphoSite = "Q9_XYZ1_T10".parse().unwrap();
        assert_eq!(site.protein, "Q9_XYZ1");
        assert_eq!(site.residue, 'T');
        assert_eq!(site.position, 10);
    }

    #[test]
    fn test_phospho_site_rejects_malformed() {
        for bad in ["P06239", "_S59", "P06239_", "P06239_59", "P06239_Sx", "P06239_S"] {
            match bad.parse::<PhosphoSite>() {
                Err(KinactError::InvalidSite(s)) => assert_eq!(s, bad),
                other => panic!("Expected InvalidSite for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_modification_type_from_label() {
        assert_eq!(
            ModificationType::from("phosphorylation"),
            ModificationType::Phosphorylation
        );
        assert_eq!(
            ModificationType::from("dephosphorylation"),
            ModificationType::Dephosphorylation
        );
        assert_eq!(
            ModificationType::from("acetylation"),
            ModificationType::Other("acetylation".to_string())
        );
        assert_eq!(ModificationType::Phosphorylation.sign(), Some(1.0));
        assert_eq!(ModificationType::Dephosphorylation.sign(), Some(-1.0));
        assert_eq!(ModificationType::from("ubiquitination").sign(), None);
    }

    #[test]
    fn test_enzyme_class_from_label() {
        assert_eq!(EnzymeClass::from("KIN"), EnzymeClass::Kinase);
        assert_eq!(EnzymeClass::from("PTP"), EnzymeClass::Phosphatase);
        assert_eq!(EnzymeClass::from("SH2"), EnzymeClass::Other);
        assert_eq!(EnzymeClass::Phosphatase.sign(), -1.0);
        assert_eq!(EnzymeClass::Kinase.sign(), 1.0);
    }

    #[test]
    fn test_record_keys() {
        let interaction = InteractionRecord {
            enzyme: "P12931".to_string(),
            substrate: "P06239".to_string(),
            residue_letter: 'Y',
            residue_number: 394,
            modification: ModificationType::Phosphorylation,
            sources: BTreeSet::new(),
        };
        assert_eq!(interaction.site().to_string(), "P06239_Y394");

        let prediction = PredictionRecord {
            substrate: "P06239".to_string(),
            position: "Y394".to_string(),
            enzyme: "SRC".to_string(),
            class: EnzymeClass::Kinase,
            score: 0.8,
        };
        assert_eq!(prediction.site_id(), "P06239_Y394");
    }

    #[test]
    fn test_error_display() {
        let err = KinactError::UnsupportedSource("NoSuchDB".to_string());
        assert_eq!(err.to_string(), "Unsupported source: NoSuchDB");
        let err = KinactError::InvalidCutoff(f64::NAN);
        assert_eq!(err.to_string(), "Invalid score cutoff: NaN");
    }
}
