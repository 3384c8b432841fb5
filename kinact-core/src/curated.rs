//! Curated interaction records to signed adjacency matrices.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::constants::{ALL_SOURCES_KEYWORD, DEFAULT_SOURCE, RECOGNIZED_SOURCES};
use crate::matrix::{AdjacencyMatrix, EnzymeColumn, MatrixBuilder};
use crate::translator::{IdentifierTable, Namespace};
use crate::types::{InteractionRecord, KinactError};

/// Databases whose curated interactions are admitted into a matrix.
///
/// # Examples
///
/// ```rust
/// use kinact_core::curated::SourceSelection;
///
/// let default = SourceSelection::default();
/// assert_eq!(default.to_string(), "PhosphoSite");
///
/// let all: SourceSelection = "all".parse()?;
/// assert_eq!(all, SourceSelection::All);
///
/// let some: SourceSelection = "HPRD,Signor".parse()?;
/// assert!(some.admits_any(["Signor"]));
///
/// assert!("NoSuchDB".parse::<SourceSelection>().is_err());
/// # Ok::<(), kinact_core::types::KinactError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelection {
    /// Every recognized source; records are not filtered by tag
    All,
    /// Only records tagged with at least one of these sources
    Only(BTreeSet<String>),
}

impl Default for SourceSelection {
    fn default() -> Self {
        Self::Only(BTreeSet::from([DEFAULT_SOURCE.to_string()]))
    }
}

impl SourceSelection {
    /// Selection of the given sources.
    ///
    /// A list consisting solely of `all` selects every source.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::UnsupportedSource`] for labels outside
    /// [`RECOGNIZED_SOURCES`].
    pub fn only<I, S>(sources: I) -> Result<Self, KinactError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: Vec<String> = sources.into_iter().map(Into::into).collect();
        if let [single] = sources.as_slice()
            && single == ALL_SOURCES_KEYWORD
        {
            return Ok(Self::All);
        }
        let selection = Self::Only(sources.into_iter().collect());
        selection.validate()?;
        Ok(selection)
    }

    /// Checks every selected label against the recognized list.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::UnsupportedSource`] naming the offending labels,
    /// or when no source is selected at all.
    pub fn validate(&self) -> Result<(), KinactError> {
        let Self::Only(sources) = self else {
            return Ok(());
        };
        if sources.is_empty() {
            return Err(KinactError::UnsupportedSource(format!(
                "no source selected (supported: {})",
                RECOGNIZED_SOURCES.join(", ")
            )));
        }
        let unsupported: Vec<&str> = sources
            .iter()
            .map(String::as_str)
            .filter(|s| !RECOGNIZED_SOURCES.contains(s))
            .collect();
        if unsupported.is_empty() {
            Ok(())
        } else {
            Err(KinactError::UnsupportedSource(format!(
                "{} (supported: {})",
                unsupported.join(", "),
                RECOGNIZED_SOURCES.join(", ")
            )))
        }
    }

    /// Sources used to filter records, `None` when the selection covers
    /// every recognized source and no filtering applies.
    fn filter_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::All => None,
            Self::Only(sources) if RECOGNIZED_SOURCES.iter().all(|s| sources.contains(*s)) => None,
            Self::Only(sources) => Some(sources),
        }
    }

    /// Whether a record carrying `tags` passes this selection.
    pub fn admits_any<I, S>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.filter_set() {
            None => true,
            Some(sources) => tags.into_iter().any(|t| sources.contains(t.as_ref())),
        }
    }
}

impl FromStr for SourceSelection {
    type Err = KinactError;

    /// Parses a comma-separated list of source labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::only(s.split(',').map(str::trim).filter(|t| !t.is_empty()))
    }
}

impl fmt::Display for SourceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_SOURCES_KEYWORD}"),
            Self::Only(sources) => {
                let labels: Vec<&str> = sources.iter().map(String::as_str).collect();
                write!(f, "{}", labels.join(","))
            }
        }
    }
}

/// Builds signed matrices from curated interaction records.
///
/// Enzyme accessions are translated to gene symbols through the injected
/// [`IdentifierTable`].
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use kinact_core::curated::{CuratedMatrixBuilder, SourceSelection};
/// use kinact_core::translator::{IdentifierRow, IdentifierTable};
/// use kinact_core::types::{InteractionRecord, ModificationType};
///
/// let table = IdentifierTable::new(vec![IdentifierRow::new("P12931", "SRC", "")]);
/// let records = vec![InteractionRecord {
///     enzyme: "P12931".to_string(),
///     substrate: "P06239".to_string(),
///     residue_letter: 'Y',
///     residue_number: 505,
///     modification: ModificationType::Phosphorylation,
///     sources: BTreeSet::from(["PhosphoSite".to_string()]),
/// }];
///
/// let matrix = CuratedMatrixBuilder::new(&table).build(&records, &SourceSelection::default())?;
/// assert_eq!(matrix.get("P06239_Y505", "SRC"), Some(1.0));
/// # Ok::<(), kinact_core::types::KinactError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CuratedMatrixBuilder<'a> {
    table: &'a IdentifierTable,
}

impl<'a> CuratedMatrixBuilder<'a> {
    #[must_use]
    pub const fn new(table: &'a IdentifierTable) -> Self {
        Self { table }
    }

    /// Builds the curated matrix.
    ///
    /// Non-phosphorylation records are discarded, then records outside the
    /// selected sources. Phosphorylation contributes +1 and
    /// dephosphorylation -1; a repeated site/enzyme pair keeps the value of
    /// the last record. Rows are sorted by site id and columns by enzyme
    /// accession.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::UnsupportedSource`] if `sources` names an
    /// unrecognized database.
    pub fn build(
        &self,
        records: &[InteractionRecord],
        sources: &SourceSelection,
    ) -> Result<AdjacencyMatrix, KinactError> {
        sources.validate()?;

        let mut entries: Vec<(String, &str, f64)> = Vec::new();
        let mut discarded_type = 0usize;
        let mut discarded_source = 0usize;
        for record in records {
            let Some(sign) = record.modification.sign() else {
                discarded_type += 1;
                continue;
            };
            if !sources.admits_any(&record.sources) {
                discarded_source += 1;
                continue;
            }
            entries.push((record.site().to_string(), record.enzyme.as_str(), sign));
        }

        let sites: BTreeSet<&str> = entries.iter().map(|(site, _, _)| site.as_str()).collect();
        let enzymes: Vec<&str> = entries
            .iter()
            .map(|&(_, enzyme, _)| enzyme)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let labels = self
            .table
            .translate(&enzymes, Namespace::Accession, Namespace::GeneSymbol)?;

        let mut builder = MatrixBuilder::new();
        for site in &sites {
            builder.add_row(site);
        }
        let mut column_of: BTreeMap<&str, usize> = BTreeMap::new();
        let mut untranslated = 0usize;
        for (enzyme, label) in enzymes.iter().zip(labels) {
            if !label.is_found() {
                untranslated += 1;
            }
            let position = builder.add_column(EnzymeColumn::new(label.into_option(), *enzyme));
            column_of.insert(*enzyme, position);
        }
        for (site, enzyme, sign) in &entries {
            let row = builder.add_row(site);
            builder.set(row, column_of[enzyme], *sign);
        }
        let matrix = builder.build();

        tracing::debug!(
            sources = %sources,
            kept = entries.len(),
            discarded_type,
            discarded_source,
            "filtered curated records"
        );
        if untranslated > 0 {
            tracing::warn!(
                untranslated,
                "enzyme accessions without a unique gene symbol kept as unlabeled columns"
            );
        }
        tracing::info!(
            sites = matrix.n_rows(),
            enzymes = matrix.n_columns(),
            interactions = matrix.defined_count(),
            "built curated adjacency matrix"
        );
        Ok(matrix)
    }
}
