//! Identifier translation between protein accessions, gene symbols and
//! network node ids.
//!
//! The reference table is an explicit value handed to whoever needs it, so
//! tests can build one in memory without touching disk.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::types::KinactError;

/// Identifier namespaces known to the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// UniProt protein accession, e.g. `P06239`
    Accession,
    /// Gene symbol, e.g. `LCK`
    GeneSymbol,
    /// Interaction network node id, e.g. `9606.ENSP00000337825`
    NodeId,
}

impl Namespace {
    pub const ALL: [Self; 3] = [Self::Accession, Self::GeneSymbol, Self::NodeId];

    const fn index(self) -> usize {
        match self {
            Self::Accession => 0,
            Self::GeneSymbol => 1,
            Self::NodeId => 2,
        }
    }
}

impl FromStr for Namespace {
    type Err = KinactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accession" | "uniprot" => Ok(Self::Accession),
            "gene_symbol" | "gene_name" => Ok(Self::GeneSymbol),
            "node_id" | "string_id" => Ok(Self::NodeId),
            other => Err(KinactError::InvalidNamespace(format!(
                "'{other}' is not one of accession, gene_symbol, node_id"
            ))),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accession => write!(f, "accession"),
            Self::GeneSymbol => write!(f, "gene_symbol"),
            Self::NodeId => write!(f, "node_id"),
        }
    }
}

/// One protein in the reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IdentifierRow {
    #[serde(alias = "uniprot")]
    pub accession: Option<String>,
    #[serde(alias = "gene_name")]
    pub gene_symbol: Option<String>,
    #[serde(alias = "string_id")]
    pub node_id: Option<String>,
}

impl IdentifierRow {
    #[must_use]
    pub fn new(accession: &str, gene_symbol: &str, node_id: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            accession: non_empty(accession),
            gene_symbol: non_empty(gene_symbol),
            node_id: non_empty(node_id),
        }
    }

    fn field(&self, namespace: Namespace) -> Option<&str> {
        match namespace {
            Namespace::Accession => self.accession.as_deref(),
            Namespace::GeneSymbol => self.gene_symbol.as_deref(),
            Namespace::NodeId => self.node_id.as_deref(),
        }
        .filter(|s| !s.is_empty())
    }
}

/// Outcome of translating a single identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Exactly one reference row matched
    Found(String),
    /// No reference row matched, or the matching row has no target value
    Missing,
    /// Several reference rows matched; carries the match count
    Ambiguous(usize),
}

impl Translation {
    /// The translated identifier, if the lookup was unique.
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::Found(id) => Some(id),
            Self::Missing | Self::Ambiguous(_) => None,
        }
    }

    #[must_use]
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Found(id) => Some(id),
            Self::Missing | Self::Ambiguous(_) => None,
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Read-only reference table mapping proteins across namespaces.
///
/// # Examples
///
/// ```rust
/// use kinact_core::translator::{IdentifierRow, IdentifierTable, Namespace, Translation};
///
/// let table = IdentifierTable::new(vec![
///     IdentifierRow::new("P06239", "LCK", "9606.ENSP00000337825"),
/// ]);
///
/// let out = table.translate(&["P06239", "P99999"], Namespace::Accession, Namespace::GeneSymbol)?;
/// assert_eq!(out, vec![Translation::Found("LCK".to_string()), Translation::Missing]);
/// # Ok::<(), kinact_core::types::KinactError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentifierTable {
    rows: Vec<IdentifierRow>,
    /// Per namespace, identifier to the positions of every row carrying it
    index: [HashMap<String, Vec<usize>>; 3],
}

impl IdentifierTable {
    #[must_use]
    pub fn new(rows: Vec<IdentifierRow>) -> Self {
        let mut index: [HashMap<String, Vec<usize>>; 3] = Default::default();
        for (position, row) in rows.iter().enumerate() {
            for namespace in Namespace::ALL {
                if let Some(id) = row.field(namespace) {
                    index[namespace.index()]
                        .entry(id.to_string())
                        .or_default()
                        .push(position);
                }
            }
        }
        Self { rows, index }
    }

    /// Loads the reduced UniProt mapping table.
    ///
    /// The file is comma-separated with a header naming the namespaces,
    /// either `uniprot,gene_name,string_id` or
    /// `accession,gene_symbol,node_id`. Extra columns are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::IoError`] if the file cannot be opened and
    /// [`KinactError::ParseError`] for malformed records.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, KinactError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, KinactError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let mut rows = Vec::new();
        for record in csv_reader.deserialize() {
            let row: IdentifierRow =
                record.map_err(|e| KinactError::ParseError(e.to_string()))?;
            rows.push(row);
        }
        tracing::debug!(rows = rows.len(), "loaded identifier reference table");
        Ok(Self::new(rows))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Translates a single identifier. Both namespaces must already be valid.
    #[must_use]
    pub fn lookup(&self, id: &str, from: Namespace, to: Namespace) -> Translation {
        match self.index[from.index()].get(id).map(Vec::as_slice) {
            None | Some([]) => Translation::Missing,
            Some(&[position]) => self.rows[position]
                .field(to)
                .map_or(Translation::Missing, |target| {
                    Translation::Found(target.to_string())
                }),
            Some(positions) => Translation::Ambiguous(positions.len()),
        }
    }

    /// Translates a batch of identifiers, preserving order and length.
    ///
    /// Missing and ambiguous identifiers yield [`Translation::Missing`] and
    /// [`Translation::Ambiguous`] entries rather than failing the batch.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::InvalidNamespace`] when `from == to`.
    pub fn translate<S: AsRef<str>>(
        &self,
        ids: &[S],
        from: Namespace,
        to: Namespace,
    ) -> Result<Vec<Translation>, KinactError> {
        if from == to {
            return Err(KinactError::InvalidNamespace(format!(
                "no need to translate from {from} to {to}"
            )));
        }
        Ok(ids
            .iter()
            .map(|id| self.lookup(id.as_ref(), from, to))
            .collect())
    }

    /// Like [`translate`](Self::translate), with namespaces given by name.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::InvalidNamespace`] for unknown or identical
    /// namespace names.
    pub fn translate_named<S: AsRef<str>>(
        &self,
        ids: &[S],
        from: &str,
        to: &str,
    ) -> Result<Vec<Translation>, KinactError> {
        self.translate(ids, from.parse()?, to.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> IdentifierTable {
        IdentifierTable::new(vec![
            IdentifierRow::new("P06239", "LCK", "9606.ENSP00000337825"),
            IdentifierRow::new("P12931", "SRC", "9606.ENSP00000350941"),
            IdentifierRow::new("P43405", "SYK", ""),
            // two accessions sharing a gene symbol
            IdentifierRow::new("Q13315", "ATM", "9606.ENSP00000278616"),
            IdentifierRow::new("Q13315-2", "ATM", "9606.ENSP00000388058"),
        ])
    }

    #[test]
    fn test_translate_found_and_missing() {
        let table = create_test_table();
        let out = table
            .translate(
                &["P12931", "P00000", "P06239"],
                Namespace::Accession,
                Namespace::GeneSymbol,
            )
            .unwrap();
        assert_eq!(
            out,
            vec![
                Translation::Found("SRC".to_string()),
                Translation::Missing,
                Translation::Found("LCK".to_string()),
            ]
        );
    }

    #[test]
    fn test_translate_ambiguous_is_not_an_error() {
        let table = create_test_table();
        let out = table
            .translate(&["ATM", "SRC"], Namespace::GeneSymbol, Namespace::Accession)
            .unwrap();
        assert_eq!(out[0], Translation::Ambiguous(2));
        assert_eq!(out[0].as_deref(), None);
        assert_eq!(out[1].as_deref(), Some("P12931"));
    }

    #[test]
    fn test_translate_empty_target_is_missing() {
        let table = create_test_table();
        let out = table
            .translate(&["P43405"], Namespace::Accession, Namespace::NodeId)
            .unwrap();
        assert_eq!(out, vec![Translation::Missing]);
    }

    #[test]
    fn test_translate_same_namespace_fails() {
        let table = create_test_table();
        let result = table.translate(&["P06239"], Namespace::Accession, Namespace::Accession);
        assert!(matches!(result, Err(KinactError::InvalidNamespace(_))));
    }

    #[test]
    fn test_translate_named_namespaces() {
        let table = create_test_table();
        let out = table
            .translate_named(&["LCK"], "gene_name", "uniprot")
            .unwrap();
        assert_eq!(out, vec![Translation::Found("P06239".to_string())]);

        assert!(matches!(
            table.translate_named(&["LCK"], "gene_name", "ensembl"),
            Err(KinactError::InvalidNamespace(_))
        ));
        assert!(matches!(
            table.translate_named(&["LCK"], "gene_symbol", "gene_name"),
            Err(KinactError::InvalidNamespace(_))
        ));
    }

    #[test]
    fn test_translate_preserves_order_and_length() {
        let table = create_test_table();
        let ids = ["SYK", "nope", "LCK", "LCK", "ATM"];
        let out = table
            .translate(&ids, Namespace::GeneSymbol, Namespace::Accession)
            .unwrap();
        assert_eq!(out.len(), ids.len());
        assert_eq!(out[2], out[3]);
        assert_eq!(out[0].as_deref(), Some("P43405"));
    }

    #[test]
    fn test_round_trip_for_unique_mappings() {
        let table = create_test_table();
        for (a, b) in [
            (Namespace::Accession, Namespace::GeneSymbol),
            (Namespace::GeneSymbol, Namespace::NodeId),
            (Namespace::NodeId, Namespace::Accession),
        ] {
            let forward = table.lookup("P06239", Namespace::Accession, a);
            let start = if a == Namespace::Accession {
                "P06239".to_string()
            } else {
                forward.into_option().unwrap()
            };
            let there = table.lookup(&start, a, b).into_option().unwrap();
            let back = table.lookup(&there, b, a).into_option().unwrap();
            assert_eq!(back, start);
        }
    }

    #[test]
    fn test_from_reader_accepts_both_header_styles() {
        let legacy = "uniprot,gene_name,string_id\nP06239,LCK,9606.ENSP00000337825\n";
        let table = IdentifierTable::from_reader(legacy.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup("LCK", Namespace::GeneSymbol, Namespace::NodeId),
            Translation::Found("9606.ENSP00000337825".to_string())
        );

        let modern = "accession,gene_symbol,node_id\nP12931,SRC,\n";
        let table = IdentifierTable::from_reader(modern.as_bytes()).unwrap();
        assert_eq!(
            table.lookup("P12931", Namespace::Accession, Namespace::NodeId),
            Translation::Missing
        );
    }

    #[test]
    fn test_from_csv_missing_file() {
        match IdentifierTable::from_csv("nonexistent_mapping.csv") {
            Err(KinactError::IoError(_)) => {}
            other => panic!("Expected IoError for missing file, got {other:?}"),
        }
    }
}
