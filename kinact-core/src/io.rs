use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::constants::SOURCE_TAG_SEPARATOR;
use crate::types::*;

/// Columns of the curated PTM export used to build interaction records
pub const INTERACTION_COLUMNS: [&str; 6] = [
    "UniProt_A",
    "UniProt_B",
    "Residue_letter",
    "Residue_number",
    "PTM_type",
    "Databases",
];

/// Columns of the NetworKIN result file used to build prediction records
pub const PREDICTION_COLUMNS: [&str; 5] = [
    "#Name",
    "Position",
    "Tree",
    "Kinase/Phosphatase/Phospho-binding domain description",
    "NetworKIN score",
];

#[derive(Debug, Deserialize)]
struct InteractionRow {
    #[serde(rename = "UniProt_A")]
    enzyme: String,
    #[serde(rename = "UniProt_B")]
    substrate: String,
    #[serde(rename = "Residue_letter")]
    residue_letter: String,
    #[serde(rename = "Residue_number")]
    residue_number: u32,
    #[serde(rename = "PTM_type")]
    ptm_type: String,
    #[serde(rename = "Databases")]
    databases: String,
}

impl TryFrom<InteractionRow> for InteractionRecord {
    type Error = KinactError;

    fn try_from(row: InteractionRow) -> Result<Self, Self::Error> {
        let mut letters = row.residue_letter.trim().chars();
        let residue_letter = match (letters.next(), letters.next()) {
            (Some(letter), None) => letter,
            _ => {
                return Err(KinactError::ParseError(format!(
                    "residue letter '{}' for {} is not a single character",
                    row.residue_letter, row.substrate
                )));
            }
        };
        Ok(Self {
            enzyme: row.enzyme,
            substrate: row.substrate,
            residue_letter,
            residue_number: row.residue_number,
            modification: ModificationType::from(row.ptm_type.as_str()),
            sources: row
                .databases
                .split(SOURCE_TAG_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PredictionRow {
    #[serde(rename = "#Name")]
    name: String,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "Tree")]
    tree: String,
    #[serde(rename = "Kinase/Phosphatase/Phospho-binding domain description")]
    description: String,
    #[serde(rename = "NetworKIN score")]
    score: f64,
}

impl From<PredictionRow> for PredictionRecord {
    fn from(row: PredictionRow) -> Self {
        Self {
            substrate: row.name,
            position: row.position.trim().to_string(),
            enzyme: row.description,
            class: EnzymeClass::from(row.tree.as_str()),
            score: row.score,
        }
    }
}

fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

fn require_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    required: &[&str],
) -> Result<(), KinactError> {
    let headers = reader
        .headers()
        .map_err(|e| KinactError::ParseError(e.to_string()))?;
    for column in required {
        if !headers.iter().any(|h| h.trim() == *column) {
            return Err(KinactError::MissingColumn((*column).to_string()));
        }
    }
    Ok(())
}

/// Reads curated interaction records from a tab-separated PTM export.
///
/// # Errors
///
/// Returns [`KinactError::IoError`] if the file cannot be opened,
/// [`KinactError::MissingColumn`] if a column of [`INTERACTION_COLUMNS`] is
/// absent and [`KinactError::ParseError`] for malformed records.
pub fn read_interaction_records<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<InteractionRecord>, KinactError> {
    let file = File::open(path)?;
    read_interaction_records_from(file)
}

pub fn read_interaction_records_from<R: Read>(
    reader: R,
) -> Result<Vec<InteractionRecord>, KinactError> {
    let mut csv_reader = tsv_reader(reader);
    require_columns(&mut csv_reader, &INTERACTION_COLUMNS)?;

    let mut records = Vec::new();
    for result in csv_reader.deserialize::<InteractionRow>() {
        let row = result.map_err(|e| KinactError::ParseError(e.to_string()))?;
        records.push(InteractionRecord::try_from(row)?);
    }
    tracing::debug!(records = records.len(), "read curated interaction records");
    Ok(records)
}

/// Reads prediction records from a NetworKIN result file.
///
/// # Errors
///
/// Returns [`KinactError::IoError`] if the file cannot be opened,
/// [`KinactError::MissingColumn`] if a column of [`PREDICTION_COLUMNS`] is
/// absent and [`KinactError::ParseError`] for malformed records.
pub fn read_prediction_records<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PredictionRecord>, KinactError> {
    let file = File::open(path)?;
    read_prediction_records_from(file)
}

pub fn read_prediction_records_from<R: Read>(
    reader: R,
) -> Result<Vec<PredictionRecord>, KinactError> {
    let mut csv_reader = tsv_reader(reader);
    require_columns(&mut csv_reader, &PREDICTION_COLUMNS)?;

    let mut records = Vec::new();
    for result in csv_reader.deserialize::<PredictionRow>() {
        let row = result.map_err(|e| KinactError::ParseError(e.to_string()))?;
        records.push(PredictionRecord::from(row));
    }
    tracing::debug!(records = records.len(), "read prediction records");
    Ok(records)
}

/// Reads phospho-site identifiers, one per line.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns [`KinactError::IoError`] on read failures and
/// [`KinactError::InvalidSite`] for malformed identifiers.
pub fn read_site_list<P: AsRef<Path>>(path: P) -> Result<Vec<PhosphoSite>, KinactError> {
    let reader = BufReader::new(File::open(path)?);
    let mut sites = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        sites.push(line.parse()?);
    }
    Ok(sites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PTMS: &str = "\
UniProt_A\tUniProt_B\tResidue_letter\tResidue_number\tPTM_type\tDatabases\tReferences
P12931\tP06239\tY\t505\tphosphorylation\tPhosphoSite;HPRD\t123
P29350\tP06239\tY\t394\tdephosphorylation\tDEPOD\t
P12931\tP06239\tK\t99\tacetylation\tdbPTM\t456
";

    const NETWORKIN: &str = "\
#Name\tPosition\tTree\tNetPhorest Group\tKinase/Phosphatase/Phospho-binding domain description\tNetworKIN score
P06239\tS59\tKIN\tMAPK_group\tMAPK1\t3.2
P06239\tS59\tPTP\tPTPN_group\tPTPN6\t0.7
P06239\tY192\tSH2\tSH2_group\tGRB2\t1.1
";

    #[test]
    fn test_read_interaction_records() {
        let records = read_interaction_records_from(PTMS.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].enzyme, "P12931");
        assert_eq!(records[0].site().to_string(), "P06239_Y505");
        assert_eq!(records[0].modification, ModificationType::Phosphorylation);
        assert!(records[0].sources.contains("HPRD"));
        assert!(records[0].sources.contains("PhosphoSite"));

        assert_eq!(records[1].modification, ModificationType::Dephosphorylation);
        assert_eq!(records[1].sources.len(), 1);
        assert_eq!(
            records[2].modification,
            ModificationType::Other("acetylation".to_string())
        );
    }

    #[test]
    fn test_read_interaction_records_missing_column() {
        let data = "UniProt_A\tUniProt_B\tResidue_letter\tResidue_number\tPTM_type\nA\tB\tS\t1\tphosphorylation\n";
        match read_interaction_records_from(data.as_bytes()) {
            Err(KinactError::MissingColumn(column)) => assert_eq!(column, "Databases"),
            other => panic!("Expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_read_interaction_records_bad_residue() {
        let data = "UniProt_A\tUniProt_B\tResidue_letter\tResidue_number\tPTM_type\tDatabases\nA\tB\tSer\t1\tphosphorylation\tHPRD\n";
        assert!(matches!(
            read_interaction_records_from(data.as_bytes()),
            Err(KinactError::ParseError(_))
        ));

        let data = "UniProt_A\tUniProt_B\tResidue_letter\tResidue_number\tPTM_type\tDatabases\nA\tB\tS\tx\tphosphorylation\tHPRD\n";
        assert!(matches!(
            read_interaction_records_from(data.as_bytes()),
            Err(KinactError::ParseError(_))
        ));
    }

    #[test]
    fn test_read_prediction_records() {
        let records = read_prediction_records_from(NETWORKIN.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].site_id(), "P06239_S59");
        assert_eq!(records[0].enzyme, "MAPK1");
        assert_eq!(records[0].class, EnzymeClass::Kinase);
        assert_eq!(records[0].score, 3.2);
        assert_eq!(records[1].class, EnzymeClass::Phosphatase);
        assert_eq!(records[2].class, EnzymeClass::Other);
    }

    #[test]
    fn test_read_prediction_records_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(NETWORKIN.as_bytes()).unwrap();
        let records = read_prediction_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_read_prediction_records_missing_score() {
        let data = "#Name\tPosition\tTree\tKinase/Phosphatase/Phospho-binding domain description\nA\tS1\tKIN\tK1\n";
        match read_prediction_records_from(data.as_bytes()) {
            Err(KinactError::MissingColumn(column)) => assert_eq!(column, "NetworKIN score"),
            other => panic!("Expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_read_records_file_not_found() {
        assert!(matches!(
            read_interaction_records("nonexistent_ptms.txt"),
            Err(KinactError::IoError(_))
        ));
        assert!(matches!(
            read_prediction_records("nonexistent_networkin.tsv"),
            Err(KinactError::IoError(_))
        ));
    }

    #[test]
    fn test_read_site_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# sites from the screen").unwrap();
        writeln!(file, "P06239_S59").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  P43403_Y319  ").unwrap();
        let sites = read_site_list(file.path()).unwrap();
        assert_eq!(
            sites,
            vec![
                PhosphoSite::new("P06239", 'S', 59),
                PhosphoSite::new("P43403", 'Y', 319),
            ]
        );
    }

    #[test]
    fn test_read_site_list_invalid_entry() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "P06239_S59\nnot-a-site").unwrap();
        assert!(matches!(
            read_site_list(file.path()),
            Err(KinactError::InvalidSite(_))
        ));
    }
}
