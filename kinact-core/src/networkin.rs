//! Input files for a NetworKIN run.
//!
//! NetworKIN needs two files: a site file listing `protein`, `position` and
//! `residue` per line, and a FASTA file with the full sequence of every
//! protein referenced by the site file.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use bio::io::fasta;

use crate::constants::{FASTA_FILE_NAME, SITE_FILE_NAME};
use crate::types::{KinactError, PhosphoSite};

/// Protein sequences keyed by accession.
#[derive(Debug, Clone, Default)]
pub struct SequenceLibrary {
    sequences: HashMap<String, Vec<u8>>,
}

impl SequenceLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads sequences from a FASTA file, keyed by record id.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::IoError`] if the file cannot be opened and
    /// [`KinactError::ParseError`] for malformed records.
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Self, KinactError> {
        let file = File::open(path)?;
        let reader = fasta::Reader::new(file);
        let mut library = Self::new();
        for result in reader.records() {
            let record = result.map_err(|e| KinactError::ParseError(e.to_string()))?;
            library.insert(record.id(), record.seq().to_vec());
        }
        Ok(library)
    }

    /// Loads sequences from a UniProt tab export.
    ///
    /// The accession is taken from the first column and the sequence from
    /// the column headed `Sequence`.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::MissingColumn`] when there is no `Sequence`
    /// column, besides the usual I/O and parse errors.
    pub fn from_uniprot_table<P: AsRef<Path>>(path: P) -> Result<Self, KinactError> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let sequence_column = reader
            .headers()
            .map_err(|e| KinactError::ParseError(e.to_string()))?
            .iter()
            .position(|h| h.trim() == "Sequence")
            .ok_or_else(|| KinactError::MissingColumn("Sequence".to_string()))?;

        let mut library = Self::new();
        for result in reader.records() {
            let record = result.map_err(|e| KinactError::ParseError(e.to_string()))?;
            if let (Some(accession), Some(sequence)) = (record.get(0), record.get(sequence_column))
                && !sequence.is_empty()
            {
                library.insert(accession.trim(), sequence.trim().as_bytes().to_vec());
            }
        }
        Ok(library)
    }

    pub fn insert(&mut self, accession: impl Into<String>, sequence: Vec<u8>) {
        self.sequences.insert(accession.into(), sequence);
    }

    #[must_use]
    pub fn get(&self, accession: &str) -> Option<&[u8]> {
        self.sequences.get(accession).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

/// What [`prepare_networkin_files`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparationSummary {
    /// Lines written to the site file
    pub sites_written: usize,
    /// Records written to the FASTA file
    pub sequences_written: usize,
    /// Proteins referenced by a site but absent from the library
    pub missing_sequences: Vec<String>,
}

/// Writes the site file and the FASTA file for a NetworKIN run.
///
/// Creates `output_dir` if needed. Sites are written in input order; each
/// protein's sequence is written once, at its first occurrence. Proteins
/// without a known sequence are reported in the summary but still listed in
/// the site file.
///
/// # Errors
///
/// Returns [`KinactError::IoError`] if the directory or files cannot be
/// written.
///
/// # Examples
///
/// ```rust,no_run
/// use kinact_core::networkin::{SequenceLibrary, prepare_networkin_files};
/// use kinact_core::types::PhosphoSite;
///
/// let library = SequenceLibrary::from_fasta("uniprot_sprot.fasta")?;
/// let sites: Vec<PhosphoSite> = vec!["P06239_S59".parse()?];
/// let summary = prepare_networkin_files(&sites, &library, "networkin_files")?;
/// println!("{} sequences written", summary.sequences_written);
/// # Ok::<(), kinact_core::types::KinactError>(())
/// ```
pub fn prepare_networkin_files<P: AsRef<Path>>(
    sites: &[PhosphoSite],
    library: &SequenceLibrary,
    output_dir: P,
) -> Result<PreparationSummary, KinactError> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut site_file = BufWriter::new(File::create(output_dir.join(SITE_FILE_NAME))?);
    let mut fasta_file = fasta::Writer::new(File::create(output_dir.join(FASTA_FILE_NAME))?);

    let mut summary = PreparationSummary::default();
    let mut seen: HashSet<&str> = HashSet::new();
    for site in sites {
        writeln!(
            site_file,
            "{}\t{}\t{}",
            site.protein, site.position, site.residue
        )?;
        summary.sites_written += 1;

        if !seen.insert(site.protein.as_str()) {
            continue;
        }
        match library.get(&site.protein) {
            Some(sequence) => {
                fasta_file.write(&site.protein, None, sequence)?;
                summary.sequences_written += 1;
            }
            None => summary.missing_sequences.push(site.protein.clone()),
        }
    }
    site_file.flush()?;
    fasta_file.flush()?;

    if !summary.missing_sequences.is_empty() {
        tracing::warn!(
            missing = summary.missing_sequences.len(),
            "proteins without a known sequence were left out of the FASTA file"
        );
    }
    tracing::info!(
        dir = %output_dir.display(),
        sites = summary.sites_written,
        sequences = summary.sequences_written,
        "files for NetworKIN analysis saved"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    fn create_test_library() -> SequenceLibrary {
        let mut library = SequenceLibrary::new();
        library.insert("P06239", b"MGCGCSSHPEDD".to_vec());
        library.insert("P43403", b"MPDPAAHLPFFY".to_vec());
        library
    }

    #[test]
    fn test_prepare_networkin_files() {
        let dir = TempDir::new().unwrap();
        let sites: Vec<PhosphoSite> = ["P06239_S59", "P43403_Y319", "P06239_Y394", "Q99999_T5"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        let summary = prepare_networkin_files(&sites, &create_test_library(), dir.path()).unwrap();
        assert_eq!(
            summary,
            PreparationSummary {
                sites_written: 4,
                sequences_written: 2,
                missing_sequences: vec!["Q99999".to_string()],
            }
        );

        let site_file = fs::read_to_string(dir.path().join(SITE_FILE_NAME)).unwrap();
        assert_eq!(
            site_file,
            "P06239\t59\tS\nP43403\t319\tY\nP06239\t394\tY\nQ99999\t5\tT\n"
        );

        let fasta_file = fs::read_to_string(dir.path().join(FASTA_FILE_NAME)).unwrap();
        assert_eq!(fasta_file, ">P06239\nMGCGCSSHPEDD\n>P43403\nMPDPAAHLPFFY\n");
    }

    #[test]
    fn test_prepare_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("runs").join("first");
        let sites = vec![PhosphoSite::new("P06239", 'S', 59)];
        prepare_networkin_files(&sites, &create_test_library(), &nested).unwrap();
        assert!(nested.join(SITE_FILE_NAME).exists());
        assert!(nested.join(FASTA_FILE_NAME).exists());
    }

    #[test]
    fn test_library_from_fasta() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, ">P06239 Lck\nMGCGCS\nSHPEDD\n>P43403\nMPDPAA\n").unwrap();
        let library = SequenceLibrary::from_fasta(file.path()).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.get("P06239"), Some(&b"MGCGCSSHPEDD"[..]));
        assert_eq!(library.get("Lck"), None);
    }

    #[test]
    fn test_library_from_uniprot_table() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "Entry\tEntry name\tStatus\tSequence\nP06239\tLCK_HUMAN\treviewed\tMGCGCS\nP00000\tNONE\tunreviewed\t\n"
        )
        .unwrap();
        let library = SequenceLibrary::from_uniprot_table(file.path()).unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.get("P06239"), Some(&b"MGCGCS"[..]));
    }

    #[test]
    fn test_library_from_uniprot_table_without_sequence_column() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Entry\tEntry name\nP06239\tLCK_HUMAN\n").unwrap();
        assert!(matches!(
            SequenceLibrary::from_uniprot_table(file.path()),
            Err(KinactError::MissingColumn(_))
        ));
    }
}
