//! Phosphoproteomics time-course data.
//!
//! Raw datasets carry one row per quantified site with averaged log
//! intensities per time point and p-values for each time point against the
//! unstimulated baseline. They are converted here into fold changes and
//! negative log10 p-values keyed by phospho-site id.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::constants::{AMBIGUOUS_PROTEIN_SEPARATOR, BASELINE_TIME_POINT};
use crate::types::KinactError;

const PROTEIN_COLUMN: &str = "Proteins";
const RESIDUE_COLUMN: &str = "Amino acid";
const POSITION_COLUMN: &str = "Positions within proteins";
const INTENSITY_PREFIX: &str = "Average";
const P_VALUE_PREFIX: &str = "p value";

/// Site × time point table with optional values.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeCourse {
    sites: Vec<String>,
    time_points: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl TimeCourse {
    /// Creates a table from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::ParseError`] if the value grid does not match
    /// the number of sites and time points.
    pub fn new(
        sites: Vec<String>,
        time_points: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, KinactError> {
        if values.len() != sites.len() || values.iter().any(|row| row.len() != time_points.len())
        {
            return Err(KinactError::ParseError(format!(
                "value grid does not match {} sites x {} time points",
                sites.len(),
                time_points.len()
            )));
        }
        Ok(Self {
            sites,
            time_points,
            values,
        })
    }

    #[must_use]
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    #[must_use]
    pub fn time_points(&self) -> &[String] {
        &self.time_points
    }

    /// Values of one site, in time point order.
    #[must_use]
    pub fn row(&self, index: usize) -> &[Option<f64>] {
        &self.values[index]
    }

    /// Value for the first row with this site id.
    #[must_use]
    pub fn get(&self, site: &str, time_point: &str) -> Option<f64> {
        let row = self.sites.iter().position(|s| s == site)?;
        let column = self.time_points.iter().position(|t| t == time_point)?;
        self.values[row][column]
    }

    /// Differences to the `baseline` time point, which is dropped.
    ///
    /// A value is undefined if it or the site's baseline is undefined.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::MissingColumn`] if `baseline` is not a time
    /// point of this table.
    pub fn fold_changes(&self, baseline: &str) -> Result<Self, KinactError> {
        let base = self
            .time_points
            .iter()
            .position(|t| t == baseline)
            .ok_or_else(|| KinactError::MissingColumn(baseline.to_string()))?;

        let keep: Vec<usize> = (0..self.time_points.len()).filter(|&i| i != base).collect();
        let values = self
            .values
            .iter()
            .map(|row| {
                keep.iter()
                    .map(|&i| match (row[i], row[base]) {
                        (Some(value), Some(reference)) => Some(value - reference),
                        _ => None,
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            sites: self.sites.clone(),
            time_points: keep.iter().map(|&i| self.time_points[i].clone()).collect(),
            values,
        })
    }

    /// Negative base-10 logarithm of every value.
    ///
    /// Non-positive values become undefined.
    #[must_use]
    pub fn neg_log10(&self) -> Self {
        let values = self
            .values
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| v.filter(|&p| p > 0.0).map(|p| -p.log10()))
                    .collect()
            })
            .collect();
        Self {
            sites: self.sites.clone(),
            time_points: self.time_points.clone(),
            values,
        }
    }
}

/// Intensities and p-values read from one raw dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct PhosphoDataset {
    /// Averaged log intensities per time point, baseline included
    pub intensities: TimeCourse,
    /// p-values of each time point against the baseline
    pub p_values: TimeCourse,
}

impl PhosphoDataset {
    /// Fold changes against [`BASELINE_TIME_POINT`] and -log10 p-values.
    ///
    /// # Errors
    ///
    /// Returns [`KinactError::MissingColumn`] when the baseline time point
    /// is absent.
    pub fn into_fold_changes(self) -> Result<(TimeCourse, TimeCourse), KinactError> {
        let fold_changes = self.intensities.fold_changes(BASELINE_TIME_POINT)?;
        Ok((fold_changes, self.p_values.neg_log10()))
    }
}

/// Time point named by an intensity header, e.g. `Average log2 intensity 5min`.
fn intensity_time_point(header: &str) -> Option<String> {
    if !header.starts_with(INTENSITY_PREFIX) {
        return None;
    }
    header.split_whitespace().last().map(String::from)
}

/// Time point named by a p-value header, e.g. `p value_5vs0min`.
fn p_value_time_point(header: &str) -> Option<String> {
    let suffix = format!("vs{BASELINE_TIME_POINT}");
    if !header.starts_with(P_VALUE_PREFIX) || !header.ends_with(&suffix) {
        return None;
    }
    let comparison = header.rsplit('_').next()?;
    let time_point = comparison.split("vs").next().filter(|t| !t.is_empty())?;
    if time_point.ends_with("min") {
        Some(time_point.to_string())
    } else {
        Some(format!("{time_point}min"))
    }
}

fn parse_value(raw: &str, column: &str) -> Result<Option<f64>, KinactError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(|_| {
        KinactError::ParseError(format!("'{raw}' in column '{column}' is not a number"))
    })?;
    Ok((!value.is_nan()).then_some(value))
}

/// Reads a comma-separated phosphoproteomics time-course dataset.
///
/// Rows whose `Proteins` field lists several proteins are dropped since the
/// site cannot be assigned unambiguously.
///
/// # Errors
///
/// Returns [`KinactError::MissingColumn`] when a site column is absent and
/// [`KinactError::ParseError`] for non-numeric values.
pub fn read_phospho_dataset<P: AsRef<Path>>(path: P) -> Result<PhosphoDataset, KinactError> {
    let file = File::open(path)?;
    read_phospho_dataset_from(file)
}

pub fn read_phospho_dataset_from<R: Read>(reader: R) -> Result<PhosphoDataset, KinactError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| KinactError::ParseError(e.to_string()))?
        .clone();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| KinactError::MissingColumn(name.to_string()))
    };
    let protein_column = find(PROTEIN_COLUMN)?;
    let residue_column = find(RESIDUE_COLUMN)?;
    let position_column = find(POSITION_COLUMN)?;

    let intensity_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| intensity_time_point(h).map(|t| (i, t)))
        .collect();
    let p_value_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| p_value_time_point(h).map(|t| (i, t)))
        .collect();

    let mut sites = Vec::new();
    let mut intensities = Vec::new();
    let mut p_values = Vec::new();
    let mut ambiguous = 0usize;
    for result in csv_reader.records() {
        let record = result.map_err(|e| KinactError::ParseError(e.to_string()))?;
        let field = |i: usize| record.get(i).unwrap_or("").trim();

        let protein = field(protein_column);
        if protein.contains(AMBIGUOUS_PROTEIN_SEPARATOR) {
            ambiguous += 1;
            continue;
        }
        sites.push(format!(
            "{}_{}{}",
            protein,
            field(residue_column),
            field(position_column)
        ));
        intensities.push(
            intensity_columns
                .iter()
                .map(|(i, _)| parse_value(field(*i), &headers[*i]))
                .collect::<Result<Vec<_>, _>>()?,
        );
        p_values.push(
            p_value_columns
                .iter()
                .map(|(i, _)| parse_value(field(*i), &headers[*i]))
                .collect::<Result<Vec<_>, _>>()?,
        );
    }

    tracing::debug!(
        sites = sites.len(),
        ambiguous,
        time_points = intensity_columns.len(),
        "read phosphoproteomics dataset"
    );

    let names = |columns: Vec<(usize, String)>| -> Vec<String> {
        columns.into_iter().map(|(_, t)| t).collect()
    };
    Ok(PhosphoDataset {
        intensities: TimeCourse::new(sites.clone(), names(intensity_columns), intensities)?,
        p_values: TimeCourse::new(sites, names(p_value_columns), p_values)?,
    })
}
