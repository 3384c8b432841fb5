//! Output formatting for adjacency matrices and time courses.
//!
//! ## Supported Formats
//!
//! - **TSV**: dense site × enzyme table
//! - **Long**: one line per defined cell
//!
//! ## Examples
//!
//! ```rust,no_run
//! use kinact_core::config::MatrixFormat;
//! use kinact_core::io::read_prediction_records;
//! use kinact_core::output::write_matrix;
//! use kinact_core::prediction::PredictionMatrixBuilder;
//! use std::io::stdout;
//!
//! let records = read_prediction_records("networkin_results.tsv")?;
//! let matrix = PredictionMatrixBuilder::default().build(&records)?;
//!
//! write_matrix(&mut stdout(), &matrix, MatrixFormat::Tsv)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{KinactError, config::MatrixFormat, dataset::TimeCourse, matrix::AdjacencyMatrix};
use std::io::Write;

mod formats {
    pub mod long;
    pub mod tsv;
}

use formats::{
    long::write_long_format,
    tsv::{write_time_course_tsv, write_tsv_format},
};

/// Writes an adjacency matrix in the requested format.
///
/// # Errors
///
/// Returns [`KinactError::IoError`] if writing fails.
pub fn write_matrix<W: Write>(
    writer: &mut W,
    matrix: &AdjacencyMatrix,
    format: MatrixFormat,
) -> Result<(), KinactError> {
    match format {
        MatrixFormat::Tsv => write_tsv_format(writer, matrix),
        MatrixFormat::Long => write_long_format(writer, matrix),
    }
}

/// Writes a time course as a tab-separated table.
///
/// # Errors
///
/// Returns [`KinactError::IoError`] if writing fails.
pub fn write_time_course<W: Write>(
    writer: &mut W,
    course: &TimeCourse,
) -> Result<(), KinactError> {
    write_time_course_tsv(writer, course)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{EnzymeColumn, MatrixBuilder};
    use std::io::Cursor;

    fn create_test_matrix() -> AdjacencyMatrix {
        let mut builder = MatrixBuilder::new();
        let a = builder.add_row("A_S1");
        builder.add_row("B_T2");
        let k = builder.add_column(EnzymeColumn::labelled("K1"));
        builder.set(a, k, 1.0);
        builder.build()
    }

    #[test]
    fn test_write_matrix_tsv_format() {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);

        let result = write_matrix(&mut cursor, &create_test_matrix(), MatrixFormat::Tsv);
        assert!(result.is_ok());

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "site\tK1\nA_S1\t1\nB_T2\t\n");
    }

    #[test]
    fn test_write_matrix_long_format() {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);

        let result = write_matrix(&mut cursor, &create_test_matrix(), MatrixFormat::Long);
        assert!(result.is_ok());

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "site\tenzyme\tvalue\nA_S1\tK1\t1\n");
    }

    #[test]
    fn test_write_matrix_empty() {
        for format in [MatrixFormat::Tsv, MatrixFormat::Long] {
            let mut buffer = Vec::new();
            let result = write_matrix(&mut buffer, &AdjacencyMatrix::default(), format);
            assert!(result.is_ok(), "Failed to write empty matrix as {format:?}");

            let output = String::from_utf8(buffer).unwrap();
            assert_eq!(output.lines().count(), 1, "Expected header only for {format:?}");
        }
    }
}
