use std::io::Write;

use crate::{KinactError, dataset::TimeCourse, matrix::AdjacencyMatrix};

/// Write a matrix as a dense tab-separated table
pub fn write_tsv_format<W: Write>(
    writer: &mut W,
    matrix: &AdjacencyMatrix,
) -> Result<(), KinactError> {
    write!(writer, "site")?;
    for column in matrix.columns() {
        write!(writer, "\t{}", column.display_label())?;
    }
    writeln!(writer)?;

    let mut line = vec![None; matrix.n_columns()];
    for (row, site) in matrix.rows().iter().enumerate() {
        line.iter_mut().for_each(|cell| *cell = None);
        for (column, value) in matrix.row_values(row) {
            line[column] = Some(value);
        }
        write!(writer, "{site}")?;
        for cell in &line {
            match cell {
                Some(value) => write!(writer, "\t{value}")?,
                None => write!(writer, "\t")?,
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write a time course as a tab-separated table, undefined values left empty
pub fn write_time_course_tsv<W: Write>(
    writer: &mut W,
    course: &TimeCourse,
) -> Result<(), KinactError> {
    write!(writer, "site")?;
    for time_point in course.time_points() {
        write!(writer, "\t{time_point}")?;
    }
    writeln!(writer)?;

    for (index, site) in course.sites().iter().enumerate() {
        write!(writer, "{site}")?;
        for value in course.row(index) {
            match value {
                Some(value) => write!(writer, "\t{value}")?,
                None => write!(writer, "\t")?,
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}
