use std::io::Write;

use crate::{KinactError, matrix::AdjacencyMatrix};

/// Write the defined cells of a matrix, one `site\tenzyme\tvalue` line each
pub fn write_long_format<W: Write>(
    writer: &mut W,
    matrix: &AdjacencyMatrix,
) -> Result<(), KinactError> {
    writeln!(writer, "site\tenzyme\tvalue")?;
    for (site, column, value) in matrix.cells() {
        writeln!(writer, "{}\t{}\t{}", site, column.display_label(), value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{EnzymeColumn, MatrixBuilder};

    #[test]
    fn test_write_long_format_row_major() {
        let mut builder = MatrixBuilder::new();
        let b = builder.add_row("B_T10");
        let a = builder.add_row("A_S59");
        let k1 = builder.add_column(EnzymeColumn::labelled("K1"));
        let p1 = builder.add_column(EnzymeColumn::labelled("P1"));
        builder.set(a, p1, -1.0);
        builder.set(b, k1, 0.5);
        builder.set(a, k1, 1.0);

        let mut buffer = Vec::new();
        write_long_format(&mut buffer, &builder.build()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "site\tenzyme\tvalue\nB_T10\tK1\t0.5\nA_S59\tK1\t1\nA_S59\tP1\t-1\n"
        );
    }

    #[test]
    fn test_write_long_format_unlabeled_column() {
        let mut builder = MatrixBuilder::new();
        let row = builder.add_row("A_S59");
        let col = builder.add_column(EnzymeColumn::new(None, "Q99999"));
        builder.set(row, col, 1.0);

        let mut buffer = Vec::new();
        write_long_format(&mut buffer, &builder.build()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "site\tenzyme\tvalue\nA_S59\tNA\t1\n");
    }
}
