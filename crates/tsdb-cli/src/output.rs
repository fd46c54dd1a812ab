//! Query result rendering.
//!
//! Turns a `/query` response body into text:
//!
//! ```text
//! name: cpu
//! tags: host=server01, region=us-west
//! +------+-------+
//! | time | value |
//! +------+-------+
//! | 1000 | 42    |
//! +------+-------+
//! 2 columns, 1 rows in set
//!
//! ```

use std::io::Write;

use crate::error::CliError;
use crate::model::{QueryResult, Series};

/// Decode `body` and write every series it contains.
///
/// Nothing is written if the body does not decode.
///
/// # Errors
///
/// Returns [`CliError::Decode`] for an undecodable body, or an IO error if
/// writing fails.
pub fn render_response<W: Write>(writer: &mut W, body: &[u8]) -> Result<(), CliError> {
    let result = QueryResult::from_slice(body)?;
    render_result(writer, &result)
}

/// Write every series of an already decoded result, then any server errors.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render_result<W: Write>(writer: &mut W, result: &QueryResult) -> Result<(), CliError> {
    for series in result.results.iter().flat_map(|r| &r.series) {
        render_series(writer, series)?;
    }
    for error in result.errors() {
        writeln!(writer, "ERR: {error}")?;
    }
    Ok(())
}

/// Write one series: name, tags, table and caption.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render_series<W: Write>(writer: &mut W, series: &Series) -> Result<(), CliError> {
    if let Some(name) = series.name.as_deref().filter(|n| !n.is_empty()) {
        writeln!(writer, "name: {name}")?;
    }

    let tags = series.sorted_tags();
    if !tags.is_empty() {
        writeln!(writer, "tags: {}", tags.join(", "))?;
    }

    let rows: Vec<Vec<String>> = series
        .values
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();
    Table::new(&series.columns, &rows).write(writer)?;

    writeln!(
        writer,
        "{} columns, {} rows in set",
        series.columns.len(),
        series.values.len()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Aligned text table with `+---+` borders.
///
/// The column count is fixed by the header; body rows that are too long are
/// cut and rows that are too short are padded with empty cells.
#[derive(Debug)]
pub struct Table<'a> {
    header: &'a [String],
    rows: &'a [Vec<String>],
    widths: Vec<usize>,
}

impl<'a> Table<'a> {
    /// Lay out a table.
    #[must_use]
    pub fn new(header: &'a [String], rows: &'a [Vec<String>]) -> Self {
        let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(cell));
            }
        }
        Self {
            header,
            rows,
            widths,
        }
    }

    /// Write the table. A table without columns writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.widths.is_empty() {
            return Ok(());
        }

        self.write_border(writer)?;
        self.write_row(writer, self.header)?;
        self.write_border(writer)?;
        for row in self.rows {
            self.write_row(writer, row)?;
        }
        self.write_border(writer)?;
        Ok(())
    }

    fn write_border<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let mut line = String::from("+");
        for width in &self.widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        writeln!(writer, "{line}")?;
        Ok(())
    }

    fn write_row<W: Write>(&self, writer: &mut W, cells: &[String]) -> Result<(), CliError> {
        let mut line = String::from("|");
        for (i, width) in self.widths.iter().enumerate() {
            let cell = cells.get(i).map_or("", String::as_str);
            let padding = width - display_width(cell);
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(padding + 1));
            line.push('|');
        }
        writeln!(writer, "{line}")?;
        Ok(())
    }
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}
