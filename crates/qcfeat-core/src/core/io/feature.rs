use super::TableError;
use super::traits::TabularFile;
use crate::core::missing::DEFAULT_MISSING_MARKER;
use std::borrow::Cow;
use std::io::{BufRead, Write};
use tracing::debug;

/// One value of a feature table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Self::Number(v),
            _ => Self::Missing,
        }
    }

    /// Interprets raw text: blank and non-finite numbers are missing.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Self::from_option(Some(v)),
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text written for this cell; missing cells use `missing_marker`.
    pub fn render<'a>(&'a self, missing_marker: &'a str) -> Cow<'a, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Number(v) => Cow::Owned(v.to_string()),
            Self::Missing => Cow::Borrowed(missing_marker),
        }
    }
}

/// A rectangular table of named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
    missing_marker: String,
}

impl FeatureTable {
    pub fn new(columns: Vec<String>, missing_marker: impl Into<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            missing_marker: missing_marker.into(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn missing_marker(&self) -> &str {
        &self.missing_marker
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Appends a row, which must have exactly one cell per column.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                row: self.rows.len() + 1,
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// The cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }

    /// Numeric values of a column with missing and text cells skipped.
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|cells| cells.filter_map(Cell::as_number).collect())
    }
}

impl TabularFile for FeatureTable {
    type Error = TableError;

    /// Cells holding the default marker (`NaN`) or nothing at all read back as missing.
    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();
        let mut table = FeatureTable::new(columns, DEFAULT_MISSING_MARKER);
        for record in csv_reader.records() {
            let record = record?;
            table.push_row(record.iter().map(Cell::parse).collect())?;
        }
        debug!(rows = table.len(), columns = table.columns.len(), "Read feature table.");
        Ok(table)
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            let rendered: Vec<Cow<'_, str>> = row
                .iter()
                .map(|cell| cell.render(&self.missing_marker))
                .collect();
            csv_writer.write_record(rendered.iter().map(|text| text.as_bytes()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample(marker: &str) -> FeatureTable {
        let mut table = FeatureTable::new(
            vec!["REACTION_ID".into(), "mean".into(), "C_1_charge".into()],
            marker,
        );
        table
            .push_row(vec![
                Cell::Text("R1".into()),
                Cell::Number(-0.25),
                Cell::Number(0.0),
            ])
            .unwrap();
        table
            .push_row(vec![Cell::Text("R2".into()), Cell::Missing, Cell::Number(1.0)])
            .unwrap();
        table
    }

    #[test]
    fn missing_cells_are_written_with_the_marker() {
        let mut buffer = Vec::new();
        sample("NA").write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "REACTION_ID,mean,C_1_charge\nR1,-0.25,0\nR2,NA,1\n");
    }

    #[test]
    fn default_marker_reads_back_as_missing() {
        let table = sample("NaN");
        let mut buffer = Vec::new();
        table.write_to(&mut buffer).unwrap();
        let reread = FeatureTable::read_from(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(reread.rows(), table.rows());
        assert_eq!(reread.numeric_values("mean"), Some(vec![-0.25]));
    }

    #[test]
    fn push_row_rejects_wrong_width() {
        let mut table = FeatureTable::new(vec!["a".into(), "b".into()], "NaN");
        let err = table.push_row(vec![Cell::Missing]).unwrap_err();
        assert!(matches!(
            err,
            TableError::RowWidth {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn cell_parse_classifies_text() {
        assert_eq!(Cell::parse(""), Cell::Missing);
        assert_eq!(Cell::parse("nan"), Cell::Missing);
        assert_eq!(Cell::parse("inf"), Cell::Missing);
        assert_eq!(Cell::parse(" 1.5 "), Cell::Number(1.5));
        assert_eq!(Cell::parse("CCO"), Cell::Text("CCO".into()));
    }

    #[test]
    fn unknown_column_has_no_values() {
        assert!(sample("NaN").column("nope").is_none());
    }
}
