use super::TableError;
use super::traits::TabularFile;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::debug;

/// Columns every descriptor table must carry. Any other column is ignored.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "REACTION_ID",
    "MOLECULE_INDEX",
    "SMILES",
    "MOLECULE_TYPE",
    "ATOMIC_CHARGES",
    "OVERLAP_CHARGES",
    "BOND_ORDERS",
    "BOND_LENGTH",
    "NEAREST_NEIGHBORS",
];

/// One molecule as written by the upstream tools, all fields still raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawMoleculeRow {
    #[serde(rename = "REACTION_ID")]
    pub reaction_id: String,
    #[serde(rename = "MOLECULE_INDEX")]
    pub molecule_index: String,
    #[serde(rename = "SMILES")]
    pub smiles: String,
    #[serde(rename = "MOLECULE_TYPE")]
    pub molecule_type: String,
    #[serde(rename = "ATOMIC_CHARGES")]
    pub atomic_charges: String,
    #[serde(rename = "OVERLAP_CHARGES")]
    pub overlap_charges: String,
    #[serde(rename = "BOND_ORDERS")]
    pub bond_orders: String,
    #[serde(rename = "BOND_LENGTH")]
    pub bond_length: String,
    #[serde(rename = "NEAREST_NEIGHBORS")]
    pub nearest_neighbors: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorTable {
    pub rows: Vec<RawMoleculeRow>,
}

impl DescriptorTable {
    pub fn new(rows: Vec<RawMoleculeRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Returns the first required column absent from `headers`.
pub fn find_missing_column(headers: &[&str]) -> Option<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .find(|required| !headers.contains(*required))
        .copied()
}

impl TabularFile for DescriptorTable {
    type Error = TableError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let names: Vec<&str> = headers.iter().collect();
        if let Some(column) = find_missing_column(&names) {
            return Err(TableError::MissingColumn {
                column: column.to_string(),
            });
        }

        let rows = csv_reader
            .deserialize::<RawMoleculeRow>()
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = rows.len(), columns = headers.len(), "Read descriptor table.");
        Ok(Self { rows })
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if self.rows.is_empty() {
            csv_writer.write_record(REQUIRED_COLUMNS)?;
        }
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
