use std::cmp::Ordering;
use std::fmt;

/// Identifies one atom inside a molecule by its element symbol and 1-based index.
///
/// Labels order by index first and fall back to the symbol, which gives every
/// pair of labels a deterministic order even for degenerate inputs where two
/// different symbols claim the same index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomLabel {
    /// Element symbol as written by the quantum-chemistry tool (e.g. "C", "Cl").
    pub symbol: String,
    /// 1-based atom index, consistent with the structure toolkit's numbering.
    pub index: u32,
}

impl AtomLabel {
    pub fn new(symbol: impl Into<String>, index: u32) -> Self {
        Self {
            symbol: symbol.into(),
            index,
        }
    }

    /// Stem used for wide-table column names (`C_1`).
    pub fn column_stem(&self) -> String {
        format!("{}_{}", self.symbol, self.index)
    }
}

impl Ord for AtomLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index
            .cmp(&other.index)
            .then_with(|| self.symbol.cmp(&other.symbol))
    }
}

impl PartialOrd for AtomLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AtomLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.symbol, self.index)
    }
}

/// A partial atomic charge attached to one labelled atom.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomCharge {
    pub label: AtomLabel,
    pub charge: f64,
}

impl AtomCharge {
    pub fn new(label: AtomLabel, charge: f64) -> Self {
        Self { label, charge }
    }

    /// Wide-table column holding this charge (`C_1_charge`).
    pub fn column_name(&self) -> String {
        format!("{}_charge", self.label.column_stem())
    }
}

/// Nearest-neighbor count for one atom, taken from the structure toolkit output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborEntry {
    pub label: AtomLabel,
    pub neighbor_count: u32,
}

impl NeighborEntry {
    pub fn new(label: AtomLabel, neighbor_count: u32) -> Self {
        Self {
            label,
            neighbor_count,
        }
    }
}
