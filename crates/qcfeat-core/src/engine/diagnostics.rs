use crate::core::models::atom::AtomLabel;
use crate::core::models::bond::{BondKey, Measurement};
use crate::core::parsing::FieldKind;
use std::fmt;
use tracing::warn;

/// A recoverable problem found while processing one row.
///
/// None of these abort processing; each degrades the row to partial or
/// missing features and is kept so callers can count and report it.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Text in a descriptor field that did not match the field's grammar.
    GrammarMismatch { field: FieldKind, fragment: String },
    /// A raw index too large to shift to 1-based numbering.
    IndexOverflow { field: FieldKind, raw_index: u32 },
    /// The same atom appeared twice in the atomic charge field.
    DuplicateAtom { label: AtomLabel },
    /// The same bond appeared twice in one bond field; the later value was kept.
    DuplicateBond {
        key: BondKey,
        measurement: Measurement,
    },
    /// An order or overlap-charge record without its counterpart.
    UnmatchedBond { key: BondKey, missing: Measurement },
    /// Two bond keys share an index pair but disagree on atom symbols.
    SymbolConflict { first: BondKey, second: BondKey },
    /// A bond references an atom that has no atomic charge.
    DanglingBondAtom { key: BondKey, label: AtomLabel },
    /// A nearest-neighbor entry references an atom that has no atomic charge.
    DanglingNeighbor { label: AtomLabel },
    /// A nearest-neighbor entry whose atom carries a zero (unmeasured) charge.
    UnmeasuredNeighbor { label: AtomLabel },
    /// No neighbor data, yet more than one atomic charge was found.
    AmbiguousSingleAtom { charges: usize },
    /// `MOLECULE_TYPE` was not one of reactant, intermediate, product.
    UnknownMoleculeType { value: String },
}

impl Diagnostic {
    /// Short machine-friendly category used when summarizing a run.
    pub fn category(&self) -> &'static str {
        match self {
            Self::GrammarMismatch { .. } | Self::IndexOverflow { .. } => "grammar-mismatch",
            Self::UnmatchedBond { .. } => "unmatched-bond",
            Self::DuplicateAtom { .. } | Self::DuplicateBond { .. } => "duplicate-record",
            Self::SymbolConflict { .. }
            | Self::DanglingBondAtom { .. }
            | Self::DanglingNeighbor { .. }
            | Self::UnmeasuredNeighbor { .. }
            | Self::AmbiguousSingleAtom { .. } => "inconsistent-record",
            Self::UnknownMoleculeType { .. } => "unknown-molecule-type",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrammarMismatch { field, fragment } => {
                write!(f, "malformed entry in {}: '{}'", field, fragment)
            }
            Self::IndexOverflow { field, raw_index } => {
                write!(f, "index {} in {} cannot be shifted", raw_index, field)
            }
            Self::DuplicateAtom { label } => write!(f, "atom {} has more than one charge", label),
            Self::DuplicateBond { key, measurement } => {
                write!(f, "bond {} has more than one {}", key, measurement)
            }
            Self::UnmatchedBond { key, missing } => {
                write!(f, "bond {} has no matching {}", key, missing)
            }
            Self::SymbolConflict { first, second } => write!(
                f,
                "bonds {} and {} share atom indices but not symbols",
                first, second
            ),
            Self::DanglingBondAtom { key, label } => {
                write!(f, "bond {} references atom {} with no charge", key, label)
            }
            Self::DanglingNeighbor { label } => {
                write!(f, "neighbor entry {} has no matching atomic charge", label)
            }
            Self::UnmeasuredNeighbor { label } => {
                write!(f, "neighbor entry {} has an unmeasured atomic charge", label)
            }
            Self::AmbiguousSingleAtom { charges } => write!(
                f,
                "no neighbor data but {} atomic charges; using the first",
                charges
            ),
            Self::UnknownMoleculeType { value } => {
                write!(f, "unrecognized molecule type '{}'", value)
            }
        }
    }
}

/// Diagnostics collected for one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and stores a diagnostic.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        warn!(category = diagnostic.category(), "{}", diagnostic);
        self.entries.push(diagnostic);
    }

    /// Stores a diagnostic that was already logged where it was detected.
    pub fn note(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, category: &str) -> usize {
        self.entries
            .iter()
            .filter(|d| d.category() == category)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> BondKey {
        BondKey::new(AtomLabel::new("C", 1), AtomLabel::new("H", 2))
    }

    #[test]
    fn display_names_the_offending_bond_and_measurement() {
        let diagnostic = Diagnostic::UnmatchedBond {
            key: key(),
            missing: Measurement::OverlapCharge,
        };
        assert_eq!(
            diagnostic.to_string(),
            "bond C1-H2 has no matching overlap charge"
        );
    }

    #[test]
    fn display_quotes_malformed_fragment() {
        let diagnostic = Diagnostic::GrammarMismatch {
            field: FieldKind::BondOrders,
            fragment: "B(1-H,x-C) : 1.0".into(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "malformed entry in BOND_ORDERS: 'B(1-H,x-C) : 1.0'"
        );
    }

    #[test]
    fn counts_by_category() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.note(Diagnostic::UnmatchedBond {
            key: key(),
            missing: Measurement::Order,
        });
        diagnostics.note(Diagnostic::IndexOverflow {
            field: FieldKind::AtomicCharges,
            raw_index: u32::MAX,
        });
        diagnostics.record(Diagnostic::GrammarMismatch {
            field: FieldKind::AtomicCharges,
            fragment: "x".into(),
        });

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count("grammar-mismatch"), 2);
        assert_eq!(diagnostics.count("unmatched-bond"), 1);
        assert_eq!(diagnostics.count("duplicate-record"), 0);
    }
}
