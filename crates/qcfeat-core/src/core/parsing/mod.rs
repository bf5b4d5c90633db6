//! Grammars that turn raw descriptor strings into structured records.
//!
//! Each descriptor field is a whitespace-separated repetition of one small
//! entry grammar. Parsing scans the whole field for entries; any non-blank
//! text left between (or around) recognized entries is reported as a rejected
//! fragment and logged, and the remaining entries are still returned. A field
//! that matches nothing yields an empty record set rather than an error.
//!
//! Blank fields and the `"- 0"` sentinel parse to an empty set without
//! rejections, for every field kind.
//!
//! Atomic charges, overlap charges and bond orders are emitted with 0-based
//! indices; the parsers keep those as raw indices ([`RawAtomCharge`],
//! [`RawBondValue`]) so the shift to 1-based indices stays an explicit step.
//! Bond lengths and nearest neighbors are already 1-based and parse straight
//! into model types.

mod grammar;

use crate::core::missing;
use crate::core::models::atom::{AtomLabel, NeighborEntry};
use crate::core::models::bond::{BondKey, BondValue};
use regex::{Captures, Regex};
use std::fmt;
use tracing::warn;

/// The five descriptor fields this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    AtomicCharges,
    OverlapCharges,
    BondOrders,
    BondLengths,
    NearestNeighbors,
}

impl FieldKind {
    /// Input column carrying this field.
    pub fn column(&self) -> &'static str {
        match self {
            Self::AtomicCharges => "ATOMIC_CHARGES",
            Self::OverlapCharges => "OVERLAP_CHARGES",
            Self::BondOrders => "BOND_ORDERS",
            Self::BondLengths => "BOND_LENGTH",
            Self::NearestNeighbors => "NEAREST_NEIGHBORS",
        }
    }

    /// Whether the field's atom indices start at zero and need reconciling.
    pub fn is_zero_based(&self) -> bool {
        matches!(
            self,
            Self::AtomicCharges | Self::OverlapCharges | Self::BondOrders
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Records recognized in one field plus the fragments that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub rejected: Vec<String>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> Parsed<T> {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn reject(&mut self, fragment: &str, kind: FieldKind) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        warn!(field = %kind, fragment, "Skipping malformed descriptor entry.");
        self.rejected.push(fragment.to_string());
    }
}

/// An atomic charge before index reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAtomCharge {
    pub symbol: String,
    pub raw_index: u32,
    pub charge: f64,
}

/// One atom reference inside a `B(i-Sym,j-Sym)` entry, index still 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAtomRef {
    pub raw_index: u32,
    pub symbol: String,
}

/// An overlap-charge or bond-order entry before index reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBondValue {
    pub first: RawAtomRef,
    pub second: RawAtomRef,
    pub value: f64,
}

/// Parses `"<idx> <Sym> : <charge> ..."`.
pub fn parse_atomic_charges(field: &str) -> Parsed<RawAtomCharge> {
    scan(field, FieldKind::AtomicCharges, &grammar::ATOMIC_CHARGE, |caps| {
        Some(RawAtomCharge {
            raw_index: caps[1].parse().ok()?,
            symbol: caps[2].to_string(),
            charge: caps[3].parse().ok()?,
        })
    })
}

/// Parses `"B(<i1>-<Sym1>,<i2>-<Sym2>) : <value> ..."`.
///
/// Bond orders are rounded to the nearest integer with ties going to the even
/// neighbour: the feature set treats an order as a discrete multiplicity.
pub fn parse_bond_values(field: &str, kind: FieldKind) -> Parsed<RawBondValue> {
    let round = kind == FieldKind::BondOrders;
    scan(field, kind, &grammar::BOND_VALUE, |caps| {
        let value: f64 = caps[5].parse().ok()?;
        Some(RawBondValue {
            first: RawAtomRef {
                raw_index: caps[1].parse().ok()?,
                symbol: caps[2].to_string(),
            },
            second: RawAtomRef {
                raw_index: caps[3].parse().ok()?,
                symbol: caps[4].to_string(),
            },
            value: if round { value.round_ties_even() } else { value },
        })
    })
}

/// Parses `"<Sym1><i1>-<Sym2><i2> <length> ..."`; indices are already 1-based.
pub fn parse_bond_lengths(field: &str) -> Parsed<BondValue> {
    scan(field, FieldKind::BondLengths, &grammar::BOND_LENGTH, |caps| {
        let first = AtomLabel::new(&caps[1], caps[2].parse().ok()?);
        let second = AtomLabel::new(&caps[3], caps[4].parse().ok()?);
        Some(BondValue::new(
            BondKey::new(first, second),
            caps[5].parse().ok()?,
        ))
    })
}

/// Parses `"<Sym>(<idx>) <count> ..."`.
///
/// The sentinel `"- 0"` returns an empty set (single-atom species), which is
/// distinct from an entry such as `"C(1) 0"` carrying a zero count.
pub fn parse_nearest_neighbors(field: &str) -> Parsed<NeighborEntry> {
    scan(
        field,
        FieldKind::NearestNeighbors,
        &grammar::NEAREST_NEIGHBOR,
        |caps| {
            Some(NeighborEntry::new(
                AtomLabel::new(&caps[1], caps[2].parse().ok()?),
                caps[3].parse().ok()?,
            ))
        },
    )
}

/// Collects every grammar match in `field`; text between matches is rejected.
fn scan<T>(
    field: &str,
    kind: FieldKind,
    pattern: &Regex,
    mut build: impl FnMut(&Captures<'_>) -> Option<T>,
) -> Parsed<T> {
    let mut parsed = Parsed::default();
    if missing::is_empty_field(field) {
        return parsed;
    }

    let mut cursor = 0;
    for caps in pattern.captures_iter(field) {
        let Some(entry) = caps.get(0) else {
            continue;
        };
        parsed.reject(&field[cursor..entry.start()], kind);
        match build(&caps) {
            Some(record) => parsed.records.push(record),
            // Numeric overflow in an otherwise well-formed entry.
            None => parsed.reject(entry.as_str(), kind),
        }
        cursor = entry.end();
    }
    parsed.reject(&field[cursor..], kind);

    if parsed.records.is_empty() {
        warn!(field = %kind, "Descriptor field did not match its grammar; no records extracted.");
    }
    parsed
}
