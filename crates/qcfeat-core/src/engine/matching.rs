//! Joins the three bond fields into one [`BondDescriptor`] per physical bond.
//!
//! Records are matched on [`BondKey`], which is already order-independent, so
//! `B(1-C,2-H)` in one field and `B(2-H,1-C)` in another land on the same bond.
//! A measurement with no record in its field stays `None`.

use super::config::BondScope;
use super::diagnostics::{Diagnostic, Diagnostics};
use crate::core::models::atom::{AtomCharge, AtomLabel};
use crate::core::models::bond::{BondDescriptor, BondKey, BondValue, Measurement};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// One descriptor per distinct key, sorted by key.
    pub bonds: Vec<BondDescriptor>,
    pub diagnostics: Diagnostics,
}

pub fn match_bonds(
    orders: Vec<BondValue>,
    overlaps: Vec<BondValue>,
    lengths: Vec<BondValue>,
    scope: BondScope,
) -> MatchOutcome {
    let mut diagnostics = Diagnostics::new();
    let mut table: BTreeMap<BondKey, BondDescriptor> = BTreeMap::new();

    for (measurement, values) in [
        (Measurement::Order, orders),
        (Measurement::OverlapCharge, overlaps),
        (Measurement::Length, lengths),
    ] {
        for BondValue { key, value } in values {
            let slot = table
                .entry(key.clone())
                .or_insert_with(|| BondDescriptor::empty(key.clone()))
                .slot_mut(measurement);
            if slot.is_some() {
                diagnostics.record(Diagnostic::DuplicateBond { key, measurement });
            }
            *slot = Some(value);
        }
    }

    if scope == BondScope::Bonded {
        let before = table.len();
        table.retain(|_, bond| bond.length.is_some());
        debug!(
            dropped = before - table.len(),
            "Restricted bond records to pairs with a bond length."
        );
    }

    report_symbol_conflicts(table.keys(), &mut diagnostics);

    for bond in table.values() {
        let missing = match (bond.order, bond.overlap_charge) {
            (Some(_), None) => Some(Measurement::OverlapCharge),
            (None, Some(_)) => Some(Measurement::Order),
            _ => None,
        };
        if let Some(missing) = missing {
            diagnostics.record(Diagnostic::UnmatchedBond {
                key: bond.key.clone(),
                missing,
            });
        }
    }

    MatchOutcome {
        bonds: table.into_values().collect(),
        diagnostics,
    }
}

/// Reports bond atoms that carry no atomic charge.
///
/// Nothing is reported when `charges` is empty, since then the charge field
/// itself was missing rather than inconsistent.
pub fn check_bond_atoms(
    bonds: &[BondDescriptor],
    charges: &[AtomCharge],
    diagnostics: &mut Diagnostics,
) {
    if charges.is_empty() {
        return;
    }
    let known: HashSet<&AtomLabel> = charges.iter().map(|atom| &atom.label).collect();
    for bond in bonds {
        for label in [bond.key.first(), bond.key.second()] {
            if !known.contains(label) {
                diagnostics.record(Diagnostic::DanglingBondAtom {
                    key: bond.key.clone(),
                    label: label.clone(),
                });
            }
        }
    }
}

/// Keys naming the same index pair with different symbols are an inconsistency
/// between fields. Both are kept apart and neither is preferred.
fn report_symbol_conflicts<'a>(
    keys: impl Iterator<Item = &'a BondKey>,
    diagnostics: &mut Diagnostics,
) {
    let mut seen: HashMap<(u32, u32), &BondKey> = HashMap::new();
    for key in keys {
        match seen.get(&key.index_pair()) {
            Some(first) => diagnostics.record(Diagnostic::SymbolConflict {
                first: (*first).clone(),
                second: key.clone(),
            }),
            None => {
                seen.insert(key.index_pair(), key);
            }
        }
    }
}
