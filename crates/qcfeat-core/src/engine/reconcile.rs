//! Shifts 0-based atom indices onto the 1-based numbering of the structure toolkit.
//!
//! `ATOMIC_CHARGES`, `OVERLAP_CHARGES` and `BOND_ORDERS` are emitted with
//! 0-based indices while `BOND_LENGTH` and `NEAREST_NEIGHBORS` are 1-based.
//! Every cross-field join keys on the index, so this step must run before
//! bond matching or basin-charge lookups.

use super::diagnostics::{Diagnostic, Diagnostics};
use crate::core::models::atom::{AtomCharge, AtomLabel};
use crate::core::models::bond::{BondKey, BondValue};
use crate::core::parsing::{FieldKind, RawAtomCharge, RawAtomRef, RawBondValue};
use std::collections::HashMap;

/// `n → n + 1`; `None` if the result would not fit.
#[inline]
pub fn shift_index(raw: u32) -> Option<u32> {
    raw.checked_add(1)
}

/// Builds a 1-based label from a raw index; the symbol is kept verbatim.
pub fn reconcile_label(symbol: &str, raw_index: u32) -> Option<AtomLabel> {
    shift_index(raw_index).map(|index| AtomLabel::new(symbol, index))
}

/// Reconciles parsed atomic charges. Repeated labels keep the last charge.
pub fn reconcile_charges(
    raw: Vec<RawAtomCharge>,
    diagnostics: &mut Diagnostics,
) -> Vec<AtomCharge> {
    let mut charges: Vec<AtomCharge> = Vec::with_capacity(raw.len());
    let mut positions: HashMap<AtomLabel, usize> = HashMap::new();

    for entry in raw {
        let Some(label) = reconcile_label(&entry.symbol, entry.raw_index) else {
            diagnostics.record(Diagnostic::IndexOverflow {
                field: FieldKind::AtomicCharges,
                raw_index: entry.raw_index,
            });
            continue;
        };
        match positions.get(&label) {
            Some(&pos) => {
                diagnostics.record(Diagnostic::DuplicateAtom {
                    label: label.clone(),
                });
                charges[pos].charge = entry.charge;
            }
            None => {
                positions.insert(label.clone(), charges.len());
                charges.push(AtomCharge::new(label, entry.charge));
            }
        }
    }
    charges
}

/// Reconciles bond records into canonical bond keys.
///
/// Indices are shifted only when `field` is emitted 0-based.
pub fn reconcile_bond_values(
    raw: Vec<RawBondValue>,
    field: FieldKind,
    diagnostics: &mut Diagnostics,
) -> Vec<BondValue> {
    let mut values = Vec::with_capacity(raw.len());
    for entry in raw {
        let first = reconcile_ref(&entry.first, field, diagnostics);
        let second = reconcile_ref(&entry.second, field, diagnostics);
        if let (Some(first), Some(second)) = (first, second) {
            values.push(BondValue::new(BondKey::new(first, second), entry.value));
        }
    }
    values
}

fn reconcile_ref(
    atom: &RawAtomRef,
    field: FieldKind,
    diagnostics: &mut Diagnostics,
) -> Option<AtomLabel> {
    if !field.is_zero_based() {
        return Some(AtomLabel::new(&atom.symbol, atom.raw_index));
    }
    let label = reconcile_label(&atom.symbol, atom.raw_index);
    if label.is_none() {
        diagnostics.record(Diagnostic::IndexOverflow {
            field,
            raw_index: atom.raw_index,
        });
    }
    label
}
