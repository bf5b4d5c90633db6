//! Reduces one [`MoleculeRecord`] to its fixed-width [`FeatureVector`].
//!
//! Every statistic is computed over *measured* values only
//! ([`missing::is_measured`]); an empty qualifying set yields `None`.

use super::config::FeaturizeConfig;
use super::diagnostics::{Diagnostic, Diagnostics};
use crate::core::missing;
use crate::core::models::features::FeatureVector;
use crate::core::models::molecule::MoleculeRecord;
use crate::core::stats;

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // Keep the value untouched if scaling overflowed.
    if rounded.is_finite() { rounded } else { value }
}

pub fn compute_features(
    record: &MoleculeRecord,
    config: &FeaturizeConfig,
) -> (FeatureVector, Vec<Diagnostic>) {
    let mut diagnostics = Diagnostics::new();

    let charges: Vec<f64> = record
        .charges
        .iter()
        .map(|atom| atom.charge)
        .filter(|c| missing::is_measured(*c))
        .collect();

    let products: Vec<f64> = record
        .bonds
        .iter()
        .filter_map(|bond| {
            let order = missing::measured(bond.order)?;
            let overlap = missing::measured(bond.overlap_charge)?;
            Some(order * overlap).filter(|p| missing::is_measured(*p))
        })
        .collect();

    let lengths: Vec<f64> = record
        .bonds
        .iter()
        .filter_map(|bond| bond.length)
        .filter(|l| missing::is_measured(*l) && *l > 0.0)
        .collect();

    let features = FeatureVector {
        sum_atomic_charges: stats::sum(&charges).map(|s| round_to(s, config.sum_decimals)),
        sum_bond_order_overlap: stats::sum(&products),
        mean_atomic_charges: stats::mean(&charges),
        median_atomic_charges: stats::median(&charges),
        std_atomic_charges: stats::sample_std(&charges),
        min_atomic_charges: stats::min(&charges),
        max_atomic_charges: stats::max(&charges),
        range_atomic_charges: stats::range(&charges),
        mean_bond_order_overlap: stats::mean(&products),
        median_bond_order_overlap: stats::median(&products),
        std_bond_order_overlap: stats::sample_std(&products),
        min_bond_order_overlap: stats::min(&products),
        max_bond_order_overlap: stats::max(&products),
        range_bond_order_overlap: stats::range(&products),
        atomic_basin_charge: basin_charge(record, &mut diagnostics),
        weighted_average_bond_length: weighted_average_bond_length(record),
        min_bond_length: stats::min(&lengths),
        max_bond_length: stats::max(&lengths),
        std_bond_length: stats::sample_std(&lengths),
        var_bond_length: stats::sample_variance(&lengths),
        range_bond_length: stats::range(&lengths),
        iqr_bond_length: stats::iqr(&lengths),
    };

    (features, diagnostics.into_vec())
}

/// `Σ neighbor_count × charge` over neighbor entries with a measured charge.
///
/// With no neighbor entries (single-atom species) the value is the atom's own
/// charge. A neighbor entry with count zero still counts as an entry.
fn basin_charge(record: &MoleculeRecord, diagnostics: &mut Diagnostics) -> Option<f64> {
    if record.neighbors.is_empty() {
        let mut measured = record
            .charges
            .iter()
            .map(|atom| atom.charge)
            .filter(|c| missing::is_measured(*c));
        let own = measured.next()?;
        let others = measured.count();
        if others > 0 {
            diagnostics.record(Diagnostic::AmbiguousSingleAtom {
                charges: others + 1,
            });
        }
        return Some(own);
    }

    let mut total = None;
    for entry in &record.neighbors {
        match record.charge_of(&entry.label) {
            Some(charge) if missing::is_measured(charge) => {
                *total.get_or_insert(0.0) += f64::from(entry.neighbor_count) * charge;
            }
            Some(_) => diagnostics.record(Diagnostic::UnmeasuredNeighbor {
                label: entry.label.clone(),
            }),
            None => diagnostics.record(Diagnostic::DanglingNeighbor {
                label: entry.label.clone(),
            }),
        }
    }
    total
}

/// `Σ length × order / Σ order` over bonds with both measured.
fn weighted_average_bond_length(record: &MoleculeRecord) -> Option<f64> {
    let (weighted, total_order) = record
        .bonds
        .iter()
        .filter_map(|bond| {
            let length = missing::measured(bond.length)?;
            let order = missing::measured(bond.order)?;
            Some((length, order))
        })
        .fold((0.0, 0.0), |(w, t), (length, order)| {
            (w + length * order, t + order)
        });

    if total_order > 0.0 {
        Some(weighted / total_order)
    } else {
        None
    }
}
