use crate::core::io::descriptor::{DescriptorTable, RawMoleculeRow};
use crate::core::io::feature::{Cell, FeatureTable};
use crate::core::models::atom::AtomCharge;
use crate::core::models::bond::{BondDescriptor, Measurement};
use crate::core::models::features::FeatureVector;
use crate::core::models::molecule::{MoleculeIdentity, MoleculeRecord, MoleculeType};
use crate::core::parsing::{self, FieldKind, Parsed};
use crate::engine::config::FeaturizeConfig;
use crate::engine::diagnostics::{Diagnostic, Diagnostics};
use crate::engine::error::PipelineError;
use crate::engine::features::compute_features;
use crate::engine::matching::{check_bond_atoms, match_bonds};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::reconcile::{reconcile_bond_values, reconcile_charges};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, debug_span, info, instrument};

/// Identity columns copied from the input, in output order.
pub const IDENTITY_COLUMNS: [&str; 4] = ["REACTION_ID", "MOLECULE_INDEX", "SMILES", "MOLECULE_TYPE"];

/// Everything derived from one input row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResult {
    /// 1-based position of the row in the input table.
    pub row_number: usize,
    pub identity: MoleculeIdentity,
    /// `MOLECULE_TYPE` exactly as it appeared in the input.
    pub molecule_type_text: String,
    pub features: FeatureVector,
    /// Per-atom and per-bond values keyed by wide-table column name, in first-seen order.
    pub wide: Vec<(String, f64)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Counts gathered over a whole featurization run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub rows_read: usize,
    pub duplicates_dropped: usize,
    pub rows_written: usize,
    pub wide_columns: usize,
    /// Diagnostic counts by [`Diagnostic::category`].
    pub diagnostics: BTreeMap<&'static str, usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturizeResult {
    pub table: FeatureTable,
    pub report: RunReport,
}

/// Parses, reconciles, matches and aggregates a single row.
pub fn featurize_row(
    row_number: usize,
    row: &RawMoleculeRow,
    config: &FeaturizeConfig,
) -> RowResult {
    let _span = debug_span!("row", row = row_number).entered();
    let mut diagnostics = Diagnostics::new();

    let molecule_type = match row.molecule_type.parse::<MoleculeType>() {
        Ok(kind) => Some(kind),
        Err(_) => {
            diagnostics.record(Diagnostic::UnknownMoleculeType {
                value: row.molecule_type.clone(),
            });
            None
        }
    };

    let raw_charges = take(
        parsing::parse_atomic_charges(&row.atomic_charges),
        FieldKind::AtomicCharges,
        &mut diagnostics,
    );
    let raw_overlaps = take(
        parsing::parse_bond_values(&row.overlap_charges, FieldKind::OverlapCharges),
        FieldKind::OverlapCharges,
        &mut diagnostics,
    );
    let raw_orders = take(
        parsing::parse_bond_values(&row.bond_orders, FieldKind::BondOrders),
        FieldKind::BondOrders,
        &mut diagnostics,
    );
    let lengths = take(
        parsing::parse_bond_lengths(&row.bond_length),
        FieldKind::BondLengths,
        &mut diagnostics,
    );
    let neighbors = take(
        parsing::parse_nearest_neighbors(&row.nearest_neighbors),
        FieldKind::NearestNeighbors,
        &mut diagnostics,
    );

    let charges = reconcile_charges(raw_charges, &mut diagnostics);
    let overlaps = reconcile_bond_values(raw_overlaps, FieldKind::OverlapCharges, &mut diagnostics);
    let orders = reconcile_bond_values(raw_orders, FieldKind::BondOrders, &mut diagnostics);

    let matched = match_bonds(orders, overlaps, lengths, config.bond_scope);
    diagnostics.extend(matched.diagnostics);
    check_bond_atoms(&matched.bonds, &charges, &mut diagnostics);

    let record = MoleculeRecord {
        identity: MoleculeIdentity {
            reaction_id: row.reaction_id.clone(),
            molecule_index: row.molecule_index.clone(),
            smiles: row.smiles.clone(),
            molecule_type,
        },
        charges,
        bonds: matched.bonds,
        neighbors,
    };

    let (features, feature_diagnostics) = compute_features(&record, config);
    let mut diagnostics = diagnostics.into_vec();
    diagnostics.extend(feature_diagnostics);

    debug!(
        atoms = record.charges.len(),
        bonds = record.bonds.len(),
        missing_features = features.missing_count(),
        issues = diagnostics.len(),
        "Row featurized."
    );

    RowResult {
        row_number,
        wide: wide_values(&record.charges, &record.bonds),
        identity: record.identity,
        molecule_type_text: row.molecule_type.clone(),
        features,
        diagnostics,
    }
}

/// Featurizes a whole descriptor table.
///
/// Rows are independent and may be processed in parallel; the output keeps
/// input order.
#[instrument(skip_all, name = "featurize_workflow")]
pub fn run(
    table: &DescriptorTable,
    config: &FeaturizeConfig,
    reporter: &ProgressReporter,
) -> Result<FeaturizeResult, PipelineError> {
    if table.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    info!(rows = table.len(), "Starting featurization.");

    let rows = reporter.phase("Selecting rows", || select_rows(&table.rows, config));
    let duplicates_dropped = table.len() - rows.len();
    if duplicates_dropped > 0 {
        info!(dropped = duplicates_dropped, "Dropped duplicate rows.");
    }

    let results = reporter.phase("Featurizing molecules", || {
        reporter.report(Progress::TaskStart {
            total_steps: rows.len() as u64,
        });
        let process = |&(row_number, row): &(usize, &RawMoleculeRow)| {
            let result = featurize_row(row_number, row, config);
            reporter.report(Progress::TaskIncrement);
            result
        };

        #[cfg(feature = "parallel")]
        let results: Vec<RowResult> = rows.par_iter().map(process).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<RowResult> = rows.iter().map(process).collect();

        reporter.report(Progress::TaskFinish);
        results
    });

    let table = reporter.phase("Assembling feature table", || {
        build_table(&results, config)
    })?;

    let mut report = RunReport {
        rows_read: rows.len() + duplicates_dropped,
        duplicates_dropped,
        rows_written: table.len(),
        wide_columns: table.columns().len() - fixed_column_count(),
        diagnostics: BTreeMap::new(),
    };
    for diagnostic in results.iter().flat_map(|r| r.diagnostics.iter()) {
        *report.diagnostics.entry(diagnostic.category()).or_default() += 1;
    }

    let issues: usize = report.diagnostics.values().sum();
    if issues > 0 {
        let breakdown: Vec<String> = report
            .diagnostics
            .iter()
            .map(|(category, count)| format!("{}: {}", category, count))
            .collect();
        reporter.report(Progress::Message(format!(
            "{} row issue(s) ({})",
            issues,
            breakdown.join(", ")
        )));
    }

    info!(
        rows = report.rows_written,
        wide_columns = report.wide_columns,
        issues,
        "Featurization complete."
    );
    Ok(FeaturizeResult { table, report })
}

/// Row numbers (1-based) paired with the rows to process.
fn select_rows<'a>(
    rows: &'a [RawMoleculeRow],
    config: &FeaturizeConfig,
) -> Vec<(usize, &'a RawMoleculeRow)> {
    let numbered = rows.iter().enumerate().map(|(i, row)| (i + 1, row));
    if !config.drop_duplicates {
        return numbered.collect();
    }
    let mut seen: HashSet<&RawMoleculeRow> = HashSet::with_capacity(rows.len());
    numbered.filter(|(_, row)| seen.insert(*row)).collect()
}

fn fixed_column_count() -> usize {
    IDENTITY_COLUMNS.len() + MoleculeType::ONE_HOT_ORDER.len() + FeatureVector::COLUMNS.len()
}

fn build_table(results: &[RowResult], config: &FeaturizeConfig) -> Result<FeatureTable, PipelineError> {
    let mut columns: Vec<String> = IDENTITY_COLUMNS.iter().map(|c| c.to_string()).collect();
    columns.extend(MoleculeType::ONE_HOT_ORDER.iter().map(MoleculeType::one_hot_column));
    columns.extend(FeatureVector::COLUMNS.iter().map(|c| c.to_string()));

    let wide_columns = if config.include_wide_columns {
        union_wide_columns(results)
    } else {
        Vec::new()
    };
    let wide_positions: HashMap<&str, usize> = wide_columns
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();
    columns.extend(wide_columns.iter().cloned());

    let mut table = FeatureTable::new(columns, config.missing_marker.clone());
    for result in results {
        let identity = &result.identity;
        let mut row: Vec<Cell> = vec![
            Cell::Text(identity.reaction_id.clone()),
            Cell::Text(identity.molecule_index.clone()),
            Cell::Text(identity.smiles.clone()),
            Cell::Text(result.molecule_type_text.clone()),
        ];
        row.extend(identity.one_hot().into_iter().map(Cell::Number));
        row.extend(result.features.values().into_iter().map(Cell::from_option));

        if config.include_wide_columns {
            let mut wide = vec![config.wide_fill_value; wide_columns.len()];
            for (name, value) in &result.wide {
                if let Some(&i) = wide_positions.get(name.as_str()) {
                    wide[i] = *value;
                }
            }
            row.extend(wide.into_iter().map(Cell::Number));
        }
        table.push_row(row)?;
    }
    Ok(table)
}

/// Wide column names across all rows, in order of first appearance.
fn union_wide_columns(results: &[RowResult]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns = Vec::new();
    for (name, _) in results.iter().flat_map(|r| r.wide.iter()) {
        if seen.insert(name.as_str()) {
            columns.push(name.clone());
        }
    }
    columns
}

fn wide_values(charges: &[AtomCharge], bonds: &[BondDescriptor]) -> Vec<(String, f64)> {
    let atoms = charges
        .iter()
        .map(|atom| (atom.column_name(), atom.charge));
    let bonds = bonds.iter().flat_map(|bond| {
        [Measurement::OverlapCharge, Measurement::Order, Measurement::Length]
            .into_iter()
            .filter_map(move |m| bond.get(m).map(|v| (bond.key.column_name(m), v)))
    });
    atoms.chain(bonds).collect()
}

/// Moves parsed records out, noting every rejected fragment as a grammar mismatch.
fn take<T>(parsed: Parsed<T>, field: FieldKind, diagnostics: &mut Diagnostics) -> Vec<T> {
    for fragment in parsed.rejected {
        diagnostics.note(Diagnostic::GrammarMismatch { field, fragment });
    }
    parsed.records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{BondScope, FeaturizeConfigBuilder};

    const TOL: f64 = 1e-12;

    fn methanol(reaction: &str, kind: &str) -> RawMoleculeRow {
        RawMoleculeRow {
            reaction_id: reaction.into(),
            molecule_index: "1".into(),
            smiles: "CO".into(),
            molecule_type: kind.into(),
            atomic_charges: "0 C : -0.2 1 O : -0.6 2 H : 0.4".into(),
            overlap_charges: "B(0-C,1-O) : 0.5 B(2-H,1-O) : 0.6".into(),
            bond_orders: "B(1-O,0-C) : 0.96 B(1-O,2-H) : 1.02".into(),
            bond_length: "C1-O2 1.43 O2-H3 0.96".into(),
            nearest_neighbors: "C(1) 1 O(2) 2 H(3) 1".into(),
        }
    }

    fn sodium() -> RawMoleculeRow {
        RawMoleculeRow {
            reaction_id: "R2".into(),
            molecule_index: "1".into(),
            smiles: "[Na+]".into(),
            molecule_type: "product".into(),
            atomic_charges: "0 Na : 1.0".into(),
            overlap_charges: "- 0".into(),
            bond_orders: "- 0".into(),
            bond_length: "- 0".into(),
            nearest_neighbors: "- 0".into(),
        }
    }

    fn value(table: &FeatureTable, row: usize, column: &str) -> Cell {
        let index = table.column_index(column).unwrap();
        table.rows()[row][index].clone()
    }

    #[test]
    fn row_pipeline_reconciles_matches_and_aggregates() {
        let result = featurize_row(1, &methanol("R1", "reactant"), &FeaturizeConfig::default());
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);

        let f = &result.features;
        assert!((f.sum_atomic_charges.unwrap() + 0.4).abs() < TOL);
        // Products: 1 × 0.5 and 1 × 0.6.
        assert!((f.sum_bond_order_overlap.unwrap() - 1.1).abs() < TOL);
        // Basin: 1 × -0.2 + 2 × -0.6 + 1 × 0.4.
        assert!((f.atomic_basin_charge.unwrap() + 1.0).abs() < TOL);
        assert!((f.weighted_average_bond_length.unwrap() - (1.43 + 0.96) / 2.0).abs() < TOL);

        let names: Vec<&str> = result.wide.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "C_1_charge",
                "O_2_charge",
                "H_3_charge",
                "C_1_O_2_charge",
                "C_1_O_2_order",
                "C_1_O_2_length",
                "O_2_H_3_charge",
                "O_2_H_3_order",
                "O_2_H_3_length",
            ]
        );
    }

    #[test]
    fn malformed_fragments_become_grammar_diagnostics() {
        let mut row = methanol("R1", "reactant");
        row.bond_orders = "B(1-O,0-C) : 0.96 B(1-O,x-H) : 1.0".into();
        let result = featurize_row(4, &row, &FeaturizeConfig::default());
        assert!(result.diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::GrammarMismatch { field: FieldKind::BondOrders, .. }
        )));
        // O-H lost its order, so its overlap charge is unmatched.
        assert!(result.diagnostics.iter().any(|d| d.category() == "unmatched-bond"));
        assert!(result.features.weighted_average_bond_length.is_some());
    }

    #[test]
    fn unknown_molecule_type_encodes_as_zeros() {
        let result = featurize_row(1, &methanol("R1", "solvent"), &FeaturizeConfig::default());
        assert_eq!(result.identity.molecule_type, None);
        assert_eq!(result.identity.one_hot(), [0.0, 0.0, 0.0]);
        assert_eq!(result.molecule_type_text, "solvent");
        assert!(result.diagnostics.iter().any(|d| d.category() == "unknown-molecule-type"));
    }

    #[test]
    fn run_builds_identity_one_hot_feature_and_wide_columns() {
        let table = DescriptorTable::new(vec![methanol("R1", "reactant"), sodium()]);
        let result = run(&table, &FeaturizeConfig::default(), &ProgressReporter::new()).unwrap();
        let out = &result.table;

        assert_eq!(out.len(), 2);
        assert_eq!(&out.columns()[..4], &IDENTITY_COLUMNS.map(String::from));
        assert_eq!(out.columns()[4], "MOLECULE_TYPE_reactant");
        assert_eq!(out.columns()[7], "sum_atomic_charges");
        assert_eq!(out.columns().len(), fixed_column_count() + 10);

        assert_eq!(value(out, 0, "MOLECULE_TYPE_reactant"), Cell::Number(1.0));
        assert_eq!(value(out, 1, "MOLECULE_TYPE_product"), Cell::Number(1.0));
        assert_eq!(value(out, 1, "atomic_basin_charge"), Cell::Number(1.0));
        assert_eq!(value(out, 1, "weighted_average_bond_length"), Cell::Missing);

        // Wide union: methanol's nine columns, then sodium's one.
        assert_eq!(out.columns().last().unwrap(), "Na_1_charge");
        assert_eq!(value(out, 0, "Na_1_charge"), Cell::Number(0.0));
        assert_eq!(value(out, 1, "C_1_O_2_order"), Cell::Number(0.0));
        assert_eq!(value(out, 1, "Na_1_charge"), Cell::Number(1.0));

        assert_eq!(result.report.rows_read, 2);
        assert_eq!(result.report.wide_columns, 10);
    }

    #[test]
    fn wide_columns_can_be_disabled_and_filled_differently() {
        let table = DescriptorTable::new(vec![methanol("R1", "reactant"), sodium()]);
        let config = FeaturizeConfigBuilder::new()
            .include_wide_columns(false)
            .build()
            .unwrap();
        let result = run(&table, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(result.table.columns().len(), fixed_column_count());

        let config = FeaturizeConfigBuilder::new()
            .wide_fill_value(-1.0)
            .build()
            .unwrap();
        let result = run(&table, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(value(&result.table, 1, "C_1_charge"), Cell::Number(-1.0));
    }

    #[test]
    fn duplicate_rows_follow_configuration() {
        let table = DescriptorTable::new(vec![
            methanol("R1", "reactant"),
            methanol("R1", "reactant"),
            sodium(),
        ]);

        let dropped = run(&table, &FeaturizeConfig::default(), &ProgressReporter::new()).unwrap();
        assert_eq!(dropped.table.len(), 2);
        assert_eq!(dropped.report.duplicates_dropped, 1);

        let config = FeaturizeConfigBuilder::new()
            .drop_duplicates(false)
            .build()
            .unwrap();
        let kept = run(&table, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(kept.table.len(), 3);
        assert_eq!(kept.report.duplicates_dropped, 0);
    }

    #[test]
    fn bonded_scope_filters_pairs_missing_from_bond_lengths() {
        let mut row = methanol("R1", "reactant");
        row.overlap_charges.push_str(" B(0-C,2-H) : -0.01");
        row.bond_orders.push_str(" B(0-C,2-H) : 0.02");

        let all = featurize_row(1, &row, &FeaturizeConfig::default());
        assert!(all.wide.iter().any(|(n, _)| n == "C_1_H_3_order"));

        let config = FeaturizeConfigBuilder::new()
            .bond_scope(BondScope::Bonded)
            .build()
            .unwrap();
        let bonded = featurize_row(1, &row, &config);
        assert!(!bonded.wide.iter().any(|(n, _)| n.starts_with("C_1_H_3")));
    }

    #[test]
    fn run_announces_diagnostic_breakdown() {
        let table = DescriptorTable::new(vec![methanol("R1", "solvent"), sodium()]);
        let messages = std::sync::Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));
        run(&table, &FeaturizeConfig::default(), &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            messages.into_inner().unwrap(),
            vec!["1 row issue(s) (unknown-molecule-type: 1)".to_string()]
        );
    }

    #[test]
    fn clean_run_sends_no_message() {
        let table = DescriptorTable::new(vec![methanol("R1", "reactant"), sodium()]);
        let messages = std::sync::Mutex::new(0usize);
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if matches!(event, Progress::Message(_)) {
                *messages.lock().unwrap() += 1;
            }
        }));
        run(&table, &FeaturizeConfig::default(), &reporter).unwrap();
        drop(reporter);
        assert_eq!(messages.into_inner().unwrap(), 0);
    }

    #[test]
    fn empty_table_is_an_error() {
        let err = run(
            &DescriptorTable::default(),
            &FeaturizeConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::EmptyInput));
    }
}
