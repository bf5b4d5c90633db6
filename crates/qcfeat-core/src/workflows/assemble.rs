//! Turns one-row-per-molecule feature tables into one row per reaction.
//!
//! Each reaction row is the concatenation of its reactant, intermediate and
//! product molecule rows over a chosen feature subset. Every reaction gets the
//! same number of slots per role:
//!
//! - reactants: the largest reactant count of any reaction,
//! - intermediates: the mean intermediate count over reactions that have any, rounded up,
//! - products: the largest product count of any reaction.
//!
//! Extra molecules beyond a role's slots are dropped; empty slots are padded
//! with `0.0`. Missing feature values are replaced by a fill value.

use crate::core::io::feature::{Cell, FeatureTable};
use crate::core::models::features::FeatureVector;
use crate::core::models::molecule::MoleculeType;
use crate::engine::error::PipelineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

pub const DEFAULT_FILL_VALUE: f64 = 1e9;
const PAD_VALUE: f64 = 0.0;

/// Roles in the order their slots appear in an output row.
const ROLE_ORDER: [MoleculeType; 3] = [
    MoleculeType::Reactant,
    MoleculeType::Intermediate,
    MoleculeType::Product,
];

#[derive(Debug, Clone, PartialEq)]
pub struct AssembleConfig {
    pub features: Vec<String>,
    /// Replaces missing feature values.
    pub fill_value: f64,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            features: FeatureVector::COLUMNS.iter().map(|c| c.to_string()).collect(),
            fill_value: DEFAULT_FILL_VALUE,
        }
    }
}

/// Number of molecule slots per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCounts {
    pub reactants: usize,
    pub intermediates: usize,
    pub products: usize,
}

impl SlotCounts {
    fn get(&self, role: MoleculeType) -> usize {
        match role {
            MoleculeType::Reactant => self.reactants,
            MoleculeType::Intermediate => self.intermediates,
            MoleculeType::Product => self.products,
        }
    }
}

/// Molecule rows of one reaction, split by role.
#[derive(Debug, Default)]
struct Reaction<'a> {
    id: String,
    members: HashMap<MoleculeType, Vec<&'a [Cell]>>,
}

impl Reaction<'_> {
    fn count(&self, role: MoleculeType) -> usize {
        self.members.get(&role).map_or(0, Vec::len)
    }
}

#[instrument(skip_all, name = "assemble_workflow")]
pub fn run(
    table: &FeatureTable,
    config: &AssembleConfig,
    reporter: &ProgressReporter,
) -> Result<FeatureTable, PipelineError> {
    if table.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let id_column = require(table, "REACTION_ID")?;
    let role_columns = MoleculeType::ONE_HOT_ORDER
        .iter()
        .map(|role| Ok((*role, require(table, &role.one_hot_column())?)))
        .collect::<Result<Vec<_>, PipelineError>>()?;
    let feature_columns = config
        .features
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| PipelineError::UnknownFeature {
                    column: name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let reactions = reporter.phase("Grouping reactions", || {
        group_reactions(table, id_column, &role_columns)
    });
    let slots = slot_counts(&reactions);
    info!(
        reactions = reactions.len(),
        reactants = slots.reactants,
        intermediates = slots.intermediates,
        products = slots.products,
        "Determined slots per role."
    );

    let mut columns = vec!["REACTION_ID".to_string()];
    for role in ROLE_ORDER {
        for slot in 1..=slots.get(role) {
            for feature in &config.features {
                columns.push(format!("{}_{}_{}", role.as_str(), slot, feature));
            }
        }
    }

    let mut output = FeatureTable::new(columns, table.missing_marker());
    reporter.phase("Assembling reaction rows", || {
        reporter.report(Progress::TaskStart {
            total_steps: reactions.len() as u64,
        });
        for reaction in &reactions {
            let mut row = vec![Cell::Text(reaction.id.clone())];
            for role in ROLE_ORDER {
                let members = reaction.members.get(&role).map_or(&[][..], Vec::as_slice);
                for slot in 0..slots.get(role) {
                    match members.get(slot) {
                        Some(cells) => row.extend(feature_columns.iter().map(|&i| {
                            Cell::Number(cells[i].as_number().unwrap_or(config.fill_value))
                        })),
                        None => row.extend(
                            std::iter::repeat_n(Cell::Number(PAD_VALUE), feature_columns.len()),
                        ),
                    }
                }
            }
            output.push_row(row)?;
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);
        Ok::<_, PipelineError>(())
    })?;

    Ok(output)
}

fn require(table: &FeatureTable, column: &str) -> Result<usize, PipelineError> {
    table
        .column_index(column)
        .ok_or_else(|| PipelineError::MissingColumn {
            column: column.to_string(),
        })
}

/// Groups rows by reaction id in order of first appearance.
fn group_reactions<'a>(
    table: &'a FeatureTable,
    id_column: usize,
    role_columns: &[(MoleculeType, usize)],
) -> Vec<Reaction<'a>> {
    let mut reactions: Vec<Reaction<'a>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (row_number, row) in table.rows().iter().enumerate() {
        let id = row[id_column].render(table.missing_marker()).into_owned();
        let Some(role) = role_columns
            .iter()
            .find(|(_, column)| row[*column].as_number() == Some(1.0))
            .map(|(role, _)| *role)
        else {
            debug!(row = row_number + 1, reaction = %id, "Row has no molecule role; skipped.");
            continue;
        };

        let position = *positions.entry(id.clone()).or_insert_with(|| {
            reactions.push(Reaction {
                id,
                members: HashMap::new(),
            });
            reactions.len() - 1
        });
        reactions[position]
            .members
            .entry(role)
            .or_default()
            .push(row.as_slice());
    }
    reactions
}

fn slot_counts(reactions: &[Reaction]) -> SlotCounts {
    let max_of = |role| reactions.iter().map(|r| r.count(role)).max().unwrap_or(0);

    let with_intermediates: Vec<usize> = reactions
        .iter()
        .map(|r| r.count(MoleculeType::Intermediate))
        .filter(|&n| n > 0)
        .collect();
    let intermediates = if with_intermediates.is_empty() {
        0
    } else {
        let total: usize = with_intermediates.iter().sum();
        total.div_ceil(with_intermediates.len())
    };

    SlotCounts {
        reactants: max_of(MoleculeType::Reactant),
        intermediates,
        products: max_of(MoleculeType::Product),
    }
}
