use crate::core::io::feature::FeatureTable;
use crate::core::models::features::FeatureVector;
use crate::core::stats::{self, Summary};
use crate::engine::error::PipelineError;
use tracing::{info, instrument};

/// Descriptive summary of one feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    /// Cells that were missing or not numeric.
    pub missing: usize,
    /// `None` when the column holds no numeric value at all.
    pub summary: Option<Summary>,
}

/// Summarizes the named columns, or every derived statistic the table carries
/// when `columns` is empty.
#[instrument(skip_all, name = "summarize_workflow")]
pub fn run(table: &FeatureTable, columns: &[String]) -> Result<Vec<ColumnSummary>, PipelineError> {
    if table.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let selected: Vec<&str> = if columns.is_empty() {
        FeatureVector::COLUMNS
            .iter()
            .copied()
            .filter(|c| table.column_index(c).is_some())
            .collect()
    } else {
        columns.iter().map(String::as_str).collect()
    };

    let summaries = selected
        .into_iter()
        .map(|column| {
            let values = table
                .numeric_values(column)
                .ok_or_else(|| PipelineError::UnknownFeature {
                    column: column.to_string(),
                })?;
            Ok(ColumnSummary {
                column: column.to_string(),
                missing: table.len() - values.len(),
                summary: stats::describe(&values),
            })
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;

    info!(columns = summaries.len(), rows = table.len(), "Summary computed.");
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::feature::Cell;

    fn table() -> FeatureTable {
        let mut table = FeatureTable::new(
            vec![
                "REACTION_ID".into(),
                "mean_atomic_charges".into(),
                "iqr_bond_length".into(),
            ],
            "NaN",
        );
        for (id, mean, iqr) in [
            ("1", Some(1.0), None),
            ("2", Some(2.0), None),
            ("3", Some(3.0), None),
            ("4", None, None),
            ("5", Some(4.0), None),
        ] {
            table
                .push_row(vec![
                    Cell::Text(id.into()),
                    Cell::from_option(mean),
                    Cell::from_option(iqr),
                ])
                .unwrap();
        }
        table
    }

    #[test]
    fn default_selection_covers_statistic_columns_present() {
        let summaries = run(&table(), &[]).unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(names, vec!["mean_atomic_charges", "iqr_bond_length"]);

        let mean = &summaries[0];
        assert_eq!(mean.missing, 1);
        let summary = mean.summary.as_ref().unwrap();
        assert_eq!(summary.count, 4);
        assert!((summary.mean - 2.5).abs() < 1e-12);
        assert!((summary.q1 - 1.75).abs() < 1e-12);
        assert_eq!(summary.max, 4.0);

        assert_eq!(summaries[1].missing, 5);
        assert_eq!(summaries[1].summary, None);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let err = run(&table(), &["nope".to_string()]).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownFeature { ref column } if column == "nope"));
    }
}
