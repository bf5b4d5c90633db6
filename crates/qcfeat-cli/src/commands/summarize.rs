use crate::cli::SummarizeArgs;
use crate::error::{CliError, Result};
use qcfeat::{
    core::io::{feature::FeatureTable, traits::TabularFile},
    workflows::summarize::{self, ColumnSummary},
};
use tracing::info;

pub fn run(args: SummarizeArgs) -> Result<()> {
    info!("Loading feature table from {:?}", &args.input);
    let table =
        FeatureTable::read_from_path(&args.input).map_err(|e| CliError::table(&args.input, e))?;

    let summaries = summarize::run(&table, &args.columns)?;
    print!("{}", render(&summaries));
    Ok(())
}

const HEADINGS: [&str; 10] = [
    "column", "count", "missing", "mean", "std", "min", "25%", "50%", "75%", "max",
];

fn render(summaries: &[ColumnSummary]) -> String {
    let width = summaries
        .iter()
        .map(|s| s.column.len())
        .chain(std::iter::once(HEADINGS[0].len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{:<width$}", HEADINGS[0]);
    for heading in &HEADINGS[1..] {
        out.push_str(&format!(" {:>12}", heading));
    }
    out.push('\n');

    for entry in summaries {
        out.push_str(&format!("{:<width$}", entry.column));
        match &entry.summary {
            Some(s) => {
                out.push_str(&format!(" {:>12} {:>12}", s.count, entry.missing));
                let std = s.std.map_or_else(|| "-".to_string(), |v| format!("{:.6}", v));
                out.push_str(&format!(" {:>12.6} {:>12}", s.mean, std));
                for value in [s.min, s.q1, s.median, s.q3, s.max] {
                    out.push_str(&format!(" {:>12.6}", value));
                }
            }
            None => {
                out.push_str(&format!(" {:>12} {:>12}", 0, entry.missing));
                for _ in 0..7 {
                    out.push_str(&format!(" {:>12}", "-"));
                }
            }
        }
        out.push('\n');
    }
    out
}
