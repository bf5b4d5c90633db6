use crate::cli::FeaturizeArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use qcfeat::{
    core::io::{descriptor::DescriptorTable, traits::TabularFile},
    engine::progress::ProgressReporter,
    workflows::featurize,
};
use tracing::{info, warn};

pub fn run(args: FeaturizeArgs) -> Result<()> {
    info!("Resolving featurization settings...");
    let app_config = config::build_featurize_config(&args)?;

    info!("Loading descriptor table from {:?}", &app_config.input_path);
    let table = DescriptorTable::read_from_path(&app_config.input_path)
        .map_err(|e| CliError::table(&app_config.input_path, e))?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Featurizing {} molecule row(s)...", table.len());
    let result = featurize::run(&table, &app_config.core_config, &reporter)?;
    let report = &result.report;

    result
        .table
        .write_to_path(&app_config.output_path)
        .map_err(|e| CliError::table(&app_config.output_path, e))?;

    if report.duplicates_dropped > 0 {
        println!("  Dropped {} duplicate row(s).", report.duplicates_dropped);
    }
    for (category, count) in &report.diagnostics {
        warn!(category, count, "Rows carried recoverable problems.");
        println!("  {:<24} {}", category, count);
    }
    println!(
        "✓ Wrote {} row(s) with {} per-atom/per-bond column(s) to: {}",
        report.rows_written,
        report.wide_columns,
        app_config.output_path.display()
    );

    Ok(())
}
