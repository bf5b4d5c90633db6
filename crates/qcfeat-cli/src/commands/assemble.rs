use crate::cli::AssembleArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use qcfeat::{
    core::io::{feature::FeatureTable, traits::TabularFile},
    engine::progress::ProgressReporter,
    workflows::assemble::{self, AssembleConfig},
};
use tracing::info;

pub fn run(args: AssembleArgs) -> Result<()> {
    let mut config = AssembleConfig::default();
    if !args.features.is_empty() {
        config.features = args.features.clone();
    }
    if let Some(fill) = args.fill {
        if !fill.is_finite() {
            return Err(CliError::Argument(format!(
                "--fill must be a finite number, got {}",
                fill
            )));
        }
        config.fill_value = fill;
    }

    info!("Loading feature table from {:?}", &args.input);
    let table =
        FeatureTable::read_from_path(&args.input).map_err(|e| CliError::table(&args.input, e))?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let reactions = assemble::run(&table, &config, &reporter)?;
    reactions
        .write_to_path(&args.output)
        .map_err(|e| CliError::table(&args.output, e))?;

    println!(
        "✓ Wrote {} reaction row(s) with {} column(s) to: {}",
        reactions.len(),
        reactions.columns().len(),
        args.output.display()
    );
    Ok(())
}
