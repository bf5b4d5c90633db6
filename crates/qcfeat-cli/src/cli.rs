use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "qcfeat CLI - Derives per-molecule and per-reaction feature tables from quantum-chemistry descriptor exports.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for row processing.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a descriptor table and derive one feature row per molecule.
    Featurize(FeaturizeArgs),
    /// Print descriptive statistics for the columns of a feature table.
    Summarize(SummarizeArgs),
    /// Fold a molecule-level feature table into one row per reaction.
    Assemble(AssembleArgs),
}

/// Arguments for the `featurize` subcommand.
#[derive(Args, Debug)]
pub struct FeaturizeArgs {
    // --- Core Arguments ---
    /// Path to the input descriptor table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output feature table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Output Overrides ---
    /// Text written for a statistic that could not be computed.
    #[arg(long, value_name = "TEXT")]
    pub missing_marker: Option<String>,

    /// Omit the per-atom and per-bond columns.
    #[arg(long)]
    pub no_wide_columns: bool,

    /// Value written where a row has no entry for a per-atom or per-bond column.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub wide_fill_value: Option<f64>,

    // --- Processing Overrides ---
    /// Keep input rows that repeat an earlier row exactly.
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Only use bond-order and overlap-charge records for pairs listed in BOND_LENGTH.
    #[arg(long)]
    pub bonded_only: bool,

    /// Decimal places kept in `sum_atomic_charges`.
    #[arg(long, value_name = "INT")]
    pub sum_decimals: Option<u32>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S processing.bond-scope=bonded
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `summarize` subcommand.
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Path to a feature table produced by `featurize`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Columns to summarize. Defaults to every derived statistic present.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub columns: Vec<String>,
}

/// Arguments for the `assemble` subcommand.
#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Path to a feature table produced by `featurize`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output reaction table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Feature columns to carry per molecule. Defaults to every derived statistic.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub features: Vec<String>,

    /// Value substituted for missing feature values.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub fill: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn featurize_flags_parse() {
        let cli = Cli::parse_from([
            "qcfeat",
            "-vv",
            "featurize",
            "-i",
            "in.csv",
            "-o",
            "out.csv",
            "--bonded-only",
            "--wide-fill-value",
            "-1",
            "-S",
            "output.missing-marker=NA",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Featurize(args) = cli.command else {
            panic!("expected featurize");
        };
        assert!(args.bonded_only);
        assert!(!args.keep_duplicates);
        assert_eq!(args.wide_fill_value, Some(-1.0));
        assert_eq!(args.set_values, vec!["output.missing-marker=NA"]);
    }

    #[test]
    fn feature_lists_split_on_commas() {
        let cli = Cli::parse_from([
            "qcfeat",
            "assemble",
            "-i",
            "f.csv",
            "-o",
            "r.csv",
            "--features",
            "sum_atomic_charges,iqr_bond_length",
        ]);
        let Commands::Assemble(args) = cli.command else {
            panic!("expected assemble");
        };
        assert_eq!(args.features, vec!["sum_atomic_charges", "iqr_bond_length"]);
        assert_eq!(args.fill, None);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["qcfeat", "-q", "-v", "summarize", "-i", "f.csv"]);
        assert!(result.is_err());
    }
}
