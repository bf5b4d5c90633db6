use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::FeaturizeArgs;
use crate::error::{CliError, Result};
use qcfeat::engine::config::{BondScope, FeaturizeConfigBuilder};
use std::str::FromStr;

pub fn build_featurize_config(args: &FeaturizeArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let output_file = file_config.output.take().unwrap_or_default();
    let missing_marker = args
        .missing_marker
        .clone()
        .or(output_file.missing_marker)
        .unwrap_or(defaults.missing_marker);
    let include_wide_columns = if args.no_wide_columns {
        false
    } else {
        output_file
            .include_wide_columns
            .unwrap_or(defaults.include_wide_columns)
    };
    let wide_fill_value = args
        .wide_fill_value
        .or(output_file.wide_fill_value)
        .unwrap_or(defaults.wide_fill_value);

    let processing_file = file_config.processing.take().unwrap_or_default();
    let drop_duplicates = if args.keep_duplicates {
        false
    } else {
        processing_file
            .drop_duplicates
            .unwrap_or(defaults.drop_duplicates)
    };
    let bond_scope = if args.bonded_only {
        BondScope::Bonded
    } else {
        match processing_file.bond_scope.as_deref() {
            Some(text) => text
                .parse::<BondScope>()
                .map_err(|e| CliError::Config(e.to_string()))?,
            None => defaults.bond_scope,
        }
    };
    let sum_decimals = args
        .sum_decimals
        .or(processing_file.sum_decimals)
        .unwrap_or(defaults.sum_decimals);

    let core_config = FeaturizeConfigBuilder::new()
        .missing_marker(missing_marker)
        .include_wide_columns(include_wide_columns)
        .wide_fill_value(wide_fill_value)
        .drop_duplicates(drop_duplicates)
        .bond_scope(bond_scope)
        .sum_decimals(sum_decimals)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "output.missing-marker" => {
                config.output.get_or_insert_with(Default::default).missing_marker =
                    Some(value_str.to_string());
            }
            "output.include-wide-columns" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .include_wide_columns = Some(parse_value(key, value_str, "boolean")?);
            }
            "output.wide-fill-value" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .wide_fill_value = Some(parse_value(key, value_str, "float")?);
            }
            "processing.drop-duplicates" => {
                config
                    .processing
                    .get_or_insert_with(Default::default)
                    .drop_duplicates = Some(parse_value(key, value_str, "boolean")?);
            }
            "processing.bond-scope" => {
                config
                    .processing
                    .get_or_insert_with(Default::default)
                    .bond_scope = Some(value_str.trim().to_string());
            }
            "processing.sum-decimals" => {
                config
                    .processing
                    .get_or_insert_with(Default::default)
                    .sum_decimals = Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
