//! Resolves the settings of a command from built-in defaults, an optional TOML
//! file, `--set` overrides and explicit flags.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::build_featurize_config;
