use qcfeat::engine::config::FeaturizeConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub core_config: FeaturizeConfig,
}
