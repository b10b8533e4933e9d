mod utils;
pub mod common;
pub mod data;
pub mod detection_runners;
pub mod error;

use std::time::Instant;
use anyhow::Context;
use crate::common::{BvrDetection, RawOutputTensor};
use crate::data::{ConfigPost, FsAccess};
use crate::detection_runners::BvrPostProcessor;

pub use crate::error::PostProcessError;

pub type Result<T, E = PostProcessError> = std::result::Result<T, E>;

/// Builds the post-processor from a config, loading its labels from `config.labels_path`.
pub fn init_postprocessor(config: ConfigPost) -> anyhow::Result<BvrPostProcessor> {
    log::debug!("Post-processing config:\n{}", config.to_string());
    let labels_path = config.labels_path.clone();
    BvrPostProcessor::from_config(config)
        .with_context(|| format!("Failed to set up post-processing with labels '{}'", labels_path))
}

/// Loads `postprocess.json` from the working directory or `~/.config/bvr`, falling back to defaults.
pub fn load_default_config() -> anyhow::Result<ConfigPost> {
    match FsAccess::find_config() {
        Some(path) => {
            log::info!("Using post-processing config {}", path.display());
            Ok(ConfigPost::from_json_file(&path)?)
        }
        None => Ok(ConfigPost::default()),
    }
}

pub fn run_postprocess(processor: &BvrPostProcessor, tensors: &[RawOutputTensor], target_size: (u32, u32)) -> anyhow::Result<Vec<BvrDetection>> {
    let now = Instant::now();

    let detections = processor.process(tensors, target_size)?;

    log::debug!("Post-processing time: {:?}", now.elapsed());

    Ok(detections)
}
