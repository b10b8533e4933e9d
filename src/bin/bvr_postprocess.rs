use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use bvr_postprocess::common::{BvrDetection, RawOutputTensor};
use bvr_postprocess::data::ConfigPost;
use bvr_postprocess::detection_runners::{summarize, PostProcess};

/// Runs detection post-processing over a JSON dump of raw network outputs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tensor dump: `{"target_width", "target_height", "tensors": [[[f32]]]}`
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Line-delimited class label file (overrides `labels_path` from the config)
    #[arg(long, value_name = "FILE")]
    labels: Option<String>,

    /// JSON config; defaults to `postprocess.json` in the working or config directory
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log per-stage timings
    #[arg(long)]
    profile: bool,
}

#[derive(Debug, Deserialize)]
struct TensorDump {
    target_width: u32,
    target_height: u32,
    tensors: Vec<Vec<Vec<f32>>>,
}

#[derive(Debug, Serialize)]
struct Output {
    summary: String,
    skipped_tensors: usize,
    skipped_rows: usize,
    detections: Vec<BvrDetection>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigPost::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => bvr_postprocess::load_default_config()?,
    };
    if let Some(labels) = &args.labels {
        config = config.with_labels_path(labels);
    }
    let profile = config.profile || args.profile;
    config = config.with_profile(profile);

    let processor = bvr_postprocess::init_postprocessor(config)?;

    let dump_text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read tensor dump {}", args.input.display()))?;
    let dump: TensorDump = serde_json::from_str(&dump_text)
        .with_context(|| format!("Failed to parse tensor dump {}", args.input.display()))?;

    let mut tensors = Vec::with_capacity(dump.tensors.len());
    let mut ragged_tensors = 0;
    let mut ragged_rows = 0;
    for (idx, rows) in dump.tensors.into_iter().enumerate() {
        let n = rows.len();
        match RawOutputTensor::from_rows(rows) {
            Ok(tensor) => tensors.push(tensor),
            Err(err) => {
                log::warn!("Skipping tensor {} of the dump: {}", idx, err);
                ragged_tensors += 1;
                ragged_rows += n;
            }
        }
    }

    let result = processor
        .run(&tensors, (dump.target_width, dump.target_height))
        .context("Post-processing failed")?;
    for det in &result.detections {
        log::info!("{}", det);
    }

    let output = Output {
        summary: summarize(&result.detections),
        skipped_tensors: result.skipped_tensors + ragged_tensors,
        skipped_rows: result.skipped_rows + ragged_rows,
        detections: result.detections,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match args.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
