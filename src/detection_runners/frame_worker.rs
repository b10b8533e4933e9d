use std::sync::Arc;
use std::thread::JoinHandle;
use anyhow::Context;

use crate::data::{frame_channels, DetectionState, FrameDetections, SendState, TimeCalc};
use crate::detection_runners::post_process::{PostProcess, PostProcessOutput};
use crate::detection_runners::BvrPostProcessor;

/// Starts a worker thread and hands back the producer side of its channels.
///
/// Frames are processed strictly one at a time, in arrival order. The worker stops
/// when `frame_tx` is dropped (returning its accumulated timings) or when a frame
/// hits an internal-consistency error. A frame with an unusable size gets an empty result.
pub fn spawn_frame_worker(processor: Arc<BvrPostProcessor>, capacity: usize)
    -> anyhow::Result<(SendState, JoinHandle<anyhow::Result<TimeCalc>>)> {
    let (send_state, detection_state) = frame_channels(capacity);
    let handle = std::thread::Builder::new()
        .name("bvr-postprocess".to_string())
        .spawn(move || frame_loop(&processor, detection_state))
        .context("Failed to spawn post-processing worker")?;
    Ok((send_state, handle))
}

fn frame_loop(processor: &BvrPostProcessor, detection_state: DetectionState) -> anyhow::Result<TimeCalc> {
    let mut times = TimeCalc::default();

    loop {
        // MESSAGE LOOP STARTS HERE
        let frame = match detection_state.frame_rx.recv() {
            Ok(msg) => msg,
            Err(_) => {
                log::debug!("Frame channel closed, stopping post-processing worker");
                break;
            }
        };

        let output = match processor.forward(&frame.tensors, (frame.target_width, frame.target_height), &mut times) {
            Ok(output) => output,
            Err(err) if err.is_internal() => {
                return Err(err).with_context(|| format!("Failed to post-process frame {}", frame.frame_id));
            }
            Err(err) => {
                log::warn!("Frame {}: {}, no detections reported", frame.frame_id, err);
                PostProcessOutput::default()
            }
        };

        if output.skipped_rows > 0 {
            log::warn!("Frame {}: skipped {} malformed rows", frame.frame_id, output.skipped_rows);
        }

        let result = Box::new(FrameDetections {
            frame_id: frame.frame_id,
            detections: output.detections,
            skipped_rows: output.skipped_rows,
        });
        if detection_state.det_tx.send(result).is_err() {
            log::debug!("Detection receiver dropped, stopping post-processing worker");
            break;
        }
    }

    if processor.profile() {
        log::info!("Post-processing avg per frame: {:?}", times.avg());
    }
    Ok(times)
}
