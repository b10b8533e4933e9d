mod config_post;
mod confidence_mode;
mod filesystem_access;
mod input_calibration;
mod time_calc;
pub mod send_channels;

pub use config_post::ConfigPost;
pub use confidence_mode::ConfidenceMode;
pub use input_calibration::{InputCalibration, DEFAULT_INPUT_SIZE};
pub use send_channels::{frame_channels, DetectionState, FrameDetections, SendState, TensorFrame};

pub use filesystem_access::{FsAccess, CONFIG_FILE_NAME};
pub use time_calc::TimeCalc;
