use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT_SIZE: u32 = 416;

/// How the network input relates to the frame the boxes are reported in.
///
/// `Resize` is for a network fed a frame resized to a fixed input (boxes are
/// scaled back per axis). `Native` is for a network run at the frame's own
/// resolution, so no rescaling happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum InputCalibration {
    Resize { width: u32, height: u32 },
    Native,
}

impl Default for InputCalibration {
    fn default() -> Self {
        InputCalibration::Resize {
            width: DEFAULT_INPUT_SIZE,
            height: DEFAULT_INPUT_SIZE,
        }
    }
}

impl InputCalibration {
    /// Network input size to decode against for a frame of `target_size`.
    pub fn input_size(&self, target_size: (u32, u32)) -> (u32, u32) {
        match self {
            InputCalibration::Resize { width, height } => (*width, *height),
            InputCalibration::Native => target_size,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputCalibration::Resize { .. } => "Resize",
            InputCalibration::Native => "Native",
        }
    }
}
