use serde::{Deserialize, Serialize};

/// Which number is reported as a candidate's confidence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceMode {
    /// The winning class score alone; objectness only gates the row.
    #[default] ClassScore,
    /// Objectness multiplied by the winning class score.
    ObjectnessTimesClass,
}

impl ConfidenceMode {
    pub fn from_str(mode: &str) -> Option<Self> {
        match mode.to_lowercase().as_str() {
            "class_score" | "class" => Some(ConfidenceMode::ClassScore),
            "objectness_times_class" | "product" => Some(ConfidenceMode::ObjectnessTimesClass),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceMode::ClassScore => "ClassScore",
            ConfidenceMode::ObjectnessTimesClass => "ObjectnessTimesClass",
        }
    }

    pub fn as_str_lowercase(&self) -> &'static str {
        match self {
            ConfidenceMode::ClassScore => "class_score",
            ConfidenceMode::ObjectnessTimesClass => "objectness_times_class",
        }
    }

    /// Combines objectness with the best class score according to the mode.
    pub fn confidence(&self, objectness: f32, class_score: f32) -> f32 {
        match self {
            ConfidenceMode::ClassScore => class_score,
            ConfidenceMode::ObjectnessTimesClass => objectness * class_score,
        }
    }
}
