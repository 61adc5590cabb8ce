use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Below this confidence the capture is worth retaking.
pub const LOW_CONFIDENCE_THRESHOLD: f32 = 50.0;

pub const LOW_CONFIDENCE_TIP: &str =
    "Tip: retake photo in better light, flatten paper, hold steady.";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Recognition output: the raw text plus the engine's confidence score
/// (0-100).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Recognized {
    pub text: String,
    pub confidence: f32,
}

impl Recognized {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }

    pub fn needs_retake(&self) -> bool {
        self.confidence < LOW_CONFIDENCE_THRESHOLD
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence > 80.0 {
            Self::High
        } else if confidence > 55.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum OcrError {
    #[error("image source unreadable: {0}")]
    UnreadableSource(String),
    #[error("recognition failed: {0}")]
    Recognition(String),
}

/// Recognition engine interface. The engine itself lives outside this
/// crate; callers feed its output to the translation gateway.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: ImageSource) -> BoxFuture<'_, Result<Recognized, OcrError>>;
}
