//! Eye and mouth aspect ratios (EAR / MAR).
//!
//! A ratio is the vertical span over the horizontal span of a landmark
//! quartet. Degenerate geometry yields an undefined ratio instead of an
//! infinity or NaN, and an undefined ratio never satisfies a threshold.

use std::fmt;

use facepoint_face_model::{FaceMeshIndices, LandmarkSet, RatioIndices};

/// Openness ratio of one eye or the mouth.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AspectRatio(Option<f64>);

impl AspectRatio {
    pub const UNDEFINED: AspectRatio = AspectRatio(None);

    /// Wrap a raw quotient. Non-finite or negative values are undefined.
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            Self(Some(value))
        } else {
            Self::UNDEFINED
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_defined(&self) -> bool {
        self.0.is_some()
    }

    /// Strictly below `threshold`. Always false when undefined.
    pub fn is_below(&self, threshold: f64) -> bool {
        matches!(self.0, Some(v) if v < threshold)
    }

    /// Strictly above `threshold`. Always false when undefined.
    pub fn is_above(&self, threshold: f64) -> bool {
        matches!(self.0, Some(v) if v > threshold)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.3}"),
            None => f.write_str("undefined"),
        }
    }
}

/// Compute `|top - bottom| / |left - right|` for a landmark quartet.
///
/// Undefined when an index is missing from the set or the horizontal
/// span is exactly zero.
pub fn aspect_ratio(landmarks: &LandmarkSet, indices: RatioIndices) -> AspectRatio {
    let points = (
        landmarks.get(indices.vertical.0),
        landmarks.get(indices.vertical.1),
        landmarks.get(indices.horizontal.0),
        landmarks.get(indices.horizontal.1),
    );
    let (Some(top), Some(bottom), Some(left), Some(right)) = points else {
        return AspectRatio::UNDEFINED;
    };

    let horizontal = left.distance(right);
    if horizontal == 0.0 {
        return AspectRatio::UNDEFINED;
    }
    AspectRatio::new(top.distance(bottom) / horizontal)
}

/// The three ratios read from each face frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceRatios {
    pub left_eye: AspectRatio,
    pub right_eye: AspectRatio,
    pub mouth: AspectRatio,
}

impl FaceRatios {
    pub fn extract(landmarks: &LandmarkSet, indices: &FaceMeshIndices) -> Self {
        Self {
            left_eye: aspect_ratio(landmarks, indices.left_eye),
            right_eye: aspect_ratio(landmarks, indices.right_eye),
            mouth: aspect_ratio(landmarks, indices.mouth),
        }
    }

    /// Build from raw values, mostly for tests and replay tools.
    pub fn from_values(left_eye: f64, right_eye: f64, mouth: f64) -> Self {
        Self {
            left_eye: AspectRatio::new(left_eye),
            right_eye: AspectRatio::new(right_eye),
            mouth: AspectRatio::new(mouth),
        }
    }
}
