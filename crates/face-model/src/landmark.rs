//! Face-mesh landmarks.
//!
//! Coordinates are normalized: `(0.0, 0.0)` is the top-left and
//! `(1.0, 1.0)` the bottom-right of the camera frame.

use serde::{Deserialize, Serialize};

/// A single normalized landmark point.
///
/// `z` is relative depth as reported by mesh trackers. It is carried
/// through but never read by the gesture logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance in the image plane.
    pub fn distance(&self, other: &Landmark) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Reflect across the vertical center line of the frame.
    pub fn mirrored(&self) -> Self {
        Self {
            x: 1.0 - self.x,
            ..*self
        }
    }
}

/// All landmarks of one detected face in one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Point at a mesh index, if the tracker produced that many points.
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    /// Mirror every point horizontally.
    ///
    /// Only coordinates change. Pair this with
    /// [`FaceMeshIndices::mirrored`] so each eye keeps the side a tracker
    /// would assign it on a flipped image.
    pub fn mirrored(&self) -> Self {
        Self {
            points: self.points.iter().map(Landmark::mirrored).collect(),
        }
    }
}

impl From<Vec<Landmark>> for LandmarkSet {
    fn from(points: Vec<Landmark>) -> Self {
        Self::new(points)
    }
}

/// Two mesh indices spanning a distance: top/bottom or left/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPair(pub usize, pub usize);

/// The four indices an aspect ratio is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioIndices {
    /// Vertical span (top, bottom).
    pub vertical: IndexPair,
    /// Horizontal span (left, right).
    pub horizontal: IndexPair,
}

/// Fixed landmark indices into the 468/478-point MediaPipe face mesh.
///
/// These are a contract with the tracker's numbering scheme, not a
/// tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceMeshIndices {
    pub left_eye: RatioIndices,
    pub right_eye: RatioIndices,
    pub mouth: RatioIndices,
    pub nose_tip: usize,
}

impl FaceMeshIndices {
    pub const MEDIAPIPE: FaceMeshIndices = FaceMeshIndices {
        left_eye: RatioIndices {
            vertical: IndexPair(159, 145),
            horizontal: IndexPair(33, 133),
        },
        right_eye: RatioIndices {
            vertical: IndexPair(386, 374),
            horizontal: IndexPair(362, 263),
        },
        mouth: RatioIndices {
            vertical: IndexPair(13, 14),
            horizontal: IndexPair(78, 308),
        },
        nose_tip: 1,
    };

    /// Smallest mesh that contains every index read here.
    pub fn required_len(&self) -> usize {
        [self.left_eye, self.right_eye, self.mouth]
            .iter()
            .flat_map(|r| [r.vertical.0, r.vertical.1, r.horizontal.0, r.horizontal.1])
            .chain(std::iter::once(self.nose_tip))
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Indices as seen by a tracker running on a horizontally flipped
    /// image: the eyes trade places and each horizontal span reverses.
    pub fn mirrored(&self) -> Self {
        let flip = |r: RatioIndices| RatioIndices {
            vertical: r.vertical,
            horizontal: IndexPair(r.horizontal.1, r.horizontal.0),
        };
        Self {
            left_eye: flip(self.right_eye),
            right_eye: flip(self.left_eye),
            mouth: flip(self.mouth),
            nose_tip: self.nose_tip,
        }
    }
}

impl Default for FaceMeshIndices {
    fn default() -> Self {
        Self::MEDIAPIPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance() {
        let a = Landmark::new(0.0, 0.0);
        let b = Landmark::new(0.3, 0.4);
        assert!((a.distance(&b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mirror_preserves_distances() {
        let set = LandmarkSet::new(vec![Landmark::new(0.2, 0.3), Landmark::new(0.6, 0.1)]);
        let mirrored = set.mirrored();
        assert!((mirrored.get(0).unwrap().x - 0.8).abs() < 1e-12);
        let before = set.get(0).unwrap().distance(set.get(1).unwrap());
        let after = mirrored.get(0).unwrap().distance(mirrored.get(1).unwrap());
        assert!((before - after).abs() < 1e-12);
    }

    #[test]
    fn test_mediapipe_required_len() {
        assert_eq!(FaceMeshIndices::MEDIAPIPE.required_len(), 387);
    }

    #[test]
    fn test_mirrored_indices_swap_eyes() {
        let mirrored = FaceMeshIndices::MEDIAPIPE.mirrored();
        assert_eq!(mirrored.left_eye.vertical, IndexPair(386, 374));
        assert_eq!(mirrored.left_eye.horizontal, IndexPair(263, 362));
        assert_eq!(mirrored.right_eye.vertical, IndexPair(159, 145));
        assert_eq!(mirrored.mouth.horizontal, IndexPair(308, 78));
        assert_eq!(mirrored.nose_tip, 1);
        assert_eq!(mirrored.mirrored(), FaceMeshIndices::MEDIAPIPE);
        assert_eq!(mirrored.required_len(), 387);
    }

    #[test]
    fn test_landmark_z_is_optional() {
        let point: Landmark = serde_json::from_str(r#"{"x":0.5,"y":0.25}"#).unwrap();
        assert_eq!(point, Landmark::new(0.5, 0.25));
    }

    proptest! {
        #[test]
        fn mirroring_twice_restores_points(
            x in 0.0f64..1.0,
            y in 0.0f64..1.0,
            z in -0.1f64..0.1,
        ) {
            let point = Landmark { x, y, z };
            let back = point.mirrored().mirrored();
            prop_assert!((back.x - x).abs() < 1e-12);
            prop_assert_eq!(back.y, y);
            prop_assert_eq!(back.z, z);
        }
    }
}
