//! Landmark tracker seam.
//!
//! Face detection runs outside this process; a tracker here only picks
//! the face to follow out of what a frame carries.

use std::borrow::Cow;

use facepoint_common::error::FacepointResult;
use facepoint_face_model::{FrameRecord, LandmarkSet};

/// Face chosen for a frame, borrowed from it when possible.
pub type TrackedFace<'a> = Option<Cow<'a, LandmarkSet>>;

/// Selects the landmark set to process for a frame.
pub trait LandmarkTracker: Send {
    /// The face to follow, or `None` when no face was detected.
    fn track<'a>(&mut self, frame: &'a FrameRecord) -> FacepointResult<TrackedFace<'a>>;

    fn name(&self) -> &str;
}

/// Follows the first detected face of every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstFaceTracker;

impl LandmarkTracker for FirstFaceTracker {
    fn track<'a>(&mut self, frame: &'a FrameRecord) -> FacepointResult<TrackedFace<'a>> {
        if frame.faces.len() > 1 {
            tracing::trace!(faces = frame.faces.len(), "Multiple faces, following the first");
        }
        Ok(frame.first_face().map(Cow::Borrowed))
    }

    fn name(&self) -> &str {
        "first-face"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facepoint_face_model::Landmark;

    #[test]
    fn test_first_face_wins() {
        let a = LandmarkSet::new(vec![Landmark::new(0.1, 0.1)]);
        let b = LandmarkSet::new(vec![Landmark::new(0.9, 0.9)]);
        let frame = FrameRecord {
            t: Some(0.0),
            faces: vec![a.clone(), b],
        };

        let mut tracker = FirstFaceTracker;
        let face = tracker.track(&frame).unwrap().unwrap();
        assert_eq!(face.as_ref(), &a);
    }

    #[test]
    fn test_no_face() {
        let mut tracker = FirstFaceTracker;
        assert!(tracker.track(&FrameRecord::empty(None)).unwrap().is_none());
    }
}
