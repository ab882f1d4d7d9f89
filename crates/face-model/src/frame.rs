//! Tracker frame records.
//!
//! The external landmark tracker emits one JSON object per camera frame
//! (JSONL). A feed may start with a `# {header}` comment line; blank
//! lines and other `#` lines are ignored.

use serde::{Deserialize, Serialize};

use crate::landmark::LandmarkSet;

/// Tracker output for a single camera frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Capture time in seconds. Absent when the tracker does not stamp frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,

    /// Every face the tracker found, in detection order.
    #[serde(default)]
    pub faces: Vec<LandmarkSet>,
}

impl FrameRecord {
    /// A frame in which a single face was detected.
    pub fn with_face(t: Option<f64>, face: LandmarkSet) -> Self {
        Self {
            t,
            faces: vec![face],
        }
    }

    /// A frame in which no face was detected.
    pub fn empty(t: Option<f64>) -> Self {
        Self { t, faces: vec![] }
    }

    /// Multi-face results reduce to the first detected face.
    pub fn first_face(&self) -> Option<&LandmarkSet> {
        self.faces.first()
    }
}

/// Optional descriptive header at the top of a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Tracker that produced the feed (e.g. "mediapipe-face-mesh").
    #[serde(default)]
    pub tracker: Option<String>,

    /// Camera frame size in pixels.
    #[serde(default)]
    pub frame_width: Option<u32>,
    #[serde(default)]
    pub frame_height: Option<u32>,
}

/// Parse one feed line.
///
/// Returns `None` for blank and comment lines.
pub fn parse_frame_line(line: &str) -> Option<Result<FrameRecord, serde_json::Error>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(serde_json::from_str(trimmed))
}

/// Parse a header line of the form `# {json}`, if present.
pub fn parse_header_line(line: &str) -> Option<FeedHeader> {
    let json = line.trim().strip_prefix('#')?.trim();
    serde_json::from_str(json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::Landmark;

    fn parse_frames(jsonl: &str) -> Result<Vec<FrameRecord>, serde_json::Error> {
        jsonl.lines().filter_map(parse_frame_line).collect()
    }

    #[test]
    fn test_parse_frames_skips_comments_and_blanks() {
        let jsonl = r#"# {"schema_version":"1.0","tracker":"mediapipe-face-mesh"}

{"t": 0.0, "faces": [[{"x": 0.5, "y": 0.5}]]}
{"t": 0.033, "faces": []}
{"faces": [[{"x": 0.1, "y": 0.2, "z": -0.01}], [{"x": 0.9, "y": 0.9}]]}
"#;
        let frames = parse_frames(jsonl).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].t, Some(0.0));
        assert!(frames[1].first_face().is_none());
        assert_eq!(frames[2].t, None);
        assert_eq!(frames[2].faces.len(), 2);
        assert_eq!(
            frames[2].first_face().unwrap().get(0),
            Some(&Landmark {
                x: 0.1,
                y: 0.2,
                z: -0.01
            })
        );
    }

    #[test]
    fn test_missing_faces_means_no_face() {
        let frame = parse_frame_line(r#"{"t": 1.5}"#).unwrap().unwrap();
        assert_eq!(frame, FrameRecord::empty(Some(1.5)));
    }

    #[test]
    fn test_malformed_line_is_error() {
        assert!(parse_frame_line("{not json").unwrap().is_err());
        assert!(parse_frames("{\"faces\": 3}").is_err());
    }

    #[test]
    fn test_header_line() {
        let header =
            parse_header_line(r#"# {"schema_version":"1.0","frame_width":640,"frame_height":480}"#)
                .unwrap();
        assert_eq!(header.frame_width, Some(640));
        assert!(parse_header_line(r#"{"t": 0.0}"#).is_none());
    }
}
