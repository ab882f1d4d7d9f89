//! Frame sources.
//!
//! A source yields tracker frames in capture order until it is
//! exhausted. Read or parse failures end the session; there is no retry.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use facepoint_common::error::{FacepointError, FacepointResult};
use facepoint_face_model::{parse_frame_line, parse_header_line, FeedHeader, FrameRecord};

/// Trait for anything that produces tracker frames.
pub trait FrameSource: Send {
    /// The next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> FacepointResult<Option<FrameRecord>>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Reads a JSONL tracker feed line by line.
pub struct JsonlFrameSource<R> {
    reader: R,
    name: String,
    header: Option<FeedHeader>,
    line: String,
    line_number: usize,
}

impl JsonlFrameSource<BufReader<File>> {
    /// Open a feed file.
    pub fn open(path: &Path) -> FacepointResult<Self> {
        if !path.exists() {
            return Err(FacepointError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> JsonlFrameSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            header: None,
            line: String::new(),
            line_number: 0,
        }
    }

    /// Header of the feed, once its first line has been read.
    pub fn header(&self) -> Option<&FeedHeader> {
        self.header.as_ref()
    }
}

impl<R: BufRead + Send> FrameSource for JsonlFrameSource<R> {
    fn next_frame(&mut self) -> FacepointResult<Option<FrameRecord>> {
        loop {
            self.line.clear();
            let read = self.reader.read_line(&mut self.line).map_err(|e| {
                FacepointError::frame_source(format!("{}: read failed: {e}", self.name))
            })?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if self.line_number == 1 {
                if let Some(header) = parse_header_line(&self.line) {
                    tracing::info!(
                        schema = %header.schema_version,
                        tracker = header.tracker.as_deref().unwrap_or("unknown"),
                        frame_width = header.frame_width,
                        frame_height = header.frame_height,
                        "Frame feed header"
                    );
                    self.header = Some(header);
                    continue;
                }
            }

            match parse_frame_line(&self.line) {
                None => continue,
                Some(Ok(frame)) => return Ok(Some(frame)),
                Some(Err(e)) => {
                    return Err(FacepointError::frame_source(format!(
                        "{}:{}: invalid frame: {e}",
                        self.name, self.line_number
                    )));
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// In-memory source for tests and replays.
#[derive(Debug, Default)]
pub struct VecFrameSource {
    frames: VecDeque<FrameRecord>,
}

impl VecFrameSource {
    pub fn new(frames: Vec<FrameRecord>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for VecFrameSource {
    fn next_frame(&mut self) -> FacepointResult<Option<FrameRecord>> {
        Ok(self.frames.pop_front())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
