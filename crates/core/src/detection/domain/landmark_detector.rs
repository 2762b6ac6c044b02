use crate::detection::domain::landmark_geometry::LandmarkGeometry;
use crate::shared::frame::Frame;

/// Domain interface for facial landmark detection.
///
/// One call per analysis cycle, no latency bound. `Ok(None)` means no face
/// was found in the frame; implementations may be stateful (e.g. tracking
/// across frames), hence `&mut self`.
pub trait LandmarkDetector: Send {
    fn detect(&mut self, frame: &Frame)
        -> Result<Option<LandmarkGeometry>, Box<dyn std::error::Error>>;
}
