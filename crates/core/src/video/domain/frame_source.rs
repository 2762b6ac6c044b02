use crate::shared::frame::Frame;

/// Supplies decoded frames from a live or replayed video source.
///
/// `grab` returns a snapshot of the current frame; the analysis core
/// never writes back. Implementations own all acquisition detail
/// (camera stream, file replay, test fixtures).
pub trait FrameSource: Send {
    /// Frame dimensions, fixed for the lifetime of the source.
    fn dimensions(&self) -> (u32, u32);

    fn grab(&mut self) -> Result<Frame, Box<dyn std::error::Error>>;
}
