use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::CarpetResult;
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels. Every pushed frame has exactly this width.
    pub width: u32,
    /// Output height in pixels. Every pushed frame has exactly this height.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Frames the run intends to push. A cancelled run pushes fewer.
    pub total_frames: u64,
}

/// Encoder contract for consuming rendered frames.
///
/// Ordering contract: `begin` once, then `push_frame` in strictly increasing `FrameIndex` order,
/// then either `end` (no more frames, finalize output) or `abort` (discard output).
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> CarpetResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CarpetResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> CarpetResult<()>;
    /// Called instead of `end` when the run fails after `begin`. Must not leave a file at the
    /// destination path.
    fn abort(&mut self) {}
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    ended: bool,
    /// Frames in timeline order.
    pub(crate) frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CarpetResult<()> {
        self.cfg = Some(cfg);
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CarpetResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> CarpetResult<()> {
        self.ended = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.frames.clear();
    }
}
