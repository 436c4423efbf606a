use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Progress after a frame has been delivered to the sink.
///
/// Observers are called exactly `total` times per completed run, with `completed` running
/// `1..=total`. There is no call before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
    /// Order being built by the delivered frame (0 for the opening frame).
    pub order: u32,
}

impl Progress {
    /// Whole-number percentage, 100 only on the last frame.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.completed.min(self.total) * 100 / self.total) as u8
    }
}

/// Coarse run phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Frames are being rendered and streamed to the sink.
    Rendering { total_frames: u64 },
    /// All frames were delivered; the sink is finalizing its output.
    Finalizing,
    Done,
}

/// Receives progress from a run. An error aborts the run with
/// [`crate::CarpetError::Callback`].
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: Progress) -> anyhow::Result<()>;

    fn on_phase(&mut self, _phase: Phase) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<F> ProgressObserver for F
where
    F: FnMut(Progress) -> anyhow::Result<()>,
{
    fn on_progress(&mut self, progress: Progress) -> anyhow::Result<()> {
        self(progress)
    }
}

/// Polled once per frame boundary, before each frame is rendered.
pub trait CancelCheck {
    fn is_cancelled(&self) -> bool;
}

impl<F> CancelCheck for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Shareable cancellation flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}

impl CancelCheck for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Optional caller hooks for a run.
#[derive(Default)]
pub struct RunHooks<'a> {
    pub progress: Option<&'a mut dyn ProgressObserver>,
    pub cancel: Option<&'a dyn CancelCheck>,
}

impl<'a> RunHooks<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, observer: &'a mut dyn ProgressObserver) -> Self {
        self.progress = Some(observer);
        self
    }

    pub fn with_cancel(mut self, cancel: &'a dyn CancelCheck) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|c| c.is_cancelled())
    }
}
