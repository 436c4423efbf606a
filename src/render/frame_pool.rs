use crate::render::frame::FrameRGBA;

/// Pool configuration for recycled frame buffers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FramePoolOpts {
    /// Maximum number of idle buffers kept for reuse.
    pub(crate) max_retained: usize,
}

impl Default for FramePoolOpts {
    fn default() -> Self {
        Self { max_retained: 1 }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FramePoolStats {
    /// Buffers currently handed out and not yet released.
    pub(crate) checked_out: usize,
    /// High-water mark of `checked_out`.
    pub(crate) peak_checked_out: usize,
    pub(crate) retained: usize,
    pub(crate) alloc_frames: u64,
    pub(crate) dropped_on_release: u64,
}

/// Bounded pool of same-sized RGBA frame buffers.
///
/// Borrow/release happens once per emitted frame, so the resident frame count is
/// `checked_out + retained`.
pub(crate) struct FramePool {
    width: u32,
    height: u32,
    opts: FramePoolOpts,
    stats: FramePoolStats,
    idle: Vec<FrameRGBA>,
}

impl FramePool {
    pub(crate) fn new(width: u32, height: u32, opts: FramePoolOpts) -> Self {
        Self {
            width,
            height,
            opts,
            stats: FramePoolStats::default(),
            idle: Vec::new(),
        }
    }

    pub(crate) fn stats(&self) -> FramePoolStats {
        self.stats
    }

    /// Hand out a buffer of the pool's size. Contents are unspecified.
    pub(crate) fn borrow(&mut self) -> FrameRGBA {
        self.stats.checked_out += 1;
        self.stats.peak_checked_out = self.stats.peak_checked_out.max(self.stats.checked_out);

        if let Some(frame) = self.idle.pop() {
            self.stats.retained = self.idle.len();
            return frame;
        }

        self.stats.alloc_frames = self.stats.alloc_frames.saturating_add(1);
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: vec![0u8; FrameRGBA::byte_len_for(self.width, self.height)],
        }
    }

    /// Return a buffer previously obtained from [`FramePool::borrow`].
    pub(crate) fn release(&mut self, frame: FrameRGBA) {
        self.stats.checked_out = self.stats.checked_out.saturating_sub(1);

        let same_shape = frame.width == self.width
            && frame.height == self.height
            && frame.data.len() == FrameRGBA::byte_len_for(self.width, self.height);
        if !same_shape || self.idle.len() >= self.opts.max_retained {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        self.idle.push(frame);
        self.stats.retained = self.idle.len();
    }
}
