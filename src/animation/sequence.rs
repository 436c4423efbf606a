use crate::animation::params::AnimationParams;
use crate::animation::timeline::{FrameSlot, Timeline};
use crate::carpet::generate::generate;
use crate::carpet::grid::Grid;
use crate::encode::sink::SinkConfig;
use crate::foundation::core::{Canvas, FrameIndex, Fps};
use crate::foundation::error::CarpetResult;
use crate::render::frame::FrameRGBA;
use crate::render::frame_pool::{FramePool, FramePoolOpts};
use crate::render::raster::{CarpetColors, RenderOpts, rasterize_transition};

/// One rendered frame and its place in the timeline.
#[derive(Clone, Debug)]
pub struct SequencedFrame {
    pub index: FrameIndex,
    pub slot: FrameSlot,
    pub frame: FrameRGBA,
}

struct OrderGrid {
    order: u32,
    grid: Grid,
}

impl OrderGrid {
    fn generate(size: u32, order: u32) -> CarpetResult<Self> {
        Ok(Self {
            order,
            grid: generate(size, order)?,
        })
    }
}

/// Lazy, finite, non-restartable sequence of animation frames.
///
/// Holds the grids of the current transition and a small frame-buffer pool. Frames handed back
/// through [`FrameSequence::recycle`] are reused, so a consumer that recycles each frame before
/// pulling the next keeps a single frame buffer resident.
pub struct FrameSequence {
    size: u32,
    fps: Fps,
    canvas: Canvas,
    colors: CarpetColors,
    render: RenderOpts,
    timeline: Timeline,

    next: u64,
    done: bool,
    from: OrderGrid,
    to: OrderGrid,
    pool: FramePool,
}

impl FrameSequence {
    /// Validate `params` and prepare the sequence. Nothing is rendered yet.
    pub fn new(params: &AnimationParams) -> CarpetResult<Self> {
        params.validate()?;
        let canvas = params.canvas();
        Ok(Self {
            size: params.size,
            fps: params.fps,
            canvas,
            colors: params.colors,
            render: params.render,
            timeline: Timeline::new(params.depth, params.frames_per_order)?,
            next: 0,
            done: false,
            from: OrderGrid::generate(params.size, 0)?,
            to: OrderGrid::generate(params.size, 0)?,
            pool: FramePool::new(canvas.width, canvas.height, FramePoolOpts::default()),
        })
    }

    pub fn total_frames(&self) -> u64 {
        self.timeline.total_frames()
    }

    /// Sink configuration matching the frames this sequence produces.
    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps: self.fps,
            total_frames: self.total_frames(),
        }
    }

    /// Hand a frame buffer back for reuse.
    pub fn recycle(&mut self, frame: FrameRGBA) {
        self.pool.release(frame);
    }

    /// Most frame buffers that were checked out at the same time.
    pub fn peak_frames_resident(&self) -> usize {
        self.pool.stats().peak_checked_out
    }

    fn ensure_grids(&mut self, from_order: u32, to_order: u32) -> CarpetResult<()> {
        if self.from.order == from_order && self.to.order == to_order {
            return Ok(());
        }

        // The target of the previous transition is the source of the next one.
        if self.to.order == from_order {
            std::mem::swap(&mut self.from, &mut self.to);
        } else if self.from.order != from_order {
            self.from = OrderGrid::generate(self.size, from_order)?;
        }
        self.to = OrderGrid::generate(self.size, to_order)?;
        tracing::debug!(from_order, to_order, "transition grids ready");
        Ok(())
    }

    fn render_next(&mut self) -> CarpetResult<SequencedFrame> {
        let slot = self.timeline.slot(FrameIndex(self.next))?;
        self.ensure_grids(slot.from_order, slot.to_order)?;

        let mut frame = self.pool.borrow();
        if let Err(e) = rasterize_transition(
            &self.from.grid,
            &self.to.grid,
            slot.blend,
            &self.colors,
            &mut frame,
            self.render,
        ) {
            self.pool.release(frame);
            return Err(e);
        }
        tracing::trace!(index = slot.index.0, order = slot.order(), "frame rendered");
        self.next += 1;
        Ok(SequencedFrame {
            index: slot.index,
            slot,
            frame,
        })
    }
}

impl Iterator for FrameSequence {
    type Item = CarpetResult<SequencedFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.next >= self.total_frames() {
            return None;
        }
        let item = self.render_next();
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.done {
            0
        } else {
            self.total_frames().saturating_sub(self.next) as usize
        };
        (left, Some(left))
    }
}

impl std::iter::FusedIterator for FrameSequence {}

/// Render frame `index` of the animation described by `params` on its own.
pub fn render_frame_at(params: &AnimationParams, index: FrameIndex) -> CarpetResult<FrameRGBA> {
    params.validate()?;
    let timeline = Timeline::new(params.depth, params.frames_per_order)?;
    let slot = timeline.slot(index)?;
    let from = generate(params.size, slot.from_order)?;
    let to = generate(params.size, slot.to_order)?;

    let canvas = params.canvas();
    let mut frame = FrameRGBA::solid(canvas.width, canvas.height, [0, 0, 0, 255]);
    rasterize_transition(
        &from,
        &to,
        slot.blend,
        &params.colors,
        &mut frame,
        params.render,
    )?;
    Ok(frame)
}

/// Render the exact carpet at `order` using the size, colours and resolution of `params`.
pub fn render_order(params: &AnimationParams, order: u32) -> CarpetResult<FrameRGBA> {
    let grid = generate(params.size, order)?;
    let canvas = params.canvas();
    let mut frame = FrameRGBA::solid(canvas.width, canvas.height, [0, 0, 0, 255]);
    crate::render::raster::rasterize_grid(&grid, &params.colors, &mut frame, params.render)?;
    Ok(frame)
}
