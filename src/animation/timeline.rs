use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CarpetError, CarpetResult};
use crate::render::raster::Blend;

/// Where a frame sits in the animation: the transition it belongs to and how far it has faded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSlot {
    pub index: FrameIndex,
    /// Order shown before the transition.
    pub from_order: u32,
    /// Order the transition leads to. Equal to `from_order` only for the opening frame.
    pub to_order: u32,
    pub blend: Blend,
}

impl FrameSlot {
    /// Order reported to progress observers.
    pub fn order(&self) -> u32 {
        self.to_order
    }

    /// Whether this frame shows the exact grid at `to_order`.
    pub fn is_exact(&self) -> bool {
        self.blend.is_done()
    }
}

/// Frame layout of a run: one opening frame, then `frames_per_order` frames per transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline {
    depth: u32,
    frames_per_order: u32,
}

impl Timeline {
    pub fn new(depth: u32, frames_per_order: u32) -> CarpetResult<Self> {
        if depth < 1 {
            return Err(CarpetError::parameter("depth", "must be >= 1"));
        }
        if frames_per_order < 1 {
            return Err(CarpetError::parameter("frames_per_order", "must be >= 1"));
        }
        Ok(Self {
            depth,
            frames_per_order,
        })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn frames_per_order(&self) -> u32 {
        self.frames_per_order
    }

    /// `1 + depth * frames_per_order`.
    pub fn total_frames(&self) -> u64 {
        1 + u64::from(self.depth) * u64::from(self.frames_per_order)
    }

    /// Locate frame `index`.
    pub fn slot(&self, index: FrameIndex) -> CarpetResult<FrameSlot> {
        if index.0 >= self.total_frames() {
            return Err(CarpetError::parameter(
                "index",
                format!(
                    "frame {} is past the end of a {}-frame animation",
                    index.0,
                    self.total_frames()
                ),
            ));
        }
        if index.0 == 0 {
            return Ok(FrameSlot {
                index,
                from_order: 0,
                to_order: 0,
                blend: Blend::DONE,
            });
        }

        let f = u64::from(self.frames_per_order);
        let k = index.0 - 1;
        let from_order = (k / f) as u32;
        let step = (k % f) as u32;
        Ok(FrameSlot {
            index,
            from_order,
            to_order: from_order + 1,
            blend: Blend::for_step(step, self.frames_per_order),
        })
    }

    /// Every slot in timeline order.
    pub fn slots(&self) -> impl Iterator<Item = FrameSlot> + '_ {
        (0..self.total_frames()).filter_map(|i| self.slot(FrameIndex(i)).ok())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
