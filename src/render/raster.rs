use crate::carpet::grid::Grid;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{CarpetError, CarpetResult};
use crate::foundation::math::lerp_u8;
use crate::render::frame::FrameRGBA;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Colours for filled and removed cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarpetColors {
    pub filled: Rgb8,
    pub removed: Rgb8,
}

impl Default for CarpetColors {
    fn default() -> Self {
        Self {
            filled: Rgb8::BLACK,
            removed: Rgb8::WHITE,
        }
    }
}

impl CarpetColors {
    /// Colour of a cell that is `num/den` of the way from filled to removed.
    pub fn fade(&self, blend: Blend) -> Rgb8 {
        let Blend { num, den } = blend;
        Rgb8::new(
            lerp_u8(self.filled.r, self.removed.r, num, den),
            lerp_u8(self.filled.g, self.removed.g, num, den),
            lerp_u8(self.filled.b, self.removed.b, num, den),
        )
    }
}

/// Fade progress `num/den` of cells being removed, `0/den` = filled, `den/den` = removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blend {
    pub num: u32,
    pub den: u32,
}

impl Blend {
    pub const DONE: Self = Self { num: 1, den: 1 };

    /// Blend of step `step` out of `steps` interpolation frames. The last step is always
    /// [`Blend::DONE`]; a single step jumps straight to it.
    pub fn for_step(step: u32, steps: u32) -> Self {
        debug_assert!(step < steps);
        if steps <= 1 {
            return Self::DONE;
        }
        Self {
            num: step,
            den: steps - 1,
        }
    }

    pub fn is_done(self) -> bool {
        self.num == self.den
    }
}

/// Options for rasterising a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOpts {
    /// Rasterise rows of one frame on the rayon pool. Frame emission stays sequential.
    #[serde(default)]
    pub parallel: bool,
}

/// Integer upscale from grid cells to output pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellScale {
    pub x: u32,
    pub y: u32,
}

impl CellScale {
    /// Scale that maps a `size` grid exactly onto `canvas`.
    pub fn for_canvas(size: u32, canvas: Canvas) -> CarpetResult<Self> {
        let fits = |dim: u32| size > 0 && dim > 0 && dim.is_multiple_of(size);
        if !fits(canvas.width) || !fits(canvas.height) {
            return Err(CarpetError::resolution_mismatch(
                canvas.width,
                canvas.height,
                size,
            ));
        }
        Ok(Self {
            x: canvas.width / size,
            y: canvas.height / size,
        })
    }
}

/// Paint the transition `from -> to` into `out`.
///
/// Cells filled in both grids use the filled colour, cells removed in `from` use the removed
/// colour, and cells removed only in `to` use the colour at `blend`.
pub fn rasterize_transition(
    from: &Grid,
    to: &Grid,
    blend: Blend,
    colors: &CarpetColors,
    out: &mut FrameRGBA,
    opts: RenderOpts,
) -> CarpetResult<()> {
    if from.size() != to.size() {
        return Err(CarpetError::parameter(
            "size",
            format!(
                "transition grids differ in size ({} vs {})",
                from.size(),
                to.size()
            ),
        ));
    }
    let size = from.size();
    let scale = CellScale::for_canvas(
        size,
        Canvas {
            width: out.width,
            height: out.height,
        },
    )?;
    if out.data.len() != FrameRGBA::byte_len_for(out.width, out.height) {
        return Err(CarpetError::parameter(
            "frame",
            "frame.data size mismatch with width*height*4",
        ));
    }

    let paints = CellPaints {
        filled: colors.filled.to_rgba8(),
        removed: colors.removed.to_rgba8(),
        fading: colors.fade(blend).to_rgba8(),
    };
    let band_len = out.width as usize * 4 * scale.y as usize;
    let paint = |(gy, band): (usize, &mut [u8])| {
        paint_band(band, from.row(gy as u32), to.row(gy as u32), &paints, scale);
    };

    if opts.parallel {
        out.data
            .par_chunks_mut(band_len)
            .enumerate()
            .for_each(paint);
    } else {
        out.data
            .chunks_mut(band_len)
            .enumerate()
            .for_each(paint);
    }
    Ok(())
}

/// Paint a single grid with no fading cells.
pub fn rasterize_grid(
    grid: &Grid,
    colors: &CarpetColors,
    out: &mut FrameRGBA,
    opts: RenderOpts,
) -> CarpetResult<()> {
    rasterize_transition(grid, grid, Blend::DONE, colors, out, opts)
}

struct CellPaints {
    filled: [u8; 4],
    removed: [u8; 4],
    fading: [u8; 4],
}

impl CellPaints {
    fn pick(&self, was_filled: bool, stays_filled: bool) -> &[u8; 4] {
        match (was_filled, stays_filled) {
            (false, _) => &self.removed,
            (true, true) => &self.filled,
            (true, false) => &self.fading,
        }
    }
}

// One grid row becomes `scale.y` identical pixel rows: paint the first, copy it down.
fn paint_band(
    band: &mut [u8],
    from_row: &[bool],
    to_row: &[bool],
    paints: &CellPaints,
    scale: CellScale,
) {
    let row_len = band.len() / scale.y as usize;
    let (first, rest) = band.split_at_mut(row_len);
    let cell_len = scale.x as usize * 4;
    for ((cell, &was), &stays) in first
        .chunks_exact_mut(cell_len)
        .zip(from_row)
        .zip(to_row)
    {
        let paint = paints.pick(was, stays);
        for px in cell.chunks_exact_mut(4) {
            px.copy_from_slice(paint);
        }
    }
    for row in rest.chunks_exact_mut(row_len) {
        row.copy_from_slice(first);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
