//! Rasterisation of carpet grids into RGBA frames.

pub mod frame;
pub(crate) mod frame_pool;
pub mod raster;
