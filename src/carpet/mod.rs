//! Sierpinski carpet occupancy grids.

pub(crate) mod generate;
pub(crate) mod grid;
