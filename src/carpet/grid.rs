/// Square occupancy map of a carpet at one recursion order. `true` is a filled cell.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// All-filled grid of edge `size`.
    pub(crate) fn filled(size: u32) -> Self {
        let len = (size as usize).saturating_mul(size as usize);
        Self {
            size,
            cells: vec![true; len],
        }
    }

    pub(crate) fn from_fn(size: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut cells = Vec::with_capacity((size as usize).saturating_mul(size as usize));
        for y in 0..size {
            for x in 0..size {
                cells.push(f(x, y));
            }
        }
        Self { size, cells }
    }

    /// Clear a `side x side` block whose top-left cell is `(x0, y0)`.
    pub(crate) fn clear_block(&mut self, x0: u32, y0: u32, side: u32) {
        let size = self.size as usize;
        for y in y0..y0 + side {
            let row = y as usize * size;
            self.cells[row + x0 as usize..row + (x0 + side) as usize].fill(false);
        }
    }

    /// Edge length in cells.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether cell `(x, y)` is filled. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> bool {
        assert!(
            x < self.size && y < self.size,
            "cell ({x}, {y}) out of bounds"
        );
        self.cells[y as usize * self.size as usize + x as usize]
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> u64 {
        self.cells.iter().filter(|c| **c).count() as u64
    }

    /// Cells of row `y`. Panics when out of bounds.
    pub fn row(&self, y: u32) -> &[bool] {
        let size = self.size as usize;
        let start = y as usize * size;
        &self.cells[start..start + size]
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.size.max(1) as usize)
    }

    /// One line per row, `#` for filled and `.` for removed.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.size as usize);
        for row in self.rows() {
            out.extend(row.iter().map(|&c| if c { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("size", &self.size)
            .field("filled", &self.filled_count())
            .finish()
    }
}
