use crate::carpet::grid::Grid;
use crate::foundation::error::{CarpetError, CarpetResult};
use crate::foundation::math::{checked_pow3, exact_log3};

/// Number of base-3 digits of a valid carpet size (`size == 3^k`), which is also the finest order
/// that size can show.
pub fn max_order(size: u32) -> CarpetResult<u32> {
    exact_log3(size).ok_or_else(|| CarpetError::invalid_size(size))
}

/// Validate `(size, order)` and return the digit count of `size`.
pub(crate) fn validate(size: u32, order: u32) -> CarpetResult<u32> {
    let digits = max_order(size)?;
    if order > digits {
        return Err(CarpetError::invalid_order(size, order));
    }
    Ok(digits)
}

/// Build the carpet of edge `size` at recursion `order`.
///
/// Uses the base-3 membership test; see [`generate_recursive`] for the subdivision form.
#[tracing::instrument(level = "trace")]
pub fn generate(size: u32, order: u32) -> CarpetResult<Grid> {
    let digits = validate(size, order)?;
    if order == 0 {
        return Ok(Grid::filled(size));
    }
    Ok(Grid::from_fn(size, |x, y| {
        removal_digit(digits, x, y).is_none_or(|p| p > order)
    }))
}

/// Build the carpet by explicit subdivision: clear the centre ninth of every block and recurse
/// into the other eight, `order` levels deep.
pub fn generate_recursive(size: u32, order: u32) -> CarpetResult<Grid> {
    validate(size, order)?;
    let mut grid = Grid::filled(size);
    carve(&mut grid, 0, 0, size, 0, order);
    Ok(grid)
}

fn carve(grid: &mut Grid, x0: u32, y0: u32, side: u32, depth: u32, order: u32) {
    if side <= 1 || depth >= order {
        return;
    }
    let third = side / 3;
    for by in 0..3 {
        for bx in 0..3 {
            let (sx, sy) = (x0 + bx * third, y0 + by * third);
            if bx == 1 && by == 1 {
                grid.clear_block(sx, sy, third);
            } else {
                carve(grid, sx, sy, third, depth + 1, order);
            }
        }
    }
}

/// Order at which cell `(x, y)` of a `size` carpet is removed, or `None` if it never is.
pub fn removal_order(size: u32, x: u32, y: u32) -> CarpetResult<Option<u32>> {
    let digits = max_order(size)?;
    if x >= size || y >= size {
        return Err(CarpetError::parameter(
            "cell",
            format!("({x}, {y}) is outside a {size}x{size} carpet"),
        ));
    }
    Ok(removal_digit(digits, x, y))
}

/// Whether cell `(x, y)` is filled at `order`.
pub fn is_filled(size: u32, order: u32, x: u32, y: u32) -> CarpetResult<bool> {
    validate(size, order)?;
    Ok(removal_order(size, x, y)?.is_none_or(|p| p > order))
}

/// First base-3 digit position (1-based, most significant first) where `x` and `y` both have a 1.
pub(crate) fn removal_digit(digits: u32, x: u32, y: u32) -> Option<u32> {
    let mut place = checked_pow3(digits.saturating_sub(1)).unwrap_or(1);
    for p in 1..=digits {
        if (x / place) % 3 == 1 && (y / place) % 3 == 1 {
            return Some(p);
        }
        place /= 3;
    }
    None
}

/// Filled cells of `generate(size, order)`: `size^2 * (8/9)^order`, computed exactly.
pub fn expected_filled_count(size: u32, order: u32) -> CarpetResult<u64> {
    validate(size, order)?;
    let block = u64::from(size / 3u32.pow(order));
    Ok(block * block * 8u64.pow(order))
}

#[cfg(test)]
#[path = "../../tests/unit/carpet/generate.rs"]
mod tests;
