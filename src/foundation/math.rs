/// `3^exp`, or `None` when it does not fit in a `u32`.
pub(crate) fn checked_pow3(exp: u32) -> Option<u32> {
    3u32.checked_pow(exp)
}

/// Return `k` when `n == 3^k`.
pub(crate) fn exact_log3(n: u32) -> Option<u32> {
    if n == 0 {
        return None;
    }
    let mut n = n;
    let mut k = 0;
    while n.is_multiple_of(3) {
        n /= 3;
        k += 1;
    }
    (n == 1).then_some(k)
}

/// Linear blend `a -> b` at `num/den`, rounded to nearest. `num == den` yields exactly `b`.
pub(crate) fn lerp_u8(a: u8, b: u8, num: u32, den: u32) -> u8 {
    debug_assert!(den > 0 && num <= den);
    let a = u64::from(a);
    let b = u64::from(b);
    let num = u64::from(num);
    let den = u64::from(den);
    ((a * (den - num) + b * num + den / 2) / den) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
