use super::*;

#[test]
fn exact_log3_accepts_only_powers() {
    assert_eq!(exact_log3(1), Some(0));
    assert_eq!(exact_log3(3), Some(1));
    assert_eq!(exact_log3(729), Some(6));
    assert_eq!(exact_log3(3u32.pow(20)), Some(20));
    for n in [0u32, 2, 6, 10, 18, 728, 730] {
        assert_eq!(exact_log3(n), None, "{n}");
    }
}

#[test]
fn checked_pow3_overflows_to_none() {
    assert_eq!(checked_pow3(0), Some(1));
    assert_eq!(checked_pow3(5), Some(243));
    assert_eq!(checked_pow3(21), None);
}

#[test]
fn lerp_hits_endpoints_exactly() {
    for (a, b) in [(0u8, 255u8), (255, 0), (17, 200), (90, 90)] {
        for den in [1u32, 2, 7, 29] {
            assert_eq!(lerp_u8(a, b, 0, den), a);
            assert_eq!(lerp_u8(a, b, den, den), b);
        }
    }
    assert_eq!(lerp_u8(0, 255, 1, 2), 128);
    assert_eq!(lerp_u8(255, 0, 1, 2), 128);
}
