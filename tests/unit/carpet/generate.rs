use super::*;

#[test]
fn order_zero_is_all_filled() {
    for size in [1u32, 3, 9, 27] {
        let g = generate(size, 0).unwrap();
        assert_eq!(g.filled_count(), u64::from(size * size));
    }
}

#[test]
fn order_one_on_nine_clears_the_centre_block() {
    let g = generate(9, 1).unwrap();
    let expected = "\
#########
#########
#########
###...###
###...###
###...###
#########
#########
#########
";
    assert_eq!(g.to_ascii(), expected);
}

#[test]
fn order_two_on_nine_matches_the_classic_pattern() {
    let g = generate(9, 2).unwrap();
    let expected = "\
#########
#.##.##.#
#########
###...###
#.#...#.#
###...###
#########
#.##.##.#
#########
";
    assert_eq!(g.to_ascii(), expected);
}

#[test]
fn recursive_and_closed_form_agree() {
    for size in [1u32, 3, 9, 27, 81] {
        let k = max_order(size).unwrap();
        for order in 0..=k {
            assert_eq!(
                generate(size, order).unwrap(),
                generate_recursive(size, order).unwrap(),
                "size={size} order={order}"
            );
        }
    }
}

#[test]
fn removal_digit_is_most_significant_first() {
    // (4, 4) in base 3 with two digits is (11, 11): cleared at order 1.
    assert_eq!(removal_order(9, 4, 4).unwrap(), Some(1));
    // (1, 1) is (01, 01): cleared at order 2.
    assert_eq!(removal_order(9, 1, 1).unwrap(), Some(2));
    assert_eq!(removal_order(9, 0, 0).unwrap(), None);
    assert!(is_filled(9, 1, 1, 1).unwrap());
    assert!(!is_filled(9, 2, 1, 1).unwrap());
    assert!(removal_order(9, 9, 0).is_err());
}

#[test]
fn invalid_inputs_are_classified() {
    assert!(matches!(
        generate(10, 1),
        Err(CarpetError::InvalidSize { size: 10 })
    ));
    assert!(matches!(generate(0, 0), Err(CarpetError::InvalidSize { .. })));
    assert!(matches!(
        generate(9, 5),
        Err(CarpetError::InvalidOrder { size: 9, order: 5 })
    ));
    assert!(matches!(
        generate_recursive(9, 3),
        Err(CarpetError::InvalidOrder { .. })
    ));
}

#[test]
fn expected_count_law() {
    assert_eq!(expected_filled_count(27, 3).unwrap(), 512);
    assert_eq!(expected_filled_count(729, 0).unwrap(), 729 * 729);
    assert_eq!(expected_filled_count(729, 1).unwrap(), 729 * 729 / 9 * 8);
}
