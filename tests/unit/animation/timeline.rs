use super::*;

#[test]
fn frame_count_law_holds() {
    for d in 1..=6u32 {
        for f in [1u32, 2, 5, 15, 30] {
            let t = Timeline::new(d, f).unwrap();
            assert_eq!(t.total_frames(), 1 + u64::from(d) * u64::from(f));
            assert_eq!(t.slots().count() as u64, t.total_frames());
        }
    }
}

#[test]
fn opening_frame_is_order_zero() {
    let t = Timeline::new(3, 4).unwrap();
    let s = t.slot(FrameIndex(0)).unwrap();
    assert_eq!((s.from_order, s.to_order), (0, 0));
    assert!(s.is_exact());
}

#[test]
fn transitions_are_laid_out_in_order() {
    let t = Timeline::new(2, 3).unwrap();
    let got: Vec<(u32, u32, u32, u32)> = t
        .slots()
        .skip(1)
        .map(|s| (s.from_order, s.to_order, s.blend.num, s.blend.den))
        .collect();
    assert_eq!(
        got,
        vec![
            (0, 1, 0, 2),
            (0, 1, 1, 2),
            (0, 1, 2, 2),
            (1, 2, 0, 2),
            (1, 2, 1, 2),
            (1, 2, 2, 2),
        ]
    );
}

#[test]
fn last_frame_of_each_transition_is_exact() {
    let t = Timeline::new(4, 5).unwrap();
    for s in t.slots().skip(1) {
        let last = (s.index.0 - 1) % 5 == 4;
        assert_eq!(s.is_exact(), last, "{s:?}");
    }
}

#[test]
fn single_frame_per_order_jumps_straight_to_each_order() {
    let t = Timeline::new(3, 1).unwrap();
    let orders: Vec<u32> = t.slots().map(|s| s.order()).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
    assert!(t.slots().all(|s| s.is_exact()));
}

#[test]
fn out_of_range_and_invalid_shapes_are_rejected() {
    let t = Timeline::new(2, 2).unwrap();
    assert_eq!(
        t.slot(FrameIndex(5)).unwrap_err().field(),
        Some("index")
    );
    assert_eq!(Timeline::new(0, 2).unwrap_err().field(), Some("depth"));
    assert_eq!(
        Timeline::new(2, 0).unwrap_err().field(),
        Some("frames_per_order")
    );
}
