use super::*;
use crate::carpet::generate::generate;

fn blank(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA::solid(width, height, [1, 2, 3, 4])
}

#[test]
fn blend_for_step_reaches_done_on_last_step() {
    assert_eq!(Blend::for_step(0, 1), Blend::DONE);
    assert_eq!(Blend::for_step(0, 5), Blend { num: 0, den: 4 });
    assert!(Blend::for_step(4, 5).is_done());
    assert!(!Blend::for_step(3, 5).is_done());
}

#[test]
fn fade_interpolates_channels_linearly() {
    let colors = CarpetColors {
        filled: Rgb8::new(0, 100, 200),
        removed: Rgb8::new(200, 100, 0),
    };
    assert_eq!(colors.fade(Blend { num: 0, den: 4 }), colors.filled);
    assert_eq!(colors.fade(Blend { num: 2, den: 4 }), Rgb8::new(100, 100, 100));
    assert_eq!(colors.fade(Blend::DONE), colors.removed);
}

#[test]
fn grid_upsamples_each_cell_to_a_pixel_block() {
    let g = generate(3, 1).unwrap();
    let colors = CarpetColors::default();
    let mut out = blank(6, 6);
    rasterize_grid(&g, &colors, &mut out, RenderOpts::default()).unwrap();

    for y in 0..6 {
        for x in 0..6 {
            let centre = (2..4).contains(&x) && (2..4).contains(&y);
            let want = if centre { [255, 255, 255, 255] } else { [0, 0, 0, 255] };
            assert_eq!(out.pixel(x, y), want, "({x}, {y})");
        }
    }
}

#[test]
fn non_square_scale_is_supported() {
    let g = generate(3, 1).unwrap();
    let mut out = blank(9, 3);
    rasterize_grid(&g, &CarpetColors::default(), &mut out, RenderOpts::default()).unwrap();
    assert_eq!(out.pixel(3, 1), [255, 255, 255, 255]);
    assert_eq!(out.pixel(5, 1), [255, 255, 255, 255]);
    assert_eq!(out.pixel(6, 1), [0, 0, 0, 255]);
}

#[test]
fn transition_paints_three_cell_classes() {
    let from = generate(9, 1).unwrap();
    let to = generate(9, 2).unwrap();
    let colors = CarpetColors::default();
    let mut out = blank(9, 9);
    rasterize_transition(
        &from,
        &to,
        Blend { num: 1, den: 2 },
        &colors,
        &mut out,
        RenderOpts::default(),
    )
    .unwrap();

    // Removed at order 1.
    assert_eq!(out.pixel(4, 4), [255, 255, 255, 255]);
    // Being removed at order 2.
    assert_eq!(out.pixel(1, 1), [128, 128, 128, 255]);
    // Never removed.
    assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);
}

#[test]
fn parallel_and_sequential_rasterisation_match() {
    let from = generate(27, 2).unwrap();
    let to = generate(27, 3).unwrap();
    let colors = CarpetColors::default();
    let blend = Blend { num: 3, den: 7 };

    let mut seq = blank(54, 54);
    rasterize_transition(&from, &to, blend, &colors, &mut seq, RenderOpts { parallel: false })
        .unwrap();
    let mut par = blank(54, 54);
    rasterize_transition(&from, &to, blend, &colors, &mut par, RenderOpts { parallel: true })
        .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn resolution_must_be_a_multiple_of_size() {
    let g = generate(9, 1).unwrap();
    let mut out = blank(10, 9);
    let err = rasterize_grid(&g, &CarpetColors::default(), &mut out, RenderOpts::default())
        .unwrap_err();
    assert!(matches!(
        err,
        CarpetError::ResolutionMismatch {
            width: 10,
            height: 9,
            size: 9
        }
    ));
    assert!(CellScale::for_canvas(9, Canvas::square(0)).is_err());
    assert_eq!(
        CellScale::for_canvas(9, Canvas { width: 18, height: 27 }).unwrap(),
        CellScale { x: 2, y: 3 }
    );
}
