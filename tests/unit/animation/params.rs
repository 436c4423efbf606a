use super::*;

fn small() -> AnimationParams {
    AnimationParams {
        size: 27,
        depth: 3,
        frames_per_order: 4,
        output: PathBuf::from("target/params_unit/out"),
        ..AnimationParams::default()
    }
}

#[test]
fn defaults_are_valid() {
    let p = AnimationParams::default();
    p.validate().unwrap();
    assert_eq!(p.canvas(), Canvas::square(729));
    assert_eq!(p.output_path(), PathBuf::from("sierpinski_carpet_animation.mp4"));
}

#[test]
fn parameter_errors_name_their_field() {
    let cases: [(&str, AnimationParams); 4] = [
        ("depth", AnimationParams { depth: 0, ..small() }),
        ("frames_per_order", AnimationParams { frames_per_order: 0, ..small() }),
        ("fps", AnimationParams { fps: Fps { num: 0, den: 1 }, ..small() }),
        ("output", AnimationParams { output: PathBuf::new(), ..small() }),
    ];
    for (field, p) in cases {
        assert_eq!(p.validate().unwrap_err().field(), Some(field));
    }
}

#[test]
fn size_order_and_resolution_errors_are_classified() {
    let p = AnimationParams { size: 10, ..small() };
    assert!(matches!(p.validate(), Err(CarpetError::InvalidSize { size: 10 })));

    let p = AnimationParams { size: 9, depth: 5, ..small() };
    assert!(matches!(p.validate(), Err(CarpetError::InvalidOrder { .. })));

    let p = AnimationParams {
        resolution: Some(Canvas::square(100)),
        ..small()
    };
    assert!(matches!(
        p.validate(),
        Err(CarpetError::ResolutionMismatch { .. })
    ));
}

#[test]
fn format_parsing_accepts_aliases_and_rejects_others() {
    assert_eq!("MP4".parse::<OutputFormat>().unwrap(), OutputFormat::Video);
    assert_eq!("video".parse::<OutputFormat>().unwrap(), OutputFormat::Video);
    assert_eq!("gif".parse::<OutputFormat>().unwrap(), OutputFormat::Gif);
    assert_eq!(
        "animated-image".parse::<OutputFormat>().unwrap(),
        OutputFormat::Gif
    );
    let err = "webm".parse::<OutputFormat>().unwrap_err();
    assert_eq!(err.field(), Some("format"));
}

#[test]
fn output_extension_follows_format_unless_given() {
    let p = AnimationParams {
        format: OutputFormat::Gif,
        ..small()
    };
    assert_eq!(p.output_path(), PathBuf::from("target/params_unit/out.gif"));

    let p = AnimationParams {
        output: PathBuf::from("clip.mov"),
        ..small()
    };
    assert_eq!(p.output_path(), PathBuf::from("clip.mov"));
}

#[test]
fn json_fills_optional_fields_with_defaults() {
    let p = AnimationParams::from_json(
        r##"{
            "size": 81,
            "depth": 4,
            "frames_per_order": 10,
            "fps": 12,
            "output": "carpet",
            "format": "gif",
            "colors": { "filled": "#102030", "removed": [250, 250, 250] }
        }"##,
    )
    .unwrap();
    assert_eq!(p.fps, Fps { num: 12, den: 1 });
    assert_eq!(p.format, OutputFormat::Gif);
    assert_eq!(p.colors.filled, crate::foundation::core::Rgb8::new(16, 32, 48));
    assert!(p.overwrite);
    assert_eq!(p.resolution, None);
    assert!(!p.render.parallel);
    p.validate().unwrap();

    let back = AnimationParams::from_json(&p.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, p);
}

#[test]
fn malformed_json_is_a_params_error() {
    let err = AnimationParams::from_json(r#"{"size": 27}"#).unwrap_err();
    assert_eq!(err.field(), Some("params"));
}
