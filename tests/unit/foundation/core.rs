use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(10, 0).is_err());
    assert_eq!(Fps::new(30000, 1001).unwrap(), Fps { num: 30000, den: 1001 });
    assert_eq!(Fps::whole(10).unwrap(), Fps { num: 10, den: 1 });
}

#[test]
fn fps_deserializes_whole_and_ratio() {
    let a: Fps = serde_json::from_str("10").unwrap();
    assert_eq!(a, Fps { num: 10, den: 1 });
    let b: Fps = serde_json::from_str(r#"{"num":30000,"den":1001}"#).unwrap();
    assert_eq!(b, Fps { num: 30000, den: 1001 });
    assert!(serde_json::from_str::<Fps>("0").is_err());
}

#[test]
fn canvas_parses_square_and_rect() {
    assert_eq!(Canvas::parse("729").unwrap(), Canvas::square(729));
    assert_eq!(
        Canvas::parse("54x27").unwrap(),
        Canvas {
            width: 54,
            height: 27
        }
    );
    let err = Canvas::parse("54xq").unwrap_err();
    assert_eq!(err.field(), Some("resolution"));
}

#[test]
fn rgb_hex_and_array_forms() {
    assert_eq!(Rgb8::from_hex("#FF3366").unwrap(), Rgb8::new(255, 0x33, 0x66));
    assert_eq!(Rgb8::from_hex("0a0b0c").unwrap(), Rgb8::new(10, 11, 12));
    assert!(Rgb8::from_hex("#fff").is_err());
    assert!(Rgb8::from_hex("#gg0000").is_err());

    let c: Rgb8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgb8::new(1, 2, 3));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#010203\"");
    assert_eq!(Rgb8::WHITE.to_rgba8(), [255, 255, 255, 255]);
}
