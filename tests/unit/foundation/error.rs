use super::*;

#[test]
fn display_names_the_offending_values() {
    assert!(
        CarpetError::invalid_size(10)
            .to_string()
            .contains("invalid carpet size 10")
    );
    assert!(
        CarpetError::invalid_order(9, 5)
            .to_string()
            .contains("invalid order 5")
    );
    assert!(
        CarpetError::resolution_mismatch(100, 81, 27)
            .to_string()
            .contains("100x81")
    );
    assert!(
        CarpetError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
}

#[test]
fn parameter_error_reports_field() {
    let err = CarpetError::parameter("depth", "must be >= 1");
    assert_eq!(err.field(), Some("depth"));
    assert!(err.to_string().contains("`depth`"));
    assert_eq!(CarpetError::invalid_size(2).field(), None);
}

#[test]
fn callback_and_other_preserve_source() {
    let err = CarpetError::callback(anyhow::anyhow!("observer hung up"));
    assert!(err.to_string().contains("observer hung up"));

    let base = std::io::Error::other("boom");
    let err = CarpetError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
