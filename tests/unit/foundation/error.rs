use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayerSvgError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LayerSvgError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        LayerSvgError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        LayerSvgError::internal("x")
            .to_string()
            .contains("internal error:")
    );
}

#[test]
fn limit_error_names_the_tripped_limit() {
    let err = LayerSvgError::limit(LimitKind::Depth, "depth 65 > 64");
    assert_eq!(err.limit_kind(), Some(LimitKind::Depth));
    let s = err.to_string();
    assert!(s.contains("depth"), "{s}");
    assert!(s.contains("65 > 64"), "{s}");

    assert_eq!(LayerSvgError::validation("x").limit_kind(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayerSvgError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let parse = serde_json::from_str::<u32>("nope").unwrap_err();
    let err = LayerSvgError::from(parse);
    assert!(matches!(err, LayerSvgError::Serde(_)));
}
