use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SpriteError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        SpriteError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SpriteError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        SpriteError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SpriteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_decode());
}

#[test]
fn decode_is_classified() {
    assert!(SpriteError::decode("truncated png").is_decode());
    assert!(!SpriteError::validation("bad").is_decode());
}
