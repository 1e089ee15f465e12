use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TesseraError::not_supported(BackendId(2), PrimitiveType::Mesh)
            .to_string()
            .contains("not supported: backend#2 cannot render Mesh")
    );
    assert!(
        TesseraError::fail("x")
            .to_string()
            .contains("render failure:")
    );
    assert!(
        TesseraError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn not_supported_is_distinguished_from_fail() {
    assert!(TesseraError::not_supported(BackendId(1), PrimitiveType::Surface).is_not_supported());
    assert!(!TesseraError::fail("zero-sized").is_not_supported());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TesseraError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
