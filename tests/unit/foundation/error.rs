use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ThumbError::network("x")
            .to_string()
            .contains("network error:")
    );
    assert!(ThumbError::decode("x").to_string().contains("decode error:"));
    assert!(ThumbError::asset("x").to_string().contains("asset error:"));
    assert!(ThumbError::layout("x").to_string().contains("layout error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ThumbError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), "other");
}

#[test]
fn io_errors_convert_with_question_mark() {
    fn open_missing() -> ThumbResult<()> {
        std::fs::read("/definitely/not/here/thumb.png")?;
        Ok(())
    }
    let err = open_missing().unwrap_err();
    assert_eq!(err.kind(), "io");
}
