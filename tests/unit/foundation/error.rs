use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(AdError::load("x").to_string().contains("load error:"));
    assert!(AdError::surface("x").to_string().contains("surface error:"));
    assert!(
        AdError::export_encode("x")
            .to_string()
            .contains("export encode error:")
    );
    assert!(
        AdError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AdError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_errors_convert_with_question_mark() {
    fn inner() -> AdResult<()> {
        Err(anyhow::anyhow!("wrapped"))?;
        Ok(())
    }
    let err = inner().unwrap_err();
    assert!(matches!(err, AdError::Other(_)));
}
