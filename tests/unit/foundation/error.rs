use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(TokenError::parse("x").to_string().contains("parse error:"));
    assert!(
        TokenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TokenError::collaborator("x")
            .to_string()
            .contains("collaborator error:")
    );
    assert!(
        TokenError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn unbound_lists_every_key() {
    let err = TokenError::Unbound {
        keys: vec!["#ff0000".to_string(), "#00ff00".to_string()],
    };
    assert_eq!(err.to_string(), "unbound colors: #ff0000, #00ff00");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TokenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn helpers_build_their_variant() {
    assert!(matches!(TokenError::parse("x"), TokenError::Parse(m) if m == "x"));
    assert!(matches!(TokenError::validation("x"), TokenError::Validation(m) if m == "x"));
    assert!(matches!(TokenError::collaborator("x"), TokenError::Collaborator(m) if m == "x"));
    assert!(matches!(TokenError::serde("x"), TokenError::Serde(m) if m == "x"));
}
