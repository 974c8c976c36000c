use super::*;

#[test]
fn helper_constructors_build_expected_variants() {
    assert!(matches!(
        FablepressError::validation("x"),
        FablepressError::Validation(_)
    ));
    assert!(matches!(FablepressError::story("x"), FablepressError::Story(_)));
    assert!(matches!(
        FablepressError::render("x"),
        FablepressError::Render(_)
    ));
}

#[test]
fn display_carries_the_message() {
    let err = FablepressError::validation("page dimensions must be at least 1x2");
    assert_eq!(
        err.to_string(),
        "validation error: page dimensions must be at least 1x2"
    );
}

#[test]
fn asset_errors_convert_transparently() {
    let missing = crate::assets::AssetError::Missing {
        path: std::path::PathBuf::from("images/page_03.png"),
    };
    let err: FablepressError = missing.into();
    assert!(err.to_string().contains("page_03.png"));
}
