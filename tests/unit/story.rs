use super::*;

#[test]
fn parses_object_pages() {
    let doc = StoryDocument::from_json_str(
        r#"[{"story": "Milo woke up early."}, {"story": "He packed a snack."}]"#,
        Some("Milo"),
    )
    .unwrap();
    assert_eq!(doc.title, "Milo");
    assert_eq!(doc.pages.len(), 2);
    assert_eq!(doc.pages[0].index, 1);
    assert_eq!(doc.pages[1].index, 2);
    assert_eq!(doc.pages[1].text, "He packed a snack.");
}

#[test]
fn parses_bare_string_pages() {
    let doc =
        StoryDocument::from_json_str(r#"["First page.", "Second page."]"#, Some("T")).unwrap();
    assert_eq!(doc.pages[0].text, "First page.");
    assert_eq!(doc.pages[1].index, 2);
}

#[test]
fn parses_mixed_page_shapes() {
    let doc = StoryDocument::from_json_str(
        r#"["Plain text.", {"story": "Object text."}]"#,
        Some("T"),
    )
    .unwrap();
    assert_eq!(doc.pages[0].text, "Plain text.");
    assert_eq!(doc.pages[1].text, "Object text.");
}

#[test]
fn empty_story_is_fatal() {
    let err = StoryDocument::from_json_str("[]", None).unwrap_err();
    assert!(matches!(err, FablepressError::Story(_)));
}

#[test]
fn malformed_json_is_a_story_error() {
    let err = StoryDocument::from_json_str("{not json", None).unwrap_err();
    assert!(err.to_string().contains("malformed story JSON"));
}

#[test]
fn explicit_title_wins_and_is_trimmed() {
    let doc =
        StoryDocument::from_json_str(r#"["THE LOST KITE"]"#, Some("  A Windy Day  ")).unwrap();
    assert_eq!(doc.title, "A Windy Day");
}

#[test]
fn blank_explicit_title_falls_back_to_inference() {
    let doc = StoryDocument::from_json_str(r#"["THE LOST KITE"]"#, Some("   ")).unwrap();
    assert_eq!(doc.title, "THE LOST KITE");
}

#[test]
fn short_uppercase_first_page_becomes_the_title() {
    let doc = StoryDocument::from_json_str(r#"["THE LOST KITE", "It flew."]"#, None).unwrap();
    assert_eq!(doc.title, "THE LOST KITE");
}

#[test]
fn apostrophe_first_page_becomes_the_title() {
    let doc = StoryDocument::from_json_str(r#"["Milo's Big Day", "He woke."]"#, None).unwrap();
    assert_eq!(doc.title, "Milo's Big Day");
}

#[test]
fn ordinary_prose_first_page_keeps_the_fallback_title() {
    let doc = StoryDocument::from_json_str(
        r#"["Once upon a time there was a small hedgehog."]"#,
        None,
    )
    .unwrap();
    assert_eq!(doc.title, "My Storybook");
}

#[test]
fn long_uppercase_first_page_keeps_the_fallback_title() {
    let doc = StoryDocument::from_json_str(
        r#"["ONE TWO THREE FOUR FIVE SIX SEVEN EIGHT NINE TEN ELEVEN"]"#,
        None,
    )
    .unwrap();
    assert_eq!(doc.title, "My Storybook");
}

#[test]
fn filenames_follow_the_page_convention() {
    assert_eq!(cover_filename(), "page_00_cover.png");
    assert_eq!(cover_art_filename(), "page_00_cover_bg.png");
    assert_eq!(story_page_filename(3), "page_03.png");
    assert_eq!(story_page_filename(12), "page_12.png");
    assert_eq!(wash_filename(3), "page_03_bg.png");
    assert_eq!(end_filename(7), "page_07_end.png");
    assert_eq!(end_wash_filename(7), "page_07_end_bg.png");
    assert_eq!(end_badge_filename(7), "page_07_end_badge.png");
}
