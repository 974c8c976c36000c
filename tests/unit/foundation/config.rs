use super::*;

#[test]
fn default_config_is_valid() {
    BookConfig::default().validate().unwrap();
}

#[test]
fn default_config_matches_print_target() {
    let cfg = BookConfig::default();
    assert_eq!((cfg.page_width, cfg.page_height), (1875, 2775));
    assert_eq!(cfg.dpi, 300);
    assert_eq!(cfg.half_height(), 1387);
}

#[test]
fn rejects_degenerate_page_dimensions() {
    let cfg = BookConfig {
        page_width: 0,
        ..BookConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = BookConfig {
        page_height: 1,
        ..BookConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_margin_wider_than_page() {
    let cfg = BookConfig {
        page_width: 100,
        text_margin: 50,
        ..BookConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_out_of_range_opacity() {
    let cfg = BookConfig {
        bg_opacity_edge: 1.5,
        ..BookConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_empty_edge_style_pool() {
    let cfg = BookConfig {
        edge_styles: vec![],
        ..BookConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_bad_end_bar_fraction() {
    let cfg = BookConfig {
        end_bar_fraction: 1.0,
        ..BookConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn text_max_width_accounts_for_both_margins() {
    let cfg = BookConfig {
        page_width: 500,
        text_margin: 100,
        ..BookConfig::default()
    };
    assert_eq!(cfg.text_max_width(), 300.0);
}

#[test]
fn config_round_trips_through_json() {
    let cfg = BookConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    let back: BookConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}
