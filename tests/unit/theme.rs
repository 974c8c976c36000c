use super::*;
use image::Rgba;

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

#[test]
fn scaled_saturates_at_255() {
    assert_eq!(Rgb([200, 200, 200]).scaled([2.0; 3]), Rgb([255, 255, 255]));
}

#[test]
fn max_channel_picks_the_largest() {
    assert_eq!(Rgb([10, 200, 30]).max_channel(), 200);
    assert_eq!(Rgb([0, 0, 0]).max_channel(), 0);
}

#[test]
fn shades_derive_from_the_base_color() {
    let theme = ThemeColor::from_base(Rgb([208, 96, 48]));
    assert_eq!(theme.dark, Rgb([104, 58, 34]));
    assert_eq!(theme.light, Rgb([248, 236, 234]));
    assert_eq!(theme.bright, Rgb([255, 118, 59]));
}

#[test]
fn bright_boost_is_capped() {
    // 255/16 would be a ~16x boost; it must clamp to the cap.
    assert_eq!(brighten(Rgb([16, 8, 0])), Rgb([48, 24, 0]));
}

#[test]
fn brightening_black_falls_back_to_the_default_light() {
    assert_eq!(brighten(Rgb([0, 0, 0])), DEFAULT_LIGHT);
}

#[test]
fn uniform_black_image_yields_the_default_theme() {
    let img = solid(40, 40, [0, 0, 0]);
    assert_eq!(ThemeColor::from_image(&img), ThemeColor::default());
}

#[test]
fn empty_image_yields_the_default_theme() {
    let img = RgbaImage::new(0, 0);
    assert_eq!(ThemeColor::from_image(&img), ThemeColor::default());
}

#[test]
fn missing_file_yields_the_default_theme() {
    let theme = ThemeColor::from_path(Path::new("/nonexistent/fablepress/art.png"));
    assert_eq!(theme, ThemeColor::default());
}

#[test]
fn small_vivid_region_beats_a_grey_majority() {
    // 90% mid-grey, 10% vivid red. Saturation weighting must pick the red.
    let img = RgbaImage::from_fn(100, 100, |_, y| {
        if y < 90 {
            Rgba([128, 128, 128, 255])
        } else {
            Rgba([250, 10, 10, 255])
        }
    });
    let theme = ThemeColor::from_image(&img);
    assert!(theme.bright.0[0] > 200, "bright = {:?}", theme.bright);
    assert!(
        theme.bright.0[0] > theme.bright.0[1].saturating_add(100),
        "bright = {:?}",
        theme.bright
    );
    assert!(theme.dark.0[0] > 100, "dark = {:?}", theme.dark);
}

#[test]
fn desaturated_image_falls_back_to_the_brightest_color() {
    // All-grey content: nothing passes the saturation gate, so the
    // brightest non-black grey wins.
    let img = RgbaImage::from_fn(100, 100, |_, y| {
        if y < 50 {
            Rgba([90, 90, 90, 255])
        } else {
            Rgba([180, 180, 180, 255])
        }
    });
    let theme = ThemeColor::from_image(&img);
    assert_ne!(theme, ThemeColor::default());
    // Light shade of a grey base stays grey-ish, well above mid-tone.
    assert!(theme.light.0[0] > 230, "light = {:?}", theme.light);
}

#[test]
fn extraction_is_deterministic() {
    let img = RgbaImage::from_fn(64, 64, |x, y| {
        Rgba([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255])
    });
    assert_eq!(ThemeColor::from_image(&img), ThemeColor::from_image(&img));
}
