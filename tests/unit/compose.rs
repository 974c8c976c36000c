use super::*;
use image::Rgba;

#[test]
fn odd_pages_put_the_illustration_on_top() {
    for index in [1u32, 3, 9] {
        let slot = LayoutSlot::for_page(index);
        assert!(slot.illustration_top);
        assert!(!slot.cut_at_top());
        assert!(slot.number_at_bottom());
    }
}

#[test]
fn even_pages_invert_the_layout() {
    for index in [2u32, 4, 10] {
        let slot = LayoutSlot::for_page(index);
        assert!(!slot.illustration_top);
        assert!(slot.cut_at_top());
        assert!(!slot.number_at_bottom());
    }
}

#[test]
fn mul_div255_matches_the_alpha_identities() {
    assert_eq!(mul_div255(255, 255), 255);
    assert_eq!(mul_div255(0, 255), 0);
    assert_eq!(mul_div255(255, 0), 0);
    assert_eq!(mul_div255(128, 255), 128);
    assert_eq!(mul_div255(1, 1), 0);
}

#[test]
fn alpha_mask_multiplies_into_the_alpha_channel() {
    let mut img = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 200]));
    let mask = GrayImage::from_pixel(4, 4, image::Luma([128]));
    apply_alpha_mask(&mut img, &mask);
    for px in img.pixels() {
        assert_eq!(&px.0[..3], &[10, 20, 30]);
        assert_eq!(px[3], 100);
    }
}

#[test]
fn fully_masked_pixels_become_transparent() {
    let mut img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
    let mask = GrayImage::from_pixel(2, 2, image::Luma([0]));
    apply_alpha_mask(&mut img, &mask);
    assert!(img.pixels().all(|p| p[3] == 0));
}

#[test]
fn opaque_source_replaces_the_destination() {
    let mut page = RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]));
    let src = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
    composite_over(&mut page, &src, 1, 1);
    assert_eq!(page.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(page.get_pixel(1, 1).0, [255, 0, 0]);
    assert_eq!(page.get_pixel(2, 2).0, [255, 0, 0]);
    assert_eq!(page.get_pixel(3, 3).0, [255, 255, 255]);
}

#[test]
fn transparent_source_leaves_the_destination_untouched() {
    let mut page = RgbImage::from_pixel(3, 3, image::Rgb([7, 8, 9]));
    let src = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 0]));
    composite_over(&mut page, &src, 0, 0);
    assert!(page.pixels().all(|p| p.0 == [7, 8, 9]));
}

#[test]
fn half_alpha_blends_both_layers() {
    let mut page = RgbImage::from_pixel(1, 1, image::Rgb([0, 0, 0]));
    let src = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 128]));
    composite_over(&mut page, &src, 0, 0);
    // (255*128 + 0*127 + 127) / 255
    assert_eq!(page.get_pixel(0, 0).0, [128, 0, 0]);
}

#[test]
fn composite_clips_at_the_page_bounds() {
    let mut page = RgbImage::from_pixel(4, 4, image::Rgb([0, 0, 0]));
    let src = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
    composite_over(&mut page, &src, 2, 2);
    assert_eq!(page.get_pixel(3, 3).0, [255, 0, 0]);
    assert_eq!(page.get_pixel(1, 1).0, [0, 0, 0]);
}

#[test]
fn fill_rows_paints_the_requested_band_only() {
    let mut page = RgbImage::from_pixel(3, 6, image::Rgb([0, 0, 0]));
    fill_rows(&mut page, 2, 2, Rgb([9, 9, 9]));
    for y in 0..6u32 {
        let expected = if (2..4).contains(&y) { [9, 9, 9] } else { [0, 0, 0] };
        assert_eq!(page.get_pixel(0, y).0, expected, "row {y}");
    }
}

#[test]
fn fill_rows_clips_past_the_bottom_edge() {
    let mut page = RgbImage::from_pixel(2, 4, image::Rgb([0, 0, 0]));
    fill_rows(&mut page, 3, 10, Rgb([5, 5, 5]));
    assert_eq!(page.get_pixel(0, 2).0, [0, 0, 0]);
    assert_eq!(page.get_pixel(0, 3).0, [5, 5, 5]);
}
