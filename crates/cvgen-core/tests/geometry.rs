use cvgen_core::geometry::{PageGeometry, mm_to_pt};

#[test]
fn a4_page_height_for_1000px_width() {
    assert_eq!(PageGeometry::a4().page_height_pixels(1000), 1414);
}

#[test]
fn page_height_is_floored_not_rounded() {
    // 1000 * 297 / 210 = 1414.28..., 1001 * 297 / 210 = 1415.7
    assert_eq!(PageGeometry::A4.page_height_pixels(1001), 1415);
}

#[test]
fn exact_ratio_is_not_truncated_below() {
    // 210 * 297 / 210 is exactly 297 and must not become 296.
    assert_eq!(PageGeometry::A4.page_height_pixels(210), 297);
    assert_eq!(PageGeometry::A4.page_height_pixels(420), 594);
    // Letter is exactly 17:22.
    assert_eq!(PageGeometry::LETTER.page_height_pixels(17), 22);
    assert_eq!(PageGeometry::LETTER.page_height_pixels(34), 44);
    assert_eq!(PageGeometry::LETTER.page_height_pixels(1700), 2200);
}

#[test]
fn letter_multiples_of_17_are_exact() {
    let letter = PageGeometry::letter();
    for k in 1..=1000u32 {
        assert_eq!(letter.page_height_pixels(17 * k), 22 * k, "width {}", 17 * k);
    }
}

#[test]
fn letter_non_multiples_are_floored() {
    // 1000 * 22 / 17 = 1294.1...
    assert_eq!(PageGeometry::LETTER.page_height_pixels(1000), 1294);
}

#[test]
fn a4_in_points() {
    let g = PageGeometry::a4();
    assert!((g.width_pt() - 595.2756).abs() < 0.01);
    assert!((g.height_pt() - 841.8898).abs() < 0.01);
}

#[test]
fn letter_in_points() {
    let g = PageGeometry::letter();
    assert!((g.width_pt() - 612.0).abs() < 0.01);
    assert!((g.height_pt() - 792.0).abs() < 0.01);
}

#[test]
fn custom_rejects_non_positive_sizes() {
    assert!(PageGeometry::custom(0.0, 297.0).is_err());
    assert!(PageGeometry::custom(210.0, -1.0).is_err());
    assert!(PageGeometry::custom(f64::NAN, 297.0).is_err());
    assert!(PageGeometry::custom(100.0, 100.0).is_ok());
}

#[test]
fn negative_mm_clamps_to_zero_points() {
    assert_eq!(mm_to_pt(-5.0), 0.0);
}

#[test]
fn default_is_a4() {
    assert_eq!(PageGeometry::default(), PageGeometry::A4);
}
