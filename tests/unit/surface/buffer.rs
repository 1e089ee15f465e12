use super::*;

#[test]
fn new_surface_is_transparent() {
    let s = Surface::new(3, 2).unwrap();
    assert_eq!((s.width(), s.height()), (3, 2));
    assert_eq!(s.pixels().len(), 6);
    assert!(s.pixels().iter().all(|c| *c == Color::alpha()));
    assert!(s.is_valid());
}

#[test]
fn zero_sized_surfaces_exist_but_are_not_valid() {
    assert!(!Surface::default().is_valid());
    assert!(!Surface::new(0, 5).unwrap().is_valid());
}

#[test]
fn oversized_dimensions_are_rejected() {
    let err = Surface::new(u32::MAX, 1).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn get_and_set_ignore_out_of_bounds() {
    let mut s = Surface::new(2, 2).unwrap();
    assert!(s.set(1, 1, Color::RED));
    assert_eq!(s.get(1, 1), Some(Color::RED));
    assert!(!s.set(2, 0, Color::RED));
    assert!(!s.set(-1, 0, Color::RED));
    assert_eq!(s.get(0, 2), None);
}

#[test]
fn copy_from_requires_equal_size() {
    let src = Surface::filled(2, 2, Color::GREEN).unwrap();
    let mut dst = Surface::new(2, 2).unwrap();
    dst.copy_from(&src).unwrap();
    assert_eq!(dst, src);

    let mut other = Surface::new(3, 2).unwrap();
    assert!(other.copy_from(&src).is_err());
}

#[test]
fn cubic_sample_of_uniform_surface_is_that_color_everywhere() {
    let s = Surface::filled(4, 4, Color::RED).unwrap();
    for (x, y) in [(0.0, 0.0), (1.5, 2.25), (3.9, 3.9), (-2.0, 10.0)] {
        let c = s.cubic_sample(x, y);
        assert!(c.approx_eq(Color::RED, 1e-5), "({x}, {y}) -> {c:?}");
    }
}

#[test]
fn cubic_sample_on_pixel_returns_pixel() {
    let mut s = Surface::new(3, 3).unwrap();
    s.set(1, 1, Color::new(0.5, 0.25, 1.0, 0.5));
    let c = s.cubic_sample(1.0, 1.0);
    assert!(c.approx_eq(Color::new(0.5, 0.25, 1.0, 0.5), 1e-6), "{c:?}");
}

#[test]
fn cubic_sample_does_not_bleed_transparent_color() {
    let mut s = Surface::new(2, 1).unwrap();
    s.set(0, 0, Color::RED);
    s.set(1, 0, Color::new(0.0, 1.0, 0.0, 0.0));
    let c = s.cubic_sample(0.5, 0.0);
    assert!(c.g.abs() < 1e-6, "{c:?}");
    assert!(c.a > 0.0 && c.a < 1.0, "{c:?}");
}

#[test]
fn cubic_sample_of_empty_surface_is_transparent() {
    assert_eq!(Surface::default().cubic_sample(0.0, 0.0), Color::alpha());
}

#[test]
fn readback_is_premultiplied_rgba8() {
    let s = Surface::filled(1, 1, Color::new(1.0, 0.0, 0.0, 0.5)).unwrap();
    assert_eq!(s.to_rgba8_premul()[0].to_array(), [128, 0, 0, 128]);
}
