use super::*;

#[test]
fn put_value_blends_with_pen_alpha() {
    let mut s = Surface::filled(2, 1, Color::BLUE).unwrap();
    let mut pen = s.pen(0, 0);
    pen.set_alpha(0.5);
    pen.put_value(Color::RED);
    assert!(
        s.get(0, 0)
            .unwrap()
            .approx_eq(Color::new(0.5, 0.0, 0.5, 1.0), 1e-6)
    );
    assert_eq!(s.get(1, 0), Some(Color::BLUE));
}

#[test]
fn inc_x_walks_the_row_and_drops_writes_past_the_edge() {
    let mut s = Surface::new(2, 1).unwrap();
    let mut pen = s.pen(0, 0);
    for _ in 0..4 {
        pen.put_value(Color::GREEN);
        pen.inc_x();
    }
    assert_eq!(pen.position(), (4, 0));
    assert_eq!(s.pixels(), &[Color::GREEN, Color::GREEN]);
}

#[test]
fn blend_method_applies_to_writes() {
    let mut s = Surface::filled(1, 1, Color::new(0.5, 0.5, 0.5, 1.0)).unwrap();
    let mut pen = s.pen(-1, -1);
    pen.move_to(0, 0);
    pen.set_blend_method(BlendMethod::Multiply);
    assert_eq!(pen.blend_method(), BlendMethod::Multiply);
    assert_eq!(pen.alpha(), 1.0);
    pen.put_value(Color::new(0.5, 0.0, 1.0, 1.0));
    assert!(
        s.get(0, 0)
            .unwrap()
            .approx_eq(Color::new(0.25, 0.0, 0.5, 1.0), 1e-6)
    );
}
