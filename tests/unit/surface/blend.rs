use super::*;

const EPS: f32 = 1e-6;

fn assert_color(got: Color, want: Color) {
    assert!(got.approx_eq(want, EPS), "got {got:?}, want {want:?}");
}

#[test]
fn composite_opaque_source_replaces_destination() {
    let out = Color::blend(Color::RED, Color::BLUE, 1.0, BlendMethod::Composite);
    assert_color(out, Color::RED);
}

#[test]
fn composite_half_amount_mixes_over_opaque() {
    let out = Color::blend(Color::RED, Color::BLUE, 0.5, BlendMethod::Composite);
    assert_color(out, Color::new(0.5, 0.0, 0.5, 1.0));
}

#[test]
fn composite_of_two_transparent_colors_is_transparent() {
    let out = Color::blend(Color::alpha(), Color::alpha(), 1.0, BlendMethod::Composite);
    assert_eq!(out, Color::alpha());
}

#[test]
fn zero_amount_leaves_opaque_destination_alone() {
    let src = Color::new(0.8, 0.1, 0.4, 0.7);
    let dst = Color::new(0.3, 0.6, 0.9, 1.0);
    for method in BlendMethod::ALL {
        let out = Color::blend(src, dst, 0.0, method);
        assert!(out.approx_eq(dst, EPS), "{method:?}: {out:?}");
    }
}

#[test]
fn straight_interpolates_alpha_too() {
    let out = Color::blend(Color::RED, Color::alpha(), 0.5, BlendMethod::Straight);
    assert_color(out, Color::new(1.0, 0.0, 0.0, 0.5));
}

#[test]
fn onto_keeps_destination_alpha() {
    let dst = Color::BLUE.with_alpha(0.0);
    let out = Color::blend(Color::RED, dst, 1.0, BlendMethod::Onto);
    assert_color(out, Color::new(1.0, 0.0, 0.0, 0.0));
    assert!(BlendMethod::Onto.is_onto());
    assert!(!BlendMethod::Composite.is_onto());
}

#[test]
fn behind_puts_source_under_destination() {
    let dst = Color::BLUE.with_alpha(0.5);
    let out = Color::blend(Color::RED, dst, 1.0, BlendMethod::Behind);
    assert_color(out, Color::new(0.5, 0.0, 0.5, 1.0));
}

#[test]
fn multiply_and_add_work_per_channel() {
    let dst = Color::new(0.5, 0.5, 0.5, 1.0);
    let src = Color::new(0.5, 1.0, 0.0, 1.0);
    assert_color(
        Color::blend(src, dst, 1.0, BlendMethod::Multiply),
        Color::new(0.25, 0.5, 0.0, 1.0),
    );
    assert_color(
        Color::blend(src, dst, 1.0, BlendMethod::Add),
        Color::new(1.0, 1.5, 0.5, 1.0),
    );
    assert_color(
        Color::blend(src, dst, 1.0, BlendMethod::Difference),
        Color::new(0.0, 0.5, 0.5, 1.0),
    );
}

#[test]
fn alpha_darken_prefers_more_opaque_source() {
    let dst = Color::BLUE.with_alpha(0.25);
    let out = Color::blend(Color::RED, dst, 0.5, BlendMethod::AlphaDarken);
    assert_color(out, Color::new(1.0, 0.0, 0.0, 0.5));
    let out = Color::blend(Color::RED, dst, 0.1, BlendMethod::AlphaDarken);
    assert_color(out, dst);
}

#[test]
fn serde_uses_snake_case_names() {
    let json = serde_json::to_string(&BlendMethod::StraightOnto).unwrap();
    assert_eq!(json, "\"straight_onto\"");
    let back: BlendMethod = serde_json::from_str("\"alpha_brighten\"").unwrap();
    assert_eq!(back, BlendMethod::AlphaBrighten);
    assert_eq!(BlendMethod::default(), BlendMethod::Composite);
}
