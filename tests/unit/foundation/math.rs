use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 128), 64);
    assert_eq!(mul_div255_u16(255, 1), 1);
}

#[test]
fn unit_to_u8_clamps_and_handles_nan() {
    assert_eq!(unit_to_u8(0.0), 0);
    assert_eq!(unit_to_u8(1.0), 255);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(-3.0), 0);
    assert_eq!(unit_to_u8(7.0), 255);
    assert_eq!(unit_to_u8(f32::NAN), 0);
}

#[test]
fn catmull_rom_weights_sum_to_one() {
    for t in [0.0_f32, 0.25, 0.5, 0.75, 0.999] {
        let sum: f32 = catmull_rom_weights(t).iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "t={t} sum={sum}");
    }
}

#[test]
fn catmull_rom_at_zero_picks_center_tap() {
    assert_eq!(catmull_rom_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
}
