pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Quantize a unit-interval channel to `0..=255`, clamping out-of-range input.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Catmull-Rom weights for the four taps around a sample at fractional offset `t`.
pub(crate) fn catmull_rom_weights(t: f32) -> [f32; 4] {
    [
        0.5 * t * (t * (-t + 2.0) - 1.0),
        0.5 * (t * (t * (3.0 * t - 5.0)) + 2.0),
        0.5 * t * (t * (-3.0 * t + 4.0) + 1.0),
        0.5 * t * t * (t - 1.0),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
