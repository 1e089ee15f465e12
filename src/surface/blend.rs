use crate::surface::color::Color;

const COLOR_EPSILON: f32 = 0.000_001;

/// How a source color is combined with the destination pixel.
///
/// In every formula below `a` is the source, `b` the destination and `amount` the pen
/// alpha (blend amount).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMethod {
    /// Source composited over destination, honoring source alpha.
    #[default]
    Composite,
    /// Linear interpolation from destination to source, alpha included.
    Straight,
    /// Like `Composite`, but the destination alpha is kept.
    Onto,
    /// `Straight` restricted to the destination's coverage.
    StraightOnto,
    /// Destination composited over source.
    Behind,
    /// Screen, destination alpha kept.
    Screen,
    /// `a * b`.
    Multiply,
    /// `b / a`.
    Divide,
    /// `a + b`.
    Add,
    /// `b - a`.
    Subtract,
    /// `|b - a|`.
    Difference,
    /// Per-channel maximum.
    Brighten,
    /// Per-channel minimum.
    Darken,
    /// Source wins where it is less opaque than the destination.
    AlphaBrighten,
    /// Source wins where it is more opaque than the destination.
    AlphaDarken,
}

impl BlendMethod {
    /// Every supported method.
    pub const ALL: [BlendMethod; 15] = [
        BlendMethod::Composite,
        BlendMethod::Straight,
        BlendMethod::Onto,
        BlendMethod::StraightOnto,
        BlendMethod::Behind,
        BlendMethod::Screen,
        BlendMethod::Multiply,
        BlendMethod::Divide,
        BlendMethod::Add,
        BlendMethod::Subtract,
        BlendMethod::Difference,
        BlendMethod::Brighten,
        BlendMethod::Darken,
        BlendMethod::AlphaBrighten,
        BlendMethod::AlphaDarken,
    ];

    /// Return `true` when the method never changes destination coverage.
    pub fn is_onto(self) -> bool {
        matches!(
            self,
            BlendMethod::Onto
                | BlendMethod::StraightOnto
                | BlendMethod::Screen
                | BlendMethod::Multiply
                | BlendMethod::Divide
                | BlendMethod::Add
                | BlendMethod::Subtract
                | BlendMethod::Difference
                | BlendMethod::Brighten
                | BlendMethod::Darken
        )
    }
}

impl Color {
    /// Blend `src` onto `dst` with `amount` using `method`.
    pub fn blend(src: Color, dst: Color, amount: f32, method: BlendMethod) -> Color {
        match method {
            BlendMethod::Composite => composite(src, dst, amount),
            BlendMethod::Straight => straight(src, dst, amount),
            BlendMethod::Onto => onto(src, dst, amount),
            BlendMethod::StraightOnto => straight(src.with_alpha(src.a * dst.a), dst, amount),
            BlendMethod::Behind => behind(src, dst, amount),
            BlendMethod::Screen => screen(src, dst, amount),
            BlendMethod::Multiply => multiply(src, dst, amount),
            BlendMethod::Divide => divide(src, dst, amount),
            BlendMethod::Add => {
                let k = src.a * amount;
                dst.zip_rgb(src, |b, a| b + a * k)
            }
            BlendMethod::Subtract => {
                let k = src.a * amount;
                dst.zip_rgb(src, |b, a| b - a * k)
            }
            BlendMethod::Difference => {
                let k = src.a * amount;
                dst.zip_rgb(src, |b, a| (b - a * k).abs())
            }
            BlendMethod::Brighten => {
                let k = src.a * amount;
                dst.zip_rgb(src, |b, a| b.max(a * k))
            }
            BlendMethod::Darken => {
                let k = src.a * amount;
                dst.zip_rgb(src, |b, a| b.min((a - 1.0) * k + 1.0))
            }
            BlendMethod::AlphaBrighten => {
                if src.a < dst.a * amount {
                    src.with_alpha(src.a * amount)
                } else {
                    dst
                }
            }
            BlendMethod::AlphaDarken => {
                if src.a * amount > dst.a {
                    src.with_alpha(src.a * amount)
                } else {
                    dst
                }
            }
        }
    }
}

fn composite(src: Color, dst: Color, amount: f32) -> Color {
    let a_src = src.a * amount;
    let a_dst = dst.a;

    let s = src.with_alpha(1.0).map_rgb(|c| c * a_src);
    let d = dst.with_alpha(1.0).map_rgb(|c| c * a_dst);
    let out = s.zip_rgb(d, |s, d| s + d * (1.0 - a_src));
    let a_out = a_src + a_dst * (1.0 - a_src);

    if a_out.abs() > COLOR_EPSILON {
        out.map_rgb(|c| c / a_out).with_alpha(a_out)
    } else {
        Color::alpha()
    }
}

fn straight(src: Color, dst: Color, amount: f32) -> Color {
    let a_out = (src.a - dst.a) * amount + dst.a;
    if a_out.abs() <= COLOR_EPSILON {
        return Color::alpha();
    }
    let (sa, da) = (src.a, dst.a);
    src.zip_rgb(dst, |s, d| ((s * sa - d * da) * amount + d * da) / a_out)
        .with_alpha(a_out)
}

fn onto(src: Color, dst: Color, amount: f32) -> Color {
    composite(src, dst.with_alpha(1.0), amount).with_alpha(dst.a)
}

fn behind(src: Color, dst: Color, amount: f32) -> Color {
    let under = if src.a == 0.0 {
        src.with_alpha(COLOR_EPSILON * amount)
    } else {
        src.with_alpha(src.a * amount)
    };
    composite(dst, under, 1.0)
}

fn screen(src: Color, dst: Color, amount: f32) -> Color {
    let (src, amount) = if amount < 0.0 {
        (src.inverted(), -amount)
    } else {
        (src, amount)
    };
    let screened = src.zip_rgb(dst, |a, b| 1.0 - (1.0 - a) * (1.0 - b));
    onto(screened, dst, amount)
}

fn multiply(src: Color, dst: Color, amount: f32) -> Color {
    let (src, amount) = if amount < 0.0 {
        (src.inverted(), -amount)
    } else {
        (src, amount)
    };
    let k = amount * src.a;
    dst.zip_rgb(src, |b, a| (b * a - b) * k + b)
}

fn divide(src: Color, dst: Color, amount: f32) -> Color {
    let k = amount * src.a;
    dst.zip_rgb(src, |b, a| (b / (a + COLOR_EPSILON) - b) * k + b)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/blend.rs"]
mod tests;
