use crate::surface::blend::BlendMethod;
use crate::surface::buffer::Surface;
use crate::surface::color::Color;

/// Positioned pixel writer that blends every value into the surface.
///
/// Each [`put_value`](AlphaPen::put_value) combines the written color with the pixel
/// under the pen using the pen's blend method, with the pen alpha as the blend amount.
/// Writes while the pen is outside the surface are dropped.
pub struct AlphaPen<'a> {
    surface: &'a mut Surface,
    x: i32,
    y: i32,
    alpha: f32,
    blend_method: BlendMethod,
}

impl<'a> AlphaPen<'a> {
    pub(crate) fn new(surface: &'a mut Surface, x: i32, y: i32) -> Self {
        Self {
            surface,
            x,
            y,
            alpha: 1.0,
            blend_method: BlendMethod::default(),
        }
    }

    /// Move to an absolute pixel position.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Step one pixel to the right.
    pub fn inc_x(&mut self) {
        self.x = self.x.saturating_add(1);
    }

    /// Current position.
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Blend amount applied to subsequent writes.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    /// Current blend amount.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Blend method applied to subsequent writes.
    pub fn set_blend_method(&mut self, method: BlendMethod) {
        self.blend_method = method;
    }

    /// Current blend method.
    pub fn blend_method(&self) -> BlendMethod {
        self.blend_method
    }

    /// Blend `color` into the pixel under the pen.
    pub fn put_value(&mut self, color: Color) {
        if let Some(dst) = self.surface.get(self.x, self.y) {
            let out = Color::blend(color, dst, self.alpha, self.blend_method);
            self.surface.set(self.x, self.y, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/pen.rs"]
mod tests;
