use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{TesseraError, TesseraResult};
use crate::foundation::math::{catmull_rom_weights, unit_to_u8};
use crate::surface::color::Color;
use crate::surface::pen::AlphaPen;

/// Row-major buffer of straight-alpha [`Color`] pixels.
///
/// A 0×0 surface is representable (it is what a freshly created surface primitive
/// holds) but is not [valid](Surface::is_valid) as a render target or texture.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> TesseraResult<Self> {
        Self::filled(width, height, Color::alpha())
    }

    /// Allocate a surface with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> TesseraResult<Self> {
        // Pixel coordinates travel through the rasterizer as `i32`.
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(TesseraError::validation("surface dimensions exceed i32"));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| TesseraError::validation("surface size overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![color; len],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Return `true` when the surface has at least one pixel.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.data
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Overwrite the pixel at `(x, y)`. Returns `false` outside the surface.
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.data[i] = color;
                true
            }
            None => false,
        }
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        self.data.fill(color);
    }

    /// Replace this surface's pixels with `other`'s. Sizes must match.
    pub fn copy_from(&mut self, other: &Surface) -> TesseraResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(TesseraError::validation(format!(
                "surface size mismatch: {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Alpha-compositing pen positioned at `(x, y)`.
    pub fn pen(&mut self, x: i32, y: i32) -> AlphaPen<'_> {
        AlphaPen::new(self, x, y)
    }

    /// Premultiplied pixel with coordinates clamped to the surface edge.
    fn read_clamped(&self, x: i64, y: i64) -> Color {
        let cx = x.clamp(0, i64::from(self.width) - 1) as usize;
        let cy = y.clamp(0, i64::from(self.height) - 1) as usize;
        self.data[cy * (self.width as usize) + cx].premultiplied()
    }

    /// Catmull-Rom bicubic sample at a fractional pixel coordinate.
    ///
    /// Taps outside the surface repeat the nearest edge pixel. Interpolation runs on
    /// premultiplied values so transparent neighbours do not bleed their color.
    pub fn cubic_sample(&self, x: f64, y: f64) -> Color {
        if !self.is_valid() {
            return Color::alpha();
        }

        let xf = x.floor();
        let yf = y.floor();
        let (xi, yi) = (xf as i64, yf as i64);
        let wx = catmull_rom_weights((x - xf) as f32);
        let wy = catmull_rom_weights((y - yf) as f32);

        let mut acc = Color::alpha();
        for (j, wyj) in wy.iter().enumerate() {
            let mut row = Color::alpha();
            for (i, wxi) in wx.iter().enumerate() {
                row = row + self.read_clamped(xi - 1 + i as i64, yi - 1 + j as i64) * *wxi;
            }
            acc = acc + row * *wyj;
        }
        acc.demultiplied()
    }

    /// Quantize into premultiplied RGBA8, row-major.
    pub fn to_rgba8_premul(&self) -> Vec<Rgba8Premul> {
        self.data
            .iter()
            .map(|c| {
                Rgba8Premul::from_straight_rgba(
                    unit_to_u8(c.r),
                    unit_to_u8(c.g),
                    unit_to_u8(c.b),
                    unit_to_u8(c.a),
                )
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/buffer.rs"]
mod tests;
