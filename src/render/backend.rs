use crate::foundation::core::{Affine, BackendId};
use crate::foundation::error::{RenderResult, TesseraError};
use crate::primitive::cache::PrimitiveCache;
use crate::primitive::catalog::BackendCatalog;
use crate::primitive::data::PrimitiveType;
use crate::surface::blend::BlendMethod;
use crate::surface::color::Color;

/// Everything a typed render operation needs besides the primitive itself.
///
/// `out` is written exclusively; `back` and `texture` are only read.
pub struct RenderParams<'a> {
    /// Output cache; the backend edits its own representation of it.
    pub out: &'a mut PrimitiveCache,
    /// Optional backdrop copied into the output before drawing.
    pub back: Option<&'a PrimitiveCache>,
    /// Optional texture source for meshes.
    pub texture: Option<&'a PrimitiveCache>,
    /// Blend amount in `0.0..=1.0`.
    pub amount: f32,
    /// How drawn pixels combine with the output.
    pub blend_method: BlendMethod,
    /// Fill color for primitives that carry none.
    pub color: Color,
    /// Primitive space to output pixel space.
    pub transform: Affine,
    /// Applied to mesh texture coordinates before sampling.
    pub texture_transform: Affine,
}

impl<'a> RenderParams<'a> {
    /// Opaque white, composite blending, identity transforms, no back or texture.
    pub fn new(out: &'a mut PrimitiveCache) -> Self {
        Self {
            out,
            back: None,
            texture: None,
            amount: 1.0,
            blend_method: BlendMethod::Composite,
            color: Color::WHITE,
            transform: Affine::IDENTITY,
            texture_transform: Affine::IDENTITY,
        }
    }

    /// Set the backdrop.
    pub fn with_back(mut self, back: &'a PrimitiveCache) -> Self {
        self.back = Some(back);
        self
    }

    /// Set the texture source.
    pub fn with_texture(mut self, texture: &'a PrimitiveCache) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Set the blend amount.
    pub fn with_amount(mut self, amount: f32) -> Self {
        self.amount = amount;
        self
    }

    /// Set the blend method.
    pub fn with_blend_method(mut self, blend_method: BlendMethod) -> Self {
        self.blend_method = blend_method;
        self
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the primitive transform.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Set the texture transform.
    pub fn with_texture_transform(mut self, texture_transform: Affine) -> Self {
        self.texture_transform = texture_transform;
        self
    }
}

/// A renderer that draws primitives from a [`PrimitiveCache`] into an output cache.
///
/// Implementors override the typed operations they support. Every operation they leave
/// alone reports [`TesseraError::NotSupported`], which lets callers fall back to another
/// backend or convert the primitive first.
pub trait RenderBackend {
    /// Catalog id of this backend; [`BackendId::UNREGISTERED`] before registration.
    fn id(&self) -> BackendId;

    /// Return `true` if [`render`](RenderBackend::render) may succeed for `primitive_type`.
    fn is_primitive_supported(&self, primitive_type: PrimitiveType) -> bool {
        let _ = primitive_type;
        false
    }

    /// Dispatch on the primitive type carried by `primitive`.
    fn render(
        &mut self,
        catalog: &BackendCatalog,
        params: &mut RenderParams<'_>,
        primitive: &PrimitiveCache,
    ) -> RenderResult {
        match primitive.primitive_type() {
            PrimitiveType::Surface => self.render_surface(catalog, params, primitive),
            PrimitiveType::Polygon => self.render_polygon(catalog, params, primitive),
            PrimitiveType::ColoredPolygon => {
                self.render_colored_polygon(catalog, params, primitive)
            }
            PrimitiveType::Mesh => self.render_mesh(catalog, params, primitive),
        }
    }

    /// Composite a surface primitive.
    fn render_surface(
        &mut self,
        catalog: &BackendCatalog,
        params: &mut RenderParams<'_>,
        surface: &PrimitiveCache,
    ) -> RenderResult {
        let _ = (catalog, params, surface);
        Err(TesseraError::not_supported(self.id(), PrimitiveType::Surface))
    }

    /// Fill a polygon primitive with `params.color`.
    fn render_polygon(
        &mut self,
        catalog: &BackendCatalog,
        params: &mut RenderParams<'_>,
        polygon: &PrimitiveCache,
    ) -> RenderResult {
        let _ = (catalog, params, polygon);
        Err(TesseraError::not_supported(self.id(), PrimitiveType::Polygon))
    }

    /// Fill a colored polygon primitive with its own color.
    fn render_colored_polygon(
        &mut self,
        catalog: &BackendCatalog,
        params: &mut RenderParams<'_>,
        polygon: &PrimitiveCache,
    ) -> RenderResult {
        let _ = (catalog, params, polygon);
        Err(TesseraError::not_supported(
            self.id(),
            PrimitiveType::ColoredPolygon,
        ))
    }

    /// Draw a textured mesh primitive, sampling `params.texture`.
    fn render_mesh(
        &mut self,
        catalog: &BackendCatalog,
        params: &mut RenderParams<'_>,
        mesh: &PrimitiveCache,
    ) -> RenderResult {
        let _ = (catalog, params, mesh);
        Err(TesseraError::not_supported(self.id(), PrimitiveType::Mesh))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
