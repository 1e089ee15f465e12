use crate::foundation::core::BackendId;
use crate::foundation::error::{RenderResult, TesseraError, TesseraResult};
use crate::primitive::cache::PrimitiveCache;
use crate::primitive::catalog::BackendCatalog;
use crate::primitive::data::{Primitive, PrimitiveType, Representation};
use crate::render::backend::{RenderBackend, RenderParams};
use crate::render::triangle;
use crate::surface::buffer::Surface;

/// Software backend options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SoftwareBackendOpts {
    /// Skip mesh and polygon triangles lying entirely beyond one edge of the output.
    ///
    /// Only saves work; the rendered pixels are identical either way.
    pub cull_offscreen_triangles: bool,
}

impl SoftwareBackendOpts {
    /// Defaults, overridden by `TESSERA_CULL_OFFSCREEN_TRIANGLES` (`1` or `true`).
    pub fn from_env() -> Self {
        let cull_offscreen_triangles = std::env::var("TESSERA_CULL_OFFSCREEN_TRIANGLES")
            .ok()
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);
        Self {
            cull_offscreen_triangles,
        }
    }
}

/// CPU backend drawing into [`Surface`] primitives.
///
/// Understands all four primitive types natively. Every typed operation edits the
/// output cache's software representation, so the output must be a
/// [`PrimitiveType::Surface`] cache.
#[derive(Debug)]
pub struct SoftwareBackend {
    id: BackendId,
    opts: SoftwareBackendOpts,
}

impl SoftwareBackend {
    /// Register with `catalog` along with create and copy functions for every primitive
    /// type.
    pub fn install(catalog: &mut BackendCatalog, opts: SoftwareBackendOpts) -> Self {
        let mut id = BackendId::UNREGISTERED;
        catalog.register_backend(&mut id);
        for ty in PrimitiveType::ALL {
            catalog.register_create(ty, id, move || Primitive::empty(ty));
            catalog.register_copy(ty, id, |p: &Primitive| Some(p.clone()));
        }
        tracing::debug!(backend = id.0, ?opts, "installed software backend");
        Self { id, opts }
    }

    /// Remove this backend and its functions from `catalog`; the id resets to 0.
    pub fn uninstall(&mut self, catalog: &mut BackendCatalog) {
        catalog.unregister_backend(&mut self.id);
    }

    /// Options chosen at install time.
    pub fn opts(&self) -> SoftwareBackendOpts {
        self.opts
    }

    fn fetch(
        &self,
        catalog: &BackendCatalog,
        cache: &PrimitiveCache,
    ) -> TesseraResult<Representation> {
        if cache.is_editing() {
            return Err(TesseraError::fail(format!(
                "{:?} input is being edited",
                cache.primitive_type()
            )));
        }
        if cache.is_empty() {
            return Err(TesseraError::fail(format!(
                "{:?} input is empty",
                cache.primitive_type()
            )));
        }
        cache
            .get_primitive(catalog, self.id)
            .ok_or_else(|| TesseraError::not_supported(self.id, cache.primitive_type()))
    }

    fn fetch_surface(
        &self,
        catalog: &BackendCatalog,
        cache: &PrimitiveCache,
        role: &str,
    ) -> TesseraResult<Representation> {
        if cache.primitive_type() != PrimitiveType::Surface {
            return Err(TesseraError::fail(format!(
                "{role} must be a surface, got {:?}",
                cache.primitive_type()
            )));
        }
        let rep = self.fetch(catalog, cache)?;
        match rep.as_surface() {
            Some(s) if s.is_valid() => Ok(rep),
            Some(_) => Err(TesseraError::fail(format!("{role} surface is zero-sized"))),
            None => Err(TesseraError::fail(format!("{role} payload is not a surface"))),
        }
    }

    /// Size of the output surface, checked without opening an edit.
    fn output_size(
        &self,
        catalog: &BackendCatalog,
        out: &PrimitiveCache,
    ) -> TesseraResult<(u32, u32)> {
        if out.primitive_type() != PrimitiveType::Surface {
            return Err(TesseraError::fail(format!(
                "output must be a surface, got {:?}",
                out.primitive_type()
            )));
        }
        if out.is_editing() {
            return Err(TesseraError::fail("output is being edited"));
        }
        if out.is_empty() {
            return Err(TesseraError::fail("output is empty"));
        }
        // Converts into a clone so `out` keeps its entries if a later check fails.
        let peek = out.clone();
        let rep = peek
            .get_primitive(catalog, self.id)
            .ok_or_else(|| TesseraError::fail("output cannot be opened by this backend"))?;
        let size = match rep.as_surface() {
            Some(s) if s.is_valid() => (s.width(), s.height()),
            Some(_) => return Err(TesseraError::fail("output surface is zero-sized")),
            None => return Err(TesseraError::fail("output payload is not a surface")),
        };
        Ok(size)
    }

    /// Open the output surface for drawing, seeded from `params.back` when given.
    ///
    /// Every check runs before the edit starts, so a failed call leaves the output cache
    /// as it was.
    fn with_target(
        &self,
        catalog: &BackendCatalog,
        params: &mut RenderParams<'_>,
        draw: impl FnOnce(&mut Surface) -> RenderResult,
    ) -> RenderResult {
        let (width, height) = self.output_size(catalog, params.out)?;
        let back = match params.back {
            Some(back) => Some(self.fetch_surface(catalog, back, "back")?),
            None => None,
        };
        let back_surface = back.as_deref().and_then(Primitive::as_surface);
        if let Some(b) = back_surface
            && (b.width(), b.height()) != (width, height)
        {
            return Err(TesseraError::fail(format!(
                "back surface is {}x{}, output is {width}x{height}",
                b.width(),
                b.height()
            )));
        }

        let mut edit = params
            .out
            .edit(catalog, self.id)
            .ok_or_else(|| TesseraError::fail("output cannot be opened for editing"))?;
        let target = edit
            .as_surface_mut()
            .ok_or_else(|| TesseraError::fail("output payload is not a surface"))?;
        if let Some(b) = back_surface {
            target
                .copy_from(b)
                .map_err(|e| TesseraError::fail(e.to_string()))?;
        }
        draw(target)
    }
}

impl RenderBackend for SoftwareBackend {
    fn id(&self) -> BackendId {
        self.id
    }

    fn is_primitive_supported(&self, _primitive_type: PrimitiveType) -> bool {
        true
    }

    #[tracing::instrument(skip_all, fields(backend = self.id.0, amount = params.amount))]
    fn render_surface(
        &mut self,
        catalog: &BackendCatalog,
        params: &mut RenderParams<'_>,
        surface: &PrimitiveCache,
    ) -> RenderResult {
        let rep = self.fetch_surface(catalog, surface, "source")?;
        let Some(src) = rep.as_surface() else {
            return Err(TesseraError::fail("source payload is not a surface"));
        };
        let (amount, method) = (params.amount, params.blend_method);

        self.with_target(catalog, params, |target| {
            let w = target.width().min(src.width()) as i32;
            let h = target.height().min(src.height()) as i32;
            for y in 0..h {
                let mut pen = target.pen(0, y);
                pen.set_alpha(amount);
                pen.set_blend_method(method);
                for x in 0..w {
                    if let Some(c) = src.get(x, y) {
                        pen.put_value(c);
                    }
                    pen.inc_x();
                }
            }
            Ok(())
        })
    }

    #[tracing::instrument(skip_all, fields(backend = self.id.0, amount = params.amount))]
    fn render_polygon(
        &mut self,
        catalog: &BackendCatalog,
        params: &mut RenderParams<'_>,
        polygon: &PrimitiveCache,
    ) -> RenderResult {
        let rep = self.fetch(catalog, polygon)?;
        let Some(poly) = rep.as_polygon() else {
            return Err(TesseraError::fail("payload is not a polygon"));
        };
        poly.validate()
            .map_err(|e| TesseraError::fail(e.to_string()))?;

        let (amount, method) = (params.amount, params.blend_method);
        let (transform, color) = (params.transform, params.color);
        let cull = self.opts.cull_offscreen_triangles;
        self.with_target(catalog, params, |target| {
            let drawn =
                triangle::fill_polygon(target, poly, transform, color, amount, method, cull);
            tracing::trace!(drawn, "filled polygon");
            Ok(())
        })
    }

    #[tracing::instrument(skip_all, fields(backend = self.id.0, amount = params.amount))]
    fn render_colored_polygon(
        &mut self,
        catalog: &BackendCatalog,
        params: &mut RenderParams<'_>,
        polygon: &PrimitiveCache,
    ) -> RenderResult {
        let rep = self.fetch(catalog, polygon)?;
        let Some(colored) = rep.as_colored_polygon() else {
            return Err(TesseraError::fail("payload is not a colored polygon"));
        };
        colored
            .polygon
            .validate()
            .map_err(|e| TesseraError::fail(e.to_string()))?;

        let (amount, method, transform) = (params.amount, params.blend_method, params.transform);
        let cull = self.opts.cull_offscreen_triangles;
        self.with_target(catalog, params, |target| {
            let drawn = triangle::fill_polygon(
                target,
                &colored.polygon,
                transform,
                colored.color,
                amount,
                method,
                cull,
            );
            tracing::trace!(drawn, "filled colored polygon");
            Ok(())
        })
    }

    #[tracing::instrument(skip_all, fields(backend = self.id.0, amount = params.amount))]
    fn render_mesh(
        &mut self,
        catalog: &BackendCatalog,
        params: &mut RenderParams<'_>,
        mesh: &PrimitiveCache,
    ) -> RenderResult {
        let rep = self.fetch(catalog, mesh)?;
        let Some(mesh) = rep.as_mesh() else {
            return Err(TesseraError::fail("payload is not a mesh"));
        };
        mesh.validate()
            .map_err(|e| TesseraError::fail(e.to_string()))?;

        let texture_cache = params
            .texture
            .ok_or_else(|| TesseraError::fail("mesh rendering needs a texture"))?;
        let texture_rep = self.fetch_surface(catalog, texture_cache, "texture")?;
        let Some(texture) = texture_rep.as_surface() else {
            return Err(TesseraError::fail("texture payload is not a surface"));
        };

        let (amount, method) = (params.amount, params.blend_method);
        let (transform, texture_transform) = (params.transform, params.texture_transform);
        let cull = self.opts.cull_offscreen_triangles;
        self.with_target(catalog, params, |target| {
            let drawn = triangle::render_mesh(
                target,
                mesh,
                transform,
                texture,
                texture_transform,
                amount,
                method,
                cull,
            );
            tracing::trace!(drawn, "rendered mesh");
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/software.rs"]
mod tests;
