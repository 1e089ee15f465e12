//! Tessera keeps one drawable primitive in several backend-specific representations and
//! rasterizes textured triangle meshes in software.
//!
//! # Architecture
//!
//! 1. **Catalog**: backends register with a [`BackendCatalog`] and contribute functions that
//!    create, copy and convert their representation of each [`PrimitiveType`]. The catalog
//!    keeps the shortest convert chain between every pair of backends.
//! 2. **Cache**: a [`PrimitiveCache`] holds one [`Representation`] per backend. Reads convert
//!    lazily along the catalog's chains; edits go through `begin_edit`/`end_edit`, which
//!    copy-on-write the target representation and drop every other one.
//! 3. **Render**: a [`RenderBackend`] draws a primitive cache into an output cache. The
//!    bundled [`SoftwareBackend`] fills triangles scanline by scanline in fixed point, with
//!    bicubic texture sampling for meshes.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No global state**: every registry is an explicit value.
//! - **No panics on bad input**: failures come back as `None` or [`TesseraError`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod primitive;
mod render;
mod surface;

pub use foundation::core::{Affine, BackendId, Point, Rgba8Premul, Vec2};
pub use foundation::error::{RenderResult, TesseraError, TesseraResult};
pub use foundation::redirect::{RedirectGroup, SlotKey};
pub use primitive::cache::{PrimitiveCache, PrimitiveEdit};
pub use primitive::catalog::{
    BackendCatalog, ConvertChain, ConvertFn, ConvertStep, CopyFn, CreateFn, share_representation,
};
pub use primitive::data::{ColoredPolygon, Polygon, Primitive, PrimitiveType, Representation};
pub use primitive::mesh::{Mesh, MeshTriangle, MeshVertex};
pub use render::backend::{RenderBackend, RenderParams};
pub use render::software::{SoftwareBackend, SoftwareBackendOpts};
pub use render::triangle::{fill_polygon, fill_textured_triangle, fill_triangle, render_mesh};
pub use surface::blend::BlendMethod;
pub use surface::buffer::Surface;
pub use surface::color::Color;
pub use surface::pen::AlphaPen;
