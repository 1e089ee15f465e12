use std::sync::Arc;

use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{TesseraError, TesseraResult};
use crate::primitive::mesh::Mesh;
use crate::surface::buffer::Surface;
use crate::surface::color::Color;

/// Kind of drawable a [`PrimitiveCache`](crate::PrimitiveCache) holds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    /// Raster surface.
    Surface,
    /// Triangulated region filled with a caller-supplied color.
    Polygon,
    /// Triangulated region carrying its own color.
    ColoredPolygon,
    /// Textured triangle mesh.
    Mesh,
}

impl PrimitiveType {
    /// Every primitive type, in declaration order.
    pub const ALL: [PrimitiveType; 4] = [
        PrimitiveType::Surface,
        PrimitiveType::Polygon,
        PrimitiveType::ColoredPolygon,
        PrimitiveType::Mesh,
    ];
}

/// Triangulated polygon: a vertex pool plus index triples.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon {
    /// Vertex pool.
    pub vertices: Vec<Point>,
    /// Triangles as indices into `vertices`.
    pub triangles: Vec<[usize; 3]>,
}

impl Polygon {
    /// Triangulate a convex outline as a fan around its first point.
    pub fn convex(outline: impl IntoIterator<Item = Point>) -> Self {
        let vertices: Vec<Point> = outline.into_iter().collect();
        let triangles = (1..vertices.len().saturating_sub(1))
            .map(|i| [0, i, i + 1])
            .collect();
        Self {
            vertices,
            triangles,
        }
    }

    /// Check every triangle index against the vertex pool.
    pub fn validate(&self) -> TesseraResult<()> {
        let n = self.vertices.len();
        for (ti, tri) in self.triangles.iter().enumerate() {
            if let Some(&bad) = tri.iter().find(|&&v| v >= n) {
                return Err(TesseraError::validation(format!(
                    "polygon triangle {ti} references vertex {bad}, but only {n} vertices exist"
                )));
            }
        }
        Ok(())
    }

    /// Corners of every triangle after `transform`; triangles with bad indices are skipped.
    pub fn transformed_triangles(&self, transform: Affine) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.triangles.iter().filter_map(move |tri| {
            let a = *self.vertices.get(tri[0])?;
            let b = *self.vertices.get(tri[1])?;
            let c = *self.vertices.get(tri[2])?;
            Some([transform * a, transform * b, transform * c])
        })
    }
}

/// Polygon with its own fill color.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColoredPolygon {
    /// Geometry.
    pub polygon: Polygon,
    /// Fill color.
    pub color: Color,
}

/// One backend's payload for a primitive, tagged by [`PrimitiveType`].
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Surface payload.
    Surface(Surface),
    /// Polygon payload.
    Polygon(Polygon),
    /// Colored polygon payload.
    ColoredPolygon(ColoredPolygon),
    /// Mesh payload.
    Mesh(Mesh),
}

/// Shared, reference-counted payload as stored in caches.
pub type Representation = Arc<Primitive>;

macro_rules! accessors {
    ($($variant:ident, $ty:ty, $get:ident, $get_mut:ident;)*) => {
        $(
            #[doc = concat!("Borrow the payload if this is a `", stringify!($variant), "`.")]
            pub fn $get(&self) -> Option<&$ty> {
                match self {
                    Primitive::$variant(v) => Some(v),
                    _ => None,
                }
            }

            #[doc = concat!("Mutably borrow the payload if this is a `", stringify!($variant), "`.")]
            pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                match self {
                    Primitive::$variant(v) => Some(v),
                    _ => None,
                }
            }
        )*
    };
}

impl Primitive {
    /// Empty payload of the given type.
    pub fn empty(primitive_type: PrimitiveType) -> Self {
        match primitive_type {
            PrimitiveType::Surface => Primitive::Surface(Surface::default()),
            PrimitiveType::Polygon => Primitive::Polygon(Polygon::default()),
            PrimitiveType::ColoredPolygon => Primitive::ColoredPolygon(ColoredPolygon::default()),
            PrimitiveType::Mesh => Primitive::Mesh(Mesh::default()),
        }
    }

    /// Type tag of this payload.
    pub fn primitive_type(&self) -> PrimitiveType {
        match self {
            Primitive::Surface(_) => PrimitiveType::Surface,
            Primitive::Polygon(_) => PrimitiveType::Polygon,
            Primitive::ColoredPolygon(_) => PrimitiveType::ColoredPolygon,
            Primitive::Mesh(_) => PrimitiveType::Mesh,
        }
    }

    accessors! {
        Surface, Surface, as_surface, as_surface_mut;
        Polygon, Polygon, as_polygon, as_polygon_mut;
        ColoredPolygon, ColoredPolygon, as_colored_polygon, as_colored_polygon_mut;
        Mesh, Mesh, as_mesh, as_mesh_mut;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/primitive/data.rs"]
mod tests;
