use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{TesseraError, TesseraResult};

/// One mesh vertex: where it lands and where it samples the texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshVertex {
    /// Position in primitive space.
    pub position: Point,
    /// Texture coordinate in texture space.
    pub tex_coords: Point,
}

impl MeshVertex {
    /// Build a vertex.
    pub fn new(position: Point, tex_coords: Point) -> Self {
        Self {
            position,
            tex_coords,
        }
    }
}

/// Three indices into [`Mesh::vertices`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MeshTriangle {
    /// Vertex indices.
    pub vertices: [usize; 3],
}

/// Indexed textured triangle list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    /// Vertex pool.
    pub vertices: Vec<MeshVertex>,
    /// Triangles referencing the pool.
    pub triangles: Vec<MeshTriangle>,
}

impl Mesh {
    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, position: Point, tex_coords: Point) -> usize {
        self.vertices.push(MeshVertex::new(position, tex_coords));
        self.vertices.len() - 1
    }

    /// Append a triangle over existing vertex indices.
    pub fn push_triangle(&mut self, a: usize, b: usize, c: usize) {
        self.triangles.push(MeshTriangle {
            vertices: [a, b, c],
        });
    }

    /// Check every triangle index against the vertex pool.
    pub fn validate(&self) -> TesseraResult<()> {
        let n = self.vertices.len();
        for (ti, tri) in self.triangles.iter().enumerate() {
            if let Some(&bad) = tri.vertices.iter().find(|&&v| v >= n) {
                return Err(TesseraError::validation(format!(
                    "mesh triangle {ti} references vertex {bad}, but only {n} vertices exist"
                )));
            }
        }
        Ok(())
    }

    /// Positions and texture coordinates of triangle `index`, each run through its matrix.
    ///
    /// `None` when the triangle or one of its vertices does not exist.
    pub fn transformed_triangle(
        &self,
        index: usize,
        transform: Affine,
        texture_transform: Affine,
    ) -> Option<([Point; 3], [Point; 3])> {
        let tri = self.triangles.get(index)?;
        let mut positions = [Point::ORIGIN; 3];
        let mut tex_coords = [Point::ORIGIN; 3];
        for (k, &vi) in tri.vertices.iter().enumerate() {
            let v = self.vertices.get(vi)?;
            positions[k] = transform * v.position;
            tex_coords[k] = texture_transform * v.tex_coords;
        }
        Some((positions, tex_coords))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/primitive/mesh.rs"]
mod tests;
