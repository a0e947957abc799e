use crate::error::RendererError;

/// Renderable surface: per-vertex attributes plus triangle index triples.
///
/// Construct through [`Mesh::new`] or [`Mesh::from_flat`]; both check that the
/// attribute sequences line up and that every index addresses a vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    tex_coords: Vec<[f32; 2]>,
    triangles: Vec<[u16; 3]>,
}

impl Mesh {
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        tex_coords: Vec<[f32; 2]>,
        triangles: Vec<[u16; 3]>,
    ) -> Result<Self, RendererError> {
        if positions.len() != normals.len() || positions.len() != tex_coords.len() {
            return Err(RendererError::MeshDataMismatch {
                positions: positions.len() * 3,
                normals: normals.len() * 3,
                tex_coords: tex_coords.len() * 2,
            });
        }

        let vertex_count = positions.len();
        for (position, &index) in triangles.iter().flatten().enumerate() {
            if usize::from(index) >= vertex_count {
                return Err(RendererError::IndexOutOfBounds {
                    index,
                    position,
                    vertex_count,
                });
            }
        }

        Ok(Self {
            positions,
            normals,
            tex_coords,
            triangles,
        })
    }

    /// Build from the flat arrays an upstream producer hands over:
    /// 3 floats per position, 3 per normal, 2 per texcoord.
    pub fn from_flat(
        vertices: &[f32],
        normals: &[f32],
        indices: &[u16],
        tex_coords: &[f32],
    ) -> Result<Self, RendererError> {
        let ragged = vertices.len() % 3 != 0 || normals.len() % 3 != 0 || tex_coords.len() % 2 != 0;
        if ragged
            || vertices.len() / 3 != normals.len() / 3
            || vertices.len() / 3 != tex_coords.len() / 2
        {
            return Err(RendererError::MeshDataMismatch {
                positions: vertices.len(),
                normals: normals.len(),
                tex_coords: tex_coords.len(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(RendererError::IncompleteTriangle {
                count: indices.len(),
            });
        }

        Self::new(
            bytemuck::cast_slice::<f32, [f32; 3]>(vertices).to_vec(),
            bytemuck::cast_slice::<f32, [f32; 3]>(normals).to_vec(),
            bytemuck::cast_slice::<f32, [f32; 2]>(tex_coords).to_vec(),
            bytemuck::cast_slice::<u16, [u16; 3]>(indices).to_vec(),
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }

    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn flat_normals(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn flat_tex_coords(&self) -> &[f32] {
        bytemuck::cast_slice(&self.tex_coords)
    }

    pub fn flat_indices(&self) -> &[u16] {
        bytemuck::cast_slice(&self.triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec<f32>, Vec<f32>, Vec<u16>, Vec<f32>) {
        (
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        )
    }

    #[test]
    fn from_flat_accepts_consistent_arrays() {
        let (v, n, i, t) = triangle();
        let mesh = Mesh::from_flat(&v, &n, &i, &t).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(mesh.flat_positions(), v.as_slice());
        assert_eq!(mesh.flat_indices(), i.as_slice());
    }

    #[test]
    fn from_flat_rejects_short_normals() {
        let (v, mut n, i, t) = triangle();
        n.truncate(6);
        let err = Mesh::from_flat(&v, &n, &i, &t).unwrap_err();
        assert_eq!(
            err,
            RendererError::MeshDataMismatch {
                positions: 9,
                normals: 6,
                tex_coords: 6
            }
        );
    }

    #[test]
    fn from_flat_rejects_ragged_positions() {
        let (mut v, n, i, t) = triangle();
        v.push(1.0);
        assert!(matches!(
            Mesh::from_flat(&v, &n, &i, &t),
            Err(RendererError::MeshDataMismatch { .. })
        ));
    }

    #[test]
    fn from_flat_rejects_out_of_range_index() {
        let (v, n, _, t) = triangle();
        let err = Mesh::from_flat(&v, &n, &[0, 1, 3], &t).unwrap_err();
        assert_eq!(
            err,
            RendererError::IndexOutOfBounds {
                index: 3,
                position: 2,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn from_flat_rejects_partial_triangle() {
        let (v, n, _, t) = triangle();
        let err = Mesh::from_flat(&v, &n, &[0, 1], &t).unwrap_err();
        assert_eq!(err, RendererError::IncompleteTriangle { count: 2 });
    }

    #[test]
    fn mismatched_attributes_cannot_be_built() {
        let err = Mesh::new(vec![[0.0; 3]], vec![], vec![], vec![[0, 5, 9]]).unwrap_err();
        assert!(matches!(err, RendererError::MeshDataMismatch { .. }));
    }

    #[test]
    fn indices_past_the_vertex_count_cannot_be_built() {
        let err = Mesh::new(
            vec![[0.0; 3]],
            vec![[0.0, 0.0, 1.0]],
            vec![[0.0; 2]],
            vec![[0, 5, 9]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            RendererError::IndexOutOfBounds {
                index: 5,
                position: 1,
                vertex_count: 1
            }
        );
    }

    #[test]
    fn empty_mesh_is_valid() {
        let mesh = Mesh::new(vec![], vec![], vec![], vec![]).unwrap();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
    }
}
