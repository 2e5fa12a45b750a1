//! Validated triangle-mesh arrays.

use crate::error::CoreError;

/// Immutable CPU-side triangle mesh.
///
/// Holds one array per vertex attribute (positions, normals, texture
/// coordinates) plus a `u32` index array describing triangles. All arrays are
/// validated on construction:
///
/// - at least one vertex and one face
/// - every attribute array has the same vertex count
/// - the index count is a multiple of 3
/// - every index is in `[0, vertex_count)`
///
/// # Example
///
/// ```ignore
/// let mesh = MeshData::new(positions, normals, texcoords, indices)?;
/// assert_eq!(mesh.index_count(), mesh.face_count() * 3);
/// ```
#[derive(Clone)]
pub struct MeshData {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    indices: Vec<u32>,
    label: Option<String>,
}

impl MeshData {
    /// Create a mesh from attribute and index arrays, validating consistency.
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        texcoords: Vec<[f32; 2]>,
        indices: Vec<u32>,
    ) -> Result<Self, CoreError> {
        if positions.is_empty() {
            return Err(CoreError::InvalidMeshData("mesh has no vertices".into()));
        }
        if indices.is_empty() {
            return Err(CoreError::InvalidMeshData("mesh has no faces".into()));
        }
        if indices.len() % 3 != 0 {
            return Err(CoreError::InvalidMeshData(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if normals.len() != positions.len() {
            return Err(CoreError::InvalidMeshData(format!(
                "normal count {} does not match vertex count {}",
                normals.len(),
                positions.len()
            )));
        }
        if texcoords.len() != positions.len() {
            return Err(CoreError::InvalidMeshData(format!(
                "texcoord count {} does not match vertex count {}",
                texcoords.len(),
                positions.len()
            )));
        }
        let vertex_count = positions.len() as u32;
        if let Some(&bad) = indices.iter().find(|&&i| i >= vertex_count) {
            return Err(CoreError::InvalidMeshData(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }

        log::trace!(
            "MeshData: {} vertices, {} faces",
            positions.len(),
            indices.len() / 3
        );

        Ok(Self::from_arrays(positions, normals, texcoords, indices))
    }

    /// Construct without validation. The arrays must already satisfy the
    /// `MeshData` invariants.
    pub(crate) fn from_arrays(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        texcoords: Vec<[f32; 2]>,
        indices: Vec<u32>,
    ) -> Self {
        Self {
            positions,
            normals,
            texcoords,
            indices,
            label: None,
        }
    }

    /// Set a debug label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Number of triangles.
    pub fn face_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }

    /// Number of indices (`face_count() * 3`).
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Vertex positions, one `[f32; 3]` per vertex.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Vertex normals, one `[f32; 3]` per vertex.
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Texture coordinates, one `[f32; 2]` per vertex.
    pub fn texcoords(&self) -> &[[f32; 2]] {
        &self.texcoords
    }

    /// Triangle indices, three per face.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The debug label, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Position stream as raw bytes (stride 12).
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normal stream as raw bytes (stride 12).
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Texcoord stream as raw bytes (stride 8).
    pub fn texcoord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texcoords)
    }

    /// Index array as raw bytes (4 bytes per index).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl std::fmt::Debug for MeshData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshData")
            .field("vertices", &self.vertex_count())
            .field("faces", &self.face_count())
            .field("label", &self.label)
            .finish()
    }
}
