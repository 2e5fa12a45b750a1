//! Mesh generators for the demo shapes.
//!
//! These generators produce [`MeshData`] values with separate attribute
//! arrays, ready for the one-buffer-per-stream upload path of the graphics
//! crate. They stand in for externally supplied model data in demos and
//! tests.

use super::data::MeshData;

/// Generate a quad mesh on the XY plane.
///
/// Creates a quad centered at the origin facing +Z, with UV coordinates from
/// (0,0) at top-left to (1,1) at bottom-right. 4 vertices, 2 faces.
///
/// # Arguments
///
/// * `half_width` - Half the width of the quad along the X axis
/// * `half_height` - Half the height of the quad along the Y axis
pub fn generate_quad(half_width: f32, half_height: f32) -> MeshData {
    let positions = vec![
        [-half_width, -half_height, 0.0],
        [half_width, -half_height, 0.0],
        [half_width, half_height, 0.0],
        [-half_width, half_height, 0.0],
    ];
    let normals = vec![[0.0, 0.0, 1.0]; 4];
    let texcoords = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    let indices = vec![0, 1, 2, 2, 3, 0];

    MeshData::from_arrays(positions, normals, texcoords, indices).with_label("quad")
}

/// Generate an axis-aligned cube mesh.
///
/// Creates a cube centered at the origin with 4 vertices per face (24 total)
/// so each face carries its own normal and UV corners. 12 faces, 36 indices.
///
/// # Arguments
///
/// * `half_extent` - Half the edge length along each axis
pub fn generate_cube(half_extent: f32) -> MeshData {
    let h = half_extent;

    // One entry per face: normal plus the four corners in CCW order when
    // viewed from outside.
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +X
        (
            [1.0, 0.0, 0.0],
            [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],
        ),
        // -X
        (
            [-1.0, 0.0, 0.0],
            [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
        ),
        // +Y
        (
            [0.0, 1.0, 0.0],
            [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],
        ),
        // -Y
        (
            [0.0, -1.0, 0.0],
            [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
        ),
        // +Z
        (
            [0.0, 0.0, 1.0],
            [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
        ),
        // -Z
        (
            [0.0, 0.0, -1.0],
            [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]],
        ),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut texcoords = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, (normal, corners)) in faces.iter().enumerate() {
        let base = (face * 4) as u32;
        positions.extend_from_slice(corners);
        normals.extend_from_slice(&[*normal; 4]);
        texcoords.extend_from_slice(&[[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]);
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    MeshData::from_arrays(positions, normals, texcoords, indices).with_label("cube")
}
