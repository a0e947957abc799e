// Placeholder geometry shown until a reconstructed model can be loaded.

/// Edge half-length of the unscaled cube is 1.0; it is drawn at half size.
pub const CUBE_SCALE: f32 = 0.5;

#[rustfmt::skip]
const CUBE_POSITIONS: [f32; 72] = [
    // Front face
    -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,
    // Back face
    -1.0, -1.0, -1.0,  -1.0,  1.0, -1.0,   1.0,  1.0, -1.0,   1.0, -1.0, -1.0,
    // Top face
    -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,   1.0,  1.0,  1.0,   1.0,  1.0, -1.0,
    // Bottom face
    -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,
    // Right face
     1.0, -1.0, -1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,   1.0, -1.0,  1.0,
    // Left face
    -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,  -1.0,  1.0,  1.0,  -1.0,  1.0, -1.0,
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
];

#[rustfmt::skip]
const CUBE_TEX_COORDS: [f32; 48] = [
    0.0, 0.0,  1.0, 0.0,  1.0, 1.0,  0.0, 1.0,
    1.0, 0.0,  1.0, 1.0,  0.0, 1.0,  0.0, 0.0,
    0.0, 1.0,  0.0, 0.0,  1.0, 0.0,  1.0, 1.0,
    1.0, 1.0,  0.0, 1.0,  0.0, 0.0,  1.0, 0.0,
    1.0, 0.0,  1.0, 1.0,  0.0, 1.0,  0.0, 0.0,
    0.0, 0.0,  1.0, 0.0,  1.0, 1.0,  0.0, 1.0,
];

/// Flat attribute arrays for the placeholder cube, in upload order
/// `(vertices, normals, indices, tex_coords)`.
pub fn cube_arrays() -> (Vec<f32>, Vec<f32>, Vec<u16>, Vec<f32>) {
    let vertices = CUBE_POSITIONS.iter().map(|v| v * CUBE_SCALE).collect();

    let normals = FACE_NORMALS
        .iter()
        .flat_map(|n| std::iter::repeat_n(*n, 4))
        .flatten()
        .collect();

    let indices = (0..6u16)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect();

    (vertices, normals, indices, CUBE_TEX_COORDS.to_vec())
}
