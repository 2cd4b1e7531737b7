use cgmath::{vec2, vec3, Vector3};

use super::{indexed_mesh, IndexedMesh, VertexPositionNormalUv};

/// Axis-aligned box centered at the origin, one quad per face with
/// outward-facing normals. Used for the fallback avatar.
pub fn create_box(width: f32, height: f32, depth: f32) -> IndexedMesh {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    // (normal, four corners counter-clockwise seen from outside)
    let faces: [(Vector3<f32>, [Vector3<f32>; 4]); 6] = [
        (
            vec3(0.0, 0.0, 1.0),
            [
                vec3(-hw, -hh, hd),
                vec3(hw, -hh, hd),
                vec3(hw, hh, hd),
                vec3(-hw, hh, hd),
            ],
        ),
        (
            vec3(0.0, 0.0, -1.0),
            [
                vec3(hw, -hh, -hd),
                vec3(-hw, -hh, -hd),
                vec3(-hw, hh, -hd),
                vec3(hw, hh, -hd),
            ],
        ),
        (
            vec3(1.0, 0.0, 0.0),
            [
                vec3(hw, -hh, hd),
                vec3(hw, -hh, -hd),
                vec3(hw, hh, -hd),
                vec3(hw, hh, hd),
            ],
        ),
        (
            vec3(-1.0, 0.0, 0.0),
            [
                vec3(-hw, -hh, -hd),
                vec3(-hw, -hh, hd),
                vec3(-hw, hh, hd),
                vec3(-hw, hh, -hd),
            ],
        ),
        (
            vec3(0.0, 1.0, 0.0),
            [
                vec3(-hw, hh, hd),
                vec3(hw, hh, hd),
                vec3(hw, hh, -hd),
                vec3(-hw, hh, -hd),
            ],
        ),
        (
            vec3(0.0, -1.0, 0.0),
            [
                vec3(-hw, -hh, -hd),
                vec3(hw, -hh, -hd),
                vec3(hw, -hh, hd),
                vec3(-hw, -hh, hd),
            ],
        ),
    ];

    let uvs = [
        vec2(0.0, 0.0),
        vec2(1.0, 0.0),
        vec2(1.0, 1.0),
        vec2(0.0, 1.0),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs.iter()) {
            vertices.push(VertexPositionNormalUv {
                position: *corner,
                normal,
                uv: *uv,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    indexed_mesh::create(&vertices, &indices)
}
