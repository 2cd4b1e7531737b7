use cgmath::{Vector2, Vector3};
use std::mem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexAttributeType {
    Float,
    Int,
}

pub struct VertexAttribute {
    pub attribute_type: VertexAttributeType,
    pub size: i32,
    pub offset: usize,
}

/// Vertex layouts uploadable to an IndexedMesh. Attribute order defines the
/// shader layout locations (0..n).
pub trait Vertex: Copy {
    fn stride() -> i32;
    fn attributes() -> Vec<VertexAttribute>;
}

/// Static mesh vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct VertexPositionNormalUv {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
}

impl Vertex for VertexPositionNormalUv {
    fn stride() -> i32 {
        mem::size_of::<Self>() as i32
    }

    fn attributes() -> Vec<VertexAttribute> {
        vec![
            VertexAttribute {
                attribute_type: VertexAttributeType::Float,
                size: 3,
                offset: 0,
            },
            VertexAttribute {
                attribute_type: VertexAttributeType::Float,
                size: 3,
                offset: mem::size_of::<Vector3<f32>>(),
            },
            VertexAttribute {
                attribute_type: VertexAttributeType::Float,
                size: 2,
                offset: 2 * mem::size_of::<Vector3<f32>>(),
            },
        ]
    }
}

/// Skinned mesh vertex: four joint indices with normalized weights.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct VertexSkinned {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
    pub joints: [i32; 4],
    pub weights: [f32; 4],
}

impl Vertex for VertexSkinned {
    fn stride() -> i32 {
        mem::size_of::<Self>() as i32
    }

    fn attributes() -> Vec<VertexAttribute> {
        let base = 2 * mem::size_of::<Vector3<f32>>() + mem::size_of::<Vector2<f32>>();
        vec![
            VertexAttribute {
                attribute_type: VertexAttributeType::Float,
                size: 3,
                offset: 0,
            },
            VertexAttribute {
                attribute_type: VertexAttributeType::Float,
                size: 3,
                offset: mem::size_of::<Vector3<f32>>(),
            },
            VertexAttribute {
                attribute_type: VertexAttributeType::Float,
                size: 2,
                offset: 2 * mem::size_of::<Vector3<f32>>(),
            },
            VertexAttribute {
                attribute_type: VertexAttributeType::Int,
                size: 4,
                offset: base,
            },
            VertexAttribute {
                attribute_type: VertexAttributeType::Float,
                size: 4,
                offset: base + mem::size_of::<[i32; 4]>(),
            },
        ]
    }
}
