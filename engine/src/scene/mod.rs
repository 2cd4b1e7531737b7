pub mod scene;
pub use scene::Scene;

pub mod light;
pub use light::{DirectionalLight, HemisphereLight, LightRig};

pub mod scene_object;
pub use scene_object::{SceneObject, MAX_JOINTS};

pub mod geometry;
pub use geometry::Geometry;

pub mod vertex;
pub use vertex::*;

pub mod indexed_mesh;
pub use indexed_mesh::IndexedMesh;

pub mod box_mesh;
pub use box_mesh::create_box;

pub mod material;
pub use material::Material;

pub mod basic_material;
pub use basic_material::BasicMaterial;

pub mod color_material;
pub use color_material::ColorMaterial;

pub mod skinned_material;
pub use skinned_material::SkinnedMaterial;
