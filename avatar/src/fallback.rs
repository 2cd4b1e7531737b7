use std::rc::Rc;

use cgmath::vec3;
use engine::scene::{box_mesh, color_material, SceneObject};

use crate::node::{AvatarDriver, AvatarNode, FallbackSpin, FitTransform};

/// Placeholder box shown when the real avatar cannot be loaded: roughly
/// person-sized, solid blue, turning gently.
pub const FALLBACK_BOX_DIMENSIONS: [f32; 3] = [1.0, 2.0, 0.5];

/// Build the fallback node. Runs on the GL thread (uploads the box mesh).
pub fn build_fallback_node() -> AvatarNode {
    let geometry = Rc::new(box_mesh::create_box(
        FALLBACK_BOX_DIMENSIONS[0],
        FALLBACK_BOX_DIMENSIONS[1],
        FALLBACK_BOX_DIMENSIONS[2],
    ));
    let material = color_material::create(vec3(0.27, 0.53, 1.0));
    let object = SceneObject::new(material, geometry);

    // Box rests on the ground plane rather than straddling it
    let fit = FitTransform {
        scale: 1.0,
        offset: vec3(0.0, FALLBACK_BOX_DIMENSIONS[1] * 0.5, 0.0),
    };

    AvatarNode::new(
        vec![object],
        None,
        fit,
        AvatarDriver::Spin(FallbackSpin::default()),
    )
}
