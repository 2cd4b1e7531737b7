use crate::scene::light::LightRig;
pub use crate::scene::scene_object::SceneObject;

/// One frame's renderable set: the objects plus the light rig they are lit
/// by.
#[derive(Clone)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: LightRig,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: LightRig::new(),
        }
    }

    pub fn from_objects(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            lights: LightRig::new(),
        }
    }

    pub fn with_lights(objects: Vec<SceneObject>, lights: LightRig) -> Self {
        Self { objects, lights }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
