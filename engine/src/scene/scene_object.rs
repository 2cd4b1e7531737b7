use crate::scene::light::LightRig;
use crate::scene::{Geometry, Material};
use crate::EngineRenderContext;
use cgmath::prelude::*;
use cgmath::Matrix4;
use std::cell::RefCell;
use std::rc::Rc;

/// Size of the skinning palette uploaded per object. Humanoid avatar rigs
/// with finger joints routinely exceed 40 bones, so 64.
pub const MAX_JOINTS: usize = 64;

#[derive(Clone)]
pub struct SceneObject {
    pub material: Rc<RefCell<Box<dyn Material>>>,
    pub geometry: Rc<dyn Geometry>,
    pub transform: Matrix4<f32>,
    pub skinning_data: [Matrix4<f32>; MAX_JOINTS],
}

impl SceneObject {
    pub fn new(material: Box<dyn Material>, geometry: Rc<dyn Geometry>) -> SceneObject {
        SceneObject {
            material: Rc::new(RefCell::new(material)),
            geometry,
            transform: Matrix4::identity(),
            skinning_data: [Matrix4::identity(); MAX_JOINTS],
        }
    }

    pub fn set_transform(&mut self, transform: Matrix4<f32>) {
        self.transform = transform;
    }

    pub fn get_transform(&self) -> Matrix4<f32> {
        self.transform
    }

    pub fn set_skinning_data(&mut self, skinning_data: [Matrix4<f32>; MAX_JOINTS]) {
        self.skinning_data = skinning_data;
    }

    pub fn draw_opaque(
        &self,
        render_context: &EngineRenderContext,
        is_opengl_es: bool,
        lights: &LightRig,
    ) {
        if !self.material.borrow().has_initialized() {
            self.material.borrow_mut().initialize(is_opengl_es);
        }

        if self.material.borrow().draw_opaque(
            render_context,
            &self.transform,
            &self.skinning_data,
            lights,
        ) {
            self.geometry.draw();
        }
    }

    pub fn draw_transparent(
        &self,
        render_context: &EngineRenderContext,
        _is_opengl_es: bool,
        lights: &LightRig,
    ) {
        if self.material.borrow().draw_transparent(
            render_context,
            &self.transform,
            &self.skinning_data,
            lights,
        ) {
            self.geometry.draw();
        }
    }
}
