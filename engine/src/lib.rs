extern crate gl;

pub mod frame_clock;
pub mod logging;
pub mod scene;
pub mod shader;
pub mod shader_program;
pub mod texture;

mod gl_engine;

pub use frame_clock::FrameClock;
pub use gl_engine::OpenGLEngine;

use cgmath::{Matrix4, Vector2};

/// Per-frame parameters handed to the renderer and every material.
pub struct EngineRenderContext {
    pub time: f32,
    pub view_matrix: Matrix4<f32>,
    pub projection_matrix: Matrix4<f32>,
    pub screen_size: Vector2<f32>,
}

/// Create the OpenGL backend. The GL symbols must already be loaded for the
/// current context before the first render call.
pub fn opengl() -> OpenGLEngine {
    OpenGLEngine::new(false)
}

pub fn opengl_es() -> OpenGLEngine {
    OpenGLEngine::new(true)
}
