extern crate gl;

use crate::render_log;
use crate::scene::Scene;
use crate::EngineRenderContext;

const CLEAR_COLOR: [f32; 4] = [0.07, 0.08, 0.10, 1.0];

pub struct OpenGLEngine {
    pub is_opengl_es: bool,
}

impl OpenGLEngine {
    pub fn new(is_opengl_es: bool) -> Self {
        OpenGLEngine { is_opengl_es }
    }

    /// Draw one frame: clear, opaque pass, then blended pass with depth
    /// writes off.
    pub fn render(&self, context: &EngineRenderContext, scene: &Scene) {
        render_log!(trace, "rendering {} objects", scene.object_count());

        unsafe {
            gl::ClearColor(
                CLEAR_COLOR[0],
                CLEAR_COLOR[1],
                CLEAR_COLOR[2],
                CLEAR_COLOR[3],
            );
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
            gl::Enable(gl::DEPTH_TEST);
        }

        for object in &scene.objects {
            object.draw_opaque(context, self.is_opengl_es, &scene.lights);
        }

        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::DepthMask(gl::FALSE);
        }

        for object in &scene.objects {
            object.draw_transparent(context, self.is_opengl_es, &scene.lights);
        }

        unsafe {
            gl::DepthMask(gl::TRUE);
            gl::Disable(gl::BLEND);
        }
    }
}
