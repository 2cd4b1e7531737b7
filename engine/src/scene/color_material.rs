extern crate gl;

use crate::scene::light::{LightRig, LightUniforms, LIGHTING_GLSL};
use crate::scene::Material;
use crate::shader_program::ShaderProgram;
use crate::EngineRenderContext;

use c_string::*;
use cgmath::prelude::*;
use cgmath::{Matrix4, Vector3};

use once_cell::sync::OnceCell;

const VERTEX_SHADER_SOURCE: &str = r#"
        layout (location = 0) in vec3 inPos;
        layout (location = 1) in vec3 inNormal;
        layout (location = 2) in vec2 inUv;

        uniform mat4 world;
        uniform mat4 view;
        uniform mat4 projection;

        out vec3 worldNormal;

        void main() {
            worldNormal = normalize(mat3(world) * inNormal);
            gl_Position = projection * view * world * vec4(inPos, 1.0);
        }
"#;

const FRAGMENT_SHADER_BODY: &str = r#"
        in vec3 worldNormal;

        out vec4 fragColor;

        uniform vec3 inColor;

        void main() {
            fragColor = vec4(inColor * evalLighting(normalize(worldNormal)), 1.0);
        }
"#;

struct Uniforms {
    world_loc: i32,
    view_loc: i32,
    projection_loc: i32,
    color_loc: i32,
    lights: LightUniforms,
}

static SHADER_PROGRAM: OnceCell<(ShaderProgram, Uniforms)> = OnceCell::new();

/// Untextured, lambert-lit solid color. Used for meshes that carry only a
/// base color factor and for the fallback box.
pub struct ColorMaterial {
    has_initialized: bool,
    color: Vector3<f32>,
}

impl Material for ColorMaterial {
    fn has_initialized(&self) -> bool {
        self.has_initialized
    }

    fn initialize(&mut self, is_opengl_es: bool) {
        let _ = SHADER_PROGRAM.get_or_init(|| {
            let vertex_shader = crate::shader::build(
                VERTEX_SHADER_SOURCE,
                crate::shader::ShaderType::Vertex,
                is_opengl_es,
            );

            let fragment_source = format!("{}{}", LIGHTING_GLSL, FRAGMENT_SHADER_BODY);
            let fragment_shader = crate::shader::build(
                &fragment_source,
                crate::shader::ShaderType::Fragment,
                is_opengl_es,
            );

            unsafe {
                let shader = crate::shader_program::link(&vertex_shader, &fragment_shader);

                let uniforms = Uniforms {
                    world_loc: gl::GetUniformLocation(shader.gl_id, c_str!("world").as_ptr()),
                    view_loc: gl::GetUniformLocation(shader.gl_id, c_str!("view").as_ptr()),
                    projection_loc: gl::GetUniformLocation(
                        shader.gl_id,
                        c_str!("projection").as_ptr(),
                    ),
                    color_loc: gl::GetUniformLocation(shader.gl_id, c_str!("inColor").as_ptr()),
                    lights: LightUniforms::locate(shader.gl_id),
                };
                (shader, uniforms)
            }
        });

        self.has_initialized = true;
    }

    fn draw_opaque(
        &self,
        render_context: &EngineRenderContext,
        world_matrix: &Matrix4<f32>,
        _skinning_data: &[Matrix4<f32>],
        lights: &LightRig,
    ) -> bool {
        let (shader_program, uniforms) = SHADER_PROGRAM.get().expect("shader not compiled");
        unsafe {
            gl::UseProgram(shader_program.gl_id);

            gl::UniformMatrix4fv(uniforms.world_loc, 1, gl::FALSE, world_matrix.as_ptr());
            gl::UniformMatrix4fv(
                uniforms.view_loc,
                1,
                gl::FALSE,
                render_context.view_matrix.as_ptr(),
            );
            gl::UniformMatrix4fv(
                uniforms.projection_loc,
                1,
                gl::FALSE,
                render_context.projection_matrix.as_ptr(),
            );
            gl::Uniform3f(uniforms.color_loc, self.color.x, self.color.y, self.color.z);
            uniforms.lights.apply(lights);
        }
        true
    }
}

pub fn create(color: Vector3<f32>) -> Box<dyn Material> {
    Box::new(ColorMaterial {
        has_initialized: false,
        color,
    })
}
