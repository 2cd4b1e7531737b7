extern crate gl;
use std::rc::Rc;

use crate::scene::light::{LightRig, LightUniforms, LIGHTING_GLSL};
use crate::scene::Material;
use crate::shader_program::ShaderProgram;
use crate::texture::TextureTrait;
use crate::EngineRenderContext;

use c_string::*;
use cgmath::prelude::*;
use cgmath::Matrix4;

use once_cell::sync::OnceCell;

const VERTEX_SHADER_SOURCE: &str = r#"
        layout (location = 0) in vec3 inPos;
        layout (location = 1) in vec3 inNormal;
        layout (location = 2) in vec2 inUv;

        uniform mat4 world;
        uniform mat4 view;
        uniform mat4 projection;

        out vec3 worldNormal;
        out vec2 texCoord;

        void main() {
            texCoord = inUv;
            worldNormal = normalize(mat3(world) * inNormal);
            gl_Position = projection * view * world * vec4(inPos, 1.0);
        }
"#;

const FRAGMENT_SHADER_BODY: &str = r#"
        in vec3 worldNormal;
        in vec2 texCoord;

        out vec4 fragColor;

        uniform sampler2D texture1;
        uniform vec4 baseColor;

        void main() {
            vec4 albedo = texture(texture1, texCoord) * baseColor;
            if (albedo.a < 0.1) discard;
            fragColor = vec4(albedo.rgb * evalLighting(normalize(worldNormal)), albedo.a);
        }
"#;

struct Uniforms {
    world_loc: i32,
    view_loc: i32,
    projection_loc: i32,
    base_color_loc: i32,
    lights: LightUniforms,
}

static SHADER_PROGRAM: OnceCell<(ShaderProgram, Uniforms)> = OnceCell::new();

/// Textured, lambert-lit material for static meshes.
pub struct BasicMaterial {
    has_initialized: bool,
    diffuse_texture: Rc<dyn TextureTrait>,
    base_color: [f32; 4],
}

impl BasicMaterial {
    fn is_transparent(&self) -> bool {
        self.base_color[3] < 0.999
    }

    fn draw_common(&self, render_context: &EngineRenderContext, world_matrix: &Matrix4<f32>, lights: &LightRig) {
        let (shader_program, uniforms) = SHADER_PROGRAM.get().expect("shader not compiled");
        self.diffuse_texture.bind0();
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
            gl::Uniform4f(
                uniforms.base_color_loc,
                self.base_color[0],
                self.base_color[1],
                self.base_color[2],
                self.base_color[3],
            );
            uniforms.lights.apply(lights);
        }
    }
}

impl Material for BasicMaterial {
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
                    base_color_loc: gl::GetUniformLocation(
                        shader.gl_id,
                        c_str!("baseColor").as_ptr(),
                    ),
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
        if !self.is_transparent() {
            self.draw_common(render_context, world_matrix, lights);
            true
        } else {
            false
        }
    }

    fn draw_transparent(
        &self,
        render_context: &EngineRenderContext,
        world_matrix: &Matrix4<f32>,
        _skinning_data: &[Matrix4<f32>],
        lights: &LightRig,
    ) -> bool {
        if self.is_transparent() {
            self.draw_common(render_context, world_matrix, lights);
            true
        } else {
            false
        }
    }
}

pub fn create(diffuse_texture: Rc<dyn TextureTrait>, base_color: [f32; 4]) -> Box<dyn Material> {
    Box::new(BasicMaterial {
        has_initialized: false,
        diffuse_texture,
        base_color,
    })
}
