use crate::scene::light::LightRig;
use crate::EngineRenderContext;
use cgmath::Matrix4;

pub trait Material {
    fn has_initialized(&self) -> bool;

    /// Compile/link the material's shader program. Called lazily from the
    /// draw path the first time the material is rendered, on the GL thread.
    fn initialize(&mut self, is_opengl_es: bool);

    /// Draw with single-pass lighting. Returns true if the material bound
    /// its program (the caller then issues the geometry draw).
    fn draw_opaque(
        &self,
        render_context: &EngineRenderContext,
        world_matrix: &Matrix4<f32>,
        skinning_data: &[Matrix4<f32>],
        lights: &LightRig,
    ) -> bool;

    /// Blended pass, run after every opaque object. Default: nothing to do.
    fn draw_transparent(
        &self,
        _render_context: &EngineRenderContext,
        _world_matrix: &Matrix4<f32>,
        _skinning_data: &[Matrix4<f32>],
        _lights: &LightRig,
    ) -> bool {
        false
    }
}
