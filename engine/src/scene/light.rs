extern crate gl;
use std::ffi::CString;

use cgmath::{vec3, InnerSpace, Vector3};
use gl::types::GLuint;

pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Infinitely distant light. `direction` points from the surface toward the
/// light and is kept normalized.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Build from a world-space light position, the way scene rigs are
    /// usually authored.
    pub fn from_position(position: Vector3<f32>, color: Vector3<f32>, intensity: f32) -> Self {
        DirectionalLight {
            direction: position.normalize(),
            color,
            intensity,
        }
    }

    fn premultiplied(&self) -> Vector3<f32> {
        self.color * self.intensity
    }
}

/// Sky/ground gradient term blended by the world-space normal's Y component.
#[derive(Debug, Clone, Copy)]
pub struct HemisphereLight {
    pub sky_color: Vector3<f32>,
    pub ground_color: Vector3<f32>,
    pub intensity: f32,
}

/// Fixed-function light set for single-pass shading: one ambient term, an
/// optional hemisphere term, and up to 4 directional lights.
#[derive(Debug, Clone)]
pub struct LightRig {
    pub ambient_color: Vector3<f32>,
    pub ambient_intensity: f32,
    pub hemisphere: Option<HemisphereLight>,
    pub directionals: [Option<DirectionalLight>; MAX_DIRECTIONAL_LIGHTS],
}

impl LightRig {
    pub fn new() -> Self {
        LightRig {
            ambient_color: vec3(0.0, 0.0, 0.0),
            ambient_intensity: 0.0,
            hemisphere: None,
            directionals: [None; MAX_DIRECTIONAL_LIGHTS],
        }
    }

    /// Add a directional light to the first free slot. Returns the slot
    /// index, or None when the rig is full.
    pub fn add_directional(&mut self, light: DirectionalLight) -> Option<usize> {
        for (i, slot) in self.directionals.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(light);
                return Some(i);
            }
        }
        None
    }

    pub fn active_directional_count(&self) -> usize {
        self.directionals.iter().filter(|d| d.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.ambient_color = vec3(0.0, 0.0, 0.0);
        self.ambient_intensity = 0.0;
        self.hemisphere = None;
        self.directionals = [None; MAX_DIRECTIONAL_LIGHTS];
    }

    /// The rig used for avatar presentation: soft ambient, a white/grey
    /// hemisphere, a warm key light and a faint cool rim light from behind.
    pub fn avatar_studio() -> Self {
        let mut rig = LightRig {
            ambient_color: vec3(0.25, 0.25, 0.25),
            ambient_intensity: 0.4,
            hemisphere: Some(HemisphereLight {
                sky_color: vec3(1.0, 1.0, 1.0),
                ground_color: vec3(0.27, 0.27, 0.27),
                intensity: 0.8,
            }),
            directionals: [None; MAX_DIRECTIONAL_LIGHTS],
        };

        rig.add_directional(DirectionalLight::from_position(
            vec3(-3.0, 8.0, 4.0),
            vec3(1.0, 1.0, 1.0),
            1.2,
        ));
        rig.add_directional(DirectionalLight::from_position(
            vec3(-5.0, 5.0, -5.0),
            vec3(0.4, 0.6, 1.0),
            0.3,
        ));

        rig
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new()
    }
}

/// GLSL shared by every lit material: the light uniforms plus an
/// `evalLighting` function over the world-space normal. Prepended to each
/// material's fragment body at shader build time.
pub const LIGHTING_GLSL: &str = r#"
        uniform vec3 ambientTerm;
        uniform vec3 hemiSky;
        uniform vec3 hemiGround;
        uniform int dirLightCount;
        uniform vec3 dirLightDirection[4];
        uniform vec3 dirLightColor[4];

        vec3 evalLighting(vec3 normal) {
            float hemiMix = normal.y * 0.5 + 0.5;
            vec3 total = ambientTerm + mix(hemiGround, hemiSky, hemiMix);
            for (int i = 0; i < dirLightCount; i++) {
                float lambert = max(dot(normal, dirLightDirection[i]), 0.0);
                total += dirLightColor[i] * lambert;
            }
            return total;
        }
"#;

/// Uniform locations for the block declared in LIGHTING_GLSL.
pub struct LightUniforms {
    ambient_loc: i32,
    hemi_sky_loc: i32,
    hemi_ground_loc: i32,
    count_loc: i32,
    direction_locs: [i32; MAX_DIRECTIONAL_LIGHTS],
    color_locs: [i32; MAX_DIRECTIONAL_LIGHTS],
}

impl LightUniforms {
    /// # Safety
    /// Requires a current GL context and a linked `program`.
    pub unsafe fn locate(program: GLuint) -> Self {
        let loc = |name: &str| -> i32 {
            let c_name = CString::new(name).unwrap();
            gl::GetUniformLocation(program, c_name.as_ptr())
        };

        let mut direction_locs = [-1; MAX_DIRECTIONAL_LIGHTS];
        let mut color_locs = [-1; MAX_DIRECTIONAL_LIGHTS];
        for i in 0..MAX_DIRECTIONAL_LIGHTS {
            direction_locs[i] = loc(&format!("dirLightDirection[{}]", i));
            color_locs[i] = loc(&format!("dirLightColor[{}]", i));
        }

        LightUniforms {
            ambient_loc: loc("ambientTerm"),
            hemi_sky_loc: loc("hemiSky"),
            hemi_ground_loc: loc("hemiGround"),
            count_loc: loc("dirLightCount"),
            direction_locs,
            color_locs,
        }
    }

    /// # Safety
    /// The owning program must be in use.
    pub unsafe fn apply(&self, rig: &LightRig) {
        let ambient = rig.ambient_color * rig.ambient_intensity;
        gl::Uniform3f(self.ambient_loc, ambient.x, ambient.y, ambient.z);

        let (sky, ground) = match &rig.hemisphere {
            Some(hemi) => (
                hemi.sky_color * hemi.intensity,
                hemi.ground_color * hemi.intensity,
            ),
            None => (vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 0.0)),
        };
        gl::Uniform3f(self.hemi_sky_loc, sky.x, sky.y, sky.z);
        gl::Uniform3f(self.hemi_ground_loc, ground.x, ground.y, ground.z);

        let mut count = 0;
        for light in rig.directionals.iter().flatten() {
            let color = light.premultiplied();
            gl::Uniform3f(
                self.direction_locs[count],
                light.direction.x,
                light.direction.y,
                light.direction.z,
            );
            gl::Uniform3f(self.color_locs[count], color.x, color.y, color.z);
            count += 1;
        }
        gl::Uniform1i(self.count_loc, count as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_directional_fills_slots_in_order() {
        let mut rig = LightRig::new();
        let light =
            DirectionalLight::from_position(vec3(0.0, 1.0, 0.0), vec3(1.0, 1.0, 1.0), 1.0);

        assert_eq!(rig.add_directional(light), Some(0));
        assert_eq!(rig.add_directional(light), Some(1));
        assert_eq!(rig.active_directional_count(), 2);
    }

    #[test]
    fn test_add_directional_rejects_when_full() {
        let mut rig = LightRig::new();
        let light =
            DirectionalLight::from_position(vec3(1.0, 2.0, 3.0), vec3(1.0, 1.0, 1.0), 1.0);

        for _ in 0..MAX_DIRECTIONAL_LIGHTS {
            assert!(rig.add_directional(light).is_some());
        }
        assert_eq!(rig.add_directional(light), None);
    }

    #[test]
    fn test_from_position_normalizes_direction() {
        let light =
            DirectionalLight::from_position(vec3(0.0, 10.0, 0.0), vec3(1.0, 1.0, 1.0), 1.0);
        assert!((light.direction.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_avatar_studio_rig_shape() {
        let rig = LightRig::avatar_studio();
        assert_eq!(rig.active_directional_count(), 2);
        assert!(rig.hemisphere.is_some());
        assert!(rig.ambient_intensity > 0.0);
    }
}
