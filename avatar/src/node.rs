use std::rc::Rc;

use cgmath::{vec3, Matrix4, Rad, Vector3};
use collision::{Aabb, Aabb3};
use engine::motion_log;
use engine::scene::SceneObject;

use crate::importer::AvatarContents;
use crate::model;
use crate::motion::{AnimationMixer, Skeleton};

/// Height every avatar is scaled to, in scene units.
pub const DEFAULT_TARGET_HEIGHT: f32 = 1.8;

/// Uniform scale + translation that fits a bounding box to the target
/// height with its center at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitTransform {
    pub scale: f32,
    pub offset: Vector3<f32>,
}

impl FitTransform {
    pub fn fit_to_height(bounds: &Aabb3<f32>, target_height: f32) -> FitTransform {
        let dim = bounds.dim();
        let center = bounds.center();

        let max_dim = dim.x.max(dim.y).max(dim.z);
        let scale = if max_dim > 0.0 {
            target_height / max_dim
        } else {
            1.0
        };

        // Center compensation uses the scaled center
        FitTransform {
            scale,
            offset: vec3(-center.x * scale, -center.y * scale, -center.z * scale),
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.offset) * Matrix4::from_scale(self.scale)
    }

    /// Root matrix with the vertical axis scaled independently, for the
    /// breathing animation.
    pub fn matrix_with_vertical_scale(&self, scale_y: f32) -> Matrix4<f32> {
        Matrix4::from_translation(self.offset)
            * Matrix4::from_nonuniform_scale(self.scale, scale_y, self.scale)
    }
}

/// Synthesized breathing motion for assets with no authored clips:
/// `scale.y = base + sin(frequency * t) * amplitude`, period absolute in
/// elapsed time.
#[derive(Clone, Copy, Debug)]
pub struct IdleOscillation {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for IdleOscillation {
    fn default() -> Self {
        IdleOscillation {
            amplitude: 0.02,
            frequency: 2.0,
        }
    }
}

impl IdleOscillation {
    pub fn vertical_scale(&self, base_scale: f32, elapsed: f32) -> f32 {
        base_scale + (self.frequency * elapsed).sin() * self.amplitude
    }
}

/// Gentle side-to-side turn for the fallback placeholder.
#[derive(Clone, Copy, Debug)]
pub struct FallbackSpin {
    pub amplitude: f32,
}

impl Default for FallbackSpin {
    fn default() -> Self {
        FallbackSpin { amplitude: 0.2 }
    }
}

impl FallbackSpin {
    pub fn yaw(&self, elapsed: f32) -> Rad<f32> {
        Rad(elapsed.sin() * self.amplitude)
    }
}

/// What moves the avatar each frame. The frame loop dispatches over this
/// once per tick; there is no presence-checking anywhere else.
pub enum AvatarDriver {
    Clip(AnimationMixer),
    Idle(IdleOscillation),
    Spin(FallbackSpin),
}

/// The displayed avatar: its scene objects, the fit transform produced by
/// normalization, and the driver animating it. At most one exists per
/// viewer session.
pub struct AvatarNode {
    objects: Vec<SceneObject>,
    skeleton: Option<Skeleton>,
    fit: FitTransform,
    driver: AvatarDriver,
}

impl AvatarNode {
    pub fn new(
        objects: Vec<SceneObject>,
        skeleton: Option<Skeleton>,
        fit: FitTransform,
        driver: AvatarDriver,
    ) -> Self {
        let mut node = AvatarNode {
            objects,
            skeleton,
            fit,
            driver,
        };
        // Put objects in their resting placement before the first tick
        let root = node.fit.matrix();
        node.apply_root(root);
        node
    }

    /// Build the real avatar from parsed contents: upload meshes, fit to
    /// the target height, and pick the driver. Runs on the GL thread.
    pub fn from_contents(contents: &AvatarContents, target_height: f32) -> Self {
        let objects = model::upload_contents(contents);
        let fit = FitTransform::fit_to_height(&contents.bounding_box, target_height);

        let driver = match (contents.clips.first(), &contents.skeleton) {
            (Some(clip), Some(_)) => {
                motion_log!(
                    info,
                    "playing clip '{}' ({:.2}s, {} total)",
                    clip.name,
                    clip.duration,
                    contents.clips.len()
                );
                AvatarDriver::Clip(AnimationMixer::new(Rc::new(clip.clone())))
            }
            (Some(clip), None) => {
                motion_log!(
                    warn,
                    "clip '{}' targets no skin; substituting idle oscillation",
                    clip.name
                );
                AvatarDriver::Idle(IdleOscillation::default())
            }
            (None, _) => AvatarDriver::Idle(IdleOscillation::default()),
        };

        AvatarNode::new(objects, contents.skeleton.clone(), fit, driver)
    }

    /// Per-frame update: advance the driver and refresh object transforms.
    /// Clip playback consumes delta time; the synthesized motions read
    /// absolute elapsed time because their period is not delta-relative.
    pub fn advance(&mut self, delta: f32, elapsed: f32) {
        let root = match &mut self.driver {
            AvatarDriver::Clip(mixer) => {
                mixer.advance(delta);
                if let Some(skeleton) = &self.skeleton {
                    let palette = mixer.skinning_palette(skeleton);
                    for object in &mut self.objects {
                        object.set_skinning_data(palette);
                    }
                }
                self.fit.matrix()
            }
            AvatarDriver::Idle(oscillation) => {
                let scale_y = oscillation.vertical_scale(self.fit.scale, elapsed);
                self.fit.matrix_with_vertical_scale(scale_y)
            }
            AvatarDriver::Spin(spin) => {
                Matrix4::from_translation(self.fit.offset)
                    * Matrix4::from_angle_y(spin.yaw(elapsed))
                    * Matrix4::from_scale(self.fit.scale)
            }
        };

        self.apply_root(root);
    }

    fn apply_root(&mut self, root: Matrix4<f32>) {
        for object in &mut self.objects {
            object.set_transform(root);
        }
    }

    pub fn driver(&self) -> &AvatarDriver {
        &self.driver
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Clone the renderable set for this frame's scene.
    pub fn scene_objects(&self) -> Vec<SceneObject> {
        self.objects.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn aabb(min: [f32; 3], max: [f32; 3]) -> Aabb3<f32> {
        Aabb3::new(
            Point3::new(min[0], min[1], min[2]),
            Point3::new(max[0], max[1], max[2]),
        )
    }

    #[test]
    fn test_fit_scales_largest_extent_to_target_height() {
        let bounds = aabb([-1.0, 0.0, -1.0], [1.0, 4.0, 1.0]);
        let fit = FitTransform::fit_to_height(&bounds, 1.8);

        // Largest extent is 4.0 on Y
        assert!((fit.scale - 0.45).abs() < 1e-5);

        // Scaled center lands at the origin
        let center_y = 2.0;
        assert!((fit.offset.y - (-center_y * fit.scale)).abs() < 1e-5);
    }

    #[test]
    fn test_fit_of_centered_target_sized_box_is_identity() {
        let bounds = aabb([-0.45, -0.9, -0.2], [0.45, 0.9, 0.2]);
        let fit = FitTransform::fit_to_height(&bounds, 1.8);

        assert!((fit.scale - 1.0).abs() < 1e-5);
        assert!(fit.offset.x.abs() < 1e-5);
        assert!(fit.offset.y.abs() < 1e-5);
        assert!(fit.offset.z.abs() < 1e-5);
    }

    #[test]
    fn test_fit_handles_degenerate_bounds() {
        let bounds = aabb([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]);
        let fit = FitTransform::fit_to_height(&bounds, 1.8);
        assert_eq!(fit.scale, 1.0);
    }

    #[test]
    fn test_idle_oscillation_stays_within_amplitude() {
        let oscillation = IdleOscillation::default();
        let base = 1.0;

        let mut t = 0.0;
        while t < 10.0 {
            let scale_y = oscillation.vertical_scale(base, t);
            assert!(scale_y >= base - 0.02 - 1e-6);
            assert!(scale_y <= base + 0.02 + 1e-6);
            t += 0.05;
        }
    }

    #[test]
    fn test_idle_oscillation_period_is_pi() {
        let oscillation = IdleOscillation::default();
        let base = 1.0;

        let a = oscillation.vertical_scale(base, 0.7);
        let b = oscillation.vertical_scale(base, 0.7 + std::f32::consts::PI);
        assert!((a - b).abs() < 1e-5);
    }

    #[test]
    fn test_fallback_spin_is_bounded() {
        let spin = FallbackSpin::default();
        let mut t = 0.0;
        while t < 10.0 {
            assert!(spin.yaw(t).0.abs() <= 0.2 + 1e-6);
            t += 0.05;
        }
    }
}
