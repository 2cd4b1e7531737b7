use std::rc::Rc;

use cgmath::Matrix4;
use engine::scene::MAX_JOINTS;

use super::clip::AnimationClip;
use super::skeleton::{compose_trs, Skeleton};

/// Looping playback state for a single authored clip. Advanced by frame
/// delta time; sampling produces the skinning palette for the current
/// wrapped clip time.
pub struct AnimationMixer {
    clip: Rc<AnimationClip>,
    elapsed: f32,
}

impl AnimationMixer {
    pub fn new(clip: Rc<AnimationClip>) -> Self {
        AnimationMixer { clip, elapsed: 0.0 }
    }

    pub fn clip_name(&self) -> &str {
        &self.clip.name
    }

    /// Current playback position within the clip.
    pub fn time(&self) -> f32 {
        self.elapsed
    }

    /// Advance playback, wrapping at the clip duration (looping).
    pub fn advance(&mut self, delta: f32) {
        if self.clip.duration > 0.0 {
            self.elapsed = (self.elapsed + delta) % self.clip.duration;
        }
    }

    /// Sample every animated node at the current time, fall back to rest
    /// pose for unkeyed components, and flatten through the joint hierarchy
    /// into the GPU palette.
    pub fn skinning_palette(&self, skeleton: &Skeleton) -> [Matrix4<f32>; MAX_JOINTS] {
        let locals: Vec<Matrix4<f32>> = skeleton
            .nodes()
            .iter()
            .map(|node| {
                let (translation, rotation, scale) =
                    self.clip.sample_node(node.node_index, self.elapsed);

                compose_trs(
                    translation.unwrap_or(node.rest.translation),
                    rotation.unwrap_or(node.rest.rotation),
                    scale.unwrap_or(node.rest.scale),
                )
            })
            .collect();

        skeleton.compute_palette(&locals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::clip::{Channel, ChannelProperty, ChannelValue, Keyframe};
    use crate::motion::skeleton::{NodeDesc, RestTransform};
    use cgmath::vec3;

    fn single_joint_skeleton() -> Skeleton {
        Skeleton::new(
            vec![NodeDesc {
                index: 0,
                parent: None,
                name: Some("root".to_string()),
                rest: RestTransform::identity(),
            }],
            vec![0],
            vec![Matrix4::from_scale(1.0)],
        )
    }

    fn sliding_clip(duration: f32) -> AnimationClip {
        let mut channel = Channel::new(0, ChannelProperty::Translation);
        channel.add_keyframe(Keyframe {
            time: 0.0,
            value: ChannelValue::Translation(vec3(0.0, 0.0, 0.0)),
        });
        channel.add_keyframe(Keyframe {
            time: duration,
            value: ChannelValue::Translation(vec3(duration, 0.0, 0.0)),
        });

        let mut clip = AnimationClip::new("slide".to_string());
        clip.add_channel(channel);
        clip
    }

    #[test]
    fn test_advance_wraps_at_duration() {
        let mut mixer = AnimationMixer::new(Rc::new(sliding_clip(2.0)));

        mixer.advance(1.5);
        assert!((mixer.time() - 1.5).abs() < 1e-6);

        mixer.advance(1.0);
        assert!((mixer.time() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_advance_with_zero_duration_clip_is_stable() {
        let mut mixer = AnimationMixer::new(Rc::new(AnimationClip::new("empty".to_string())));
        mixer.advance(1.0);
        assert_eq!(mixer.time(), 0.0);
    }

    #[test]
    fn test_palette_follows_sampled_translation() {
        let skeleton = single_joint_skeleton();
        let mut mixer = AnimationMixer::new(Rc::new(sliding_clip(2.0)));

        mixer.advance(1.0);
        let palette = mixer.skinning_palette(&skeleton);
        assert!((palette[0].w.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_unkeyed_nodes_stay_at_rest() {
        let skeleton = Skeleton::new(
            vec![NodeDesc {
                index: 7,
                parent: None,
                name: None,
                rest: RestTransform {
                    translation: vec3(0.0, 3.0, 0.0),
                    ..RestTransform::identity()
                },
            }],
            vec![7],
            vec![Matrix4::from_scale(1.0)],
        );

        // Clip animates node 0 only; node 7 keeps its rest translation
        let mixer = AnimationMixer::new(Rc::new(sliding_clip(2.0)));
        let palette = mixer.skinning_palette(&skeleton);
        assert!((palette[0].w.y - 3.0).abs() < 1e-5);
    }
}
