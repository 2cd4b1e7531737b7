pub mod clip;
pub mod mixer;
pub mod skeleton;

pub use clip::{AnimationClip, Channel, ChannelProperty, ChannelValue, Keyframe};
pub use mixer::AnimationMixer;
pub use skeleton::{RestTransform, Skeleton, SkeletonNode};
