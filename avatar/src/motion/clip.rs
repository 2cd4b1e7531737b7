use cgmath::{Quaternion, Vector3};

/// A complete authored animation from a GLB file, kept as keyframe channels
/// and sampled continuously at playback time.
#[derive(Clone, Debug)]
pub struct AnimationClip {
    pub name: String,
    pub channels: Vec<Channel>,
    pub duration: f32,
}

/// One channel animates one property of one node.
#[derive(Clone, Debug)]
pub struct Channel {
    pub target_node: usize,
    pub property: ChannelProperty,
    pub keyframes: Vec<Keyframe>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelProperty {
    Translation,
    Rotation,
    Scale,
}

#[derive(Clone, Debug)]
pub struct Keyframe {
    pub time: f32,
    pub value: ChannelValue,
}

#[derive(Clone, Debug)]
pub enum ChannelValue {
    Translation(Vector3<f32>),
    Rotation(Quaternion<f32>),
    Scale(Vector3<f32>),
}

impl AnimationClip {
    pub fn new(name: String) -> Self {
        Self {
            name,
            channels: Vec::new(),
            duration: 0.0,
        }
    }

    /// Add a channel, extending the clip duration to cover its last
    /// keyframe.
    pub fn add_channel(&mut self, channel: Channel) {
        if let Some(last) = channel.keyframes.last() {
            self.duration = self.duration.max(last.time);
        }
        self.channels.push(channel);
    }

    /// Sample the translation/rotation/scale channels targeting `node_index`
    /// at `time`. Missing components come back as None and fall back to the
    /// node's rest transform at the call site.
    pub fn sample_node(
        &self,
        node_index: usize,
        time: f32,
    ) -> (
        Option<Vector3<f32>>,
        Option<Quaternion<f32>>,
        Option<Vector3<f32>>,
    ) {
        let mut translation = None;
        let mut rotation = None;
        let mut scale = None;

        for channel in self.channels.iter().filter(|c| c.target_node == node_index) {
            match (channel.property, channel.sample(time)) {
                (ChannelProperty::Translation, Some(ChannelValue::Translation(v))) => {
                    translation = Some(v)
                }
                (ChannelProperty::Rotation, Some(ChannelValue::Rotation(q))) => rotation = Some(q),
                (ChannelProperty::Scale, Some(ChannelValue::Scale(v))) => scale = Some(v),
                _ => {}
            }
        }

        (translation, rotation, scale)
    }

    pub fn animated_nodes(&self) -> Vec<usize> {
        let mut nodes: Vec<usize> = self.channels.iter().map(|c| c.target_node).collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }
}

impl Channel {
    pub fn new(target_node: usize, property: ChannelProperty) -> Self {
        Self {
            target_node,
            property,
            keyframes: Vec::new(),
        }
    }

    pub fn add_keyframe(&mut self, keyframe: Keyframe) {
        self.keyframes.push(keyframe);
    }

    /// Value at `time` with linear interpolation (slerp for rotations).
    /// Clamps to the first/last keyframe outside the keyed range.
    pub fn sample(&self, time: f32) -> Option<ChannelValue> {
        if self.keyframes.is_empty() {
            return None;
        }

        // Index of the first keyframe at or after `time`
        let after = self.keyframes.partition_point(|k| k.time < time);

        if after == 0 {
            return Some(self.keyframes[0].value.clone());
        }
        if after == self.keyframes.len() {
            return Some(self.keyframes[after - 1].value.clone());
        }

        let before_frame = &self.keyframes[after - 1];
        let after_frame = &self.keyframes[after];

        let span = after_frame.time - before_frame.time;
        if span <= f32::EPSILON {
            return Some(after_frame.value.clone());
        }

        let t = (time - before_frame.time) / span;
        Some(interpolate_values(&before_frame.value, &after_frame.value, t))
    }
}

fn interpolate_values(a: &ChannelValue, b: &ChannelValue, t: f32) -> ChannelValue {
    use ChannelValue::*;

    match (a, b) {
        (Translation(a), Translation(b)) => Translation(a + (b - a) * t),
        (Rotation(a), Rotation(b)) => Rotation(a.slerp(*b, t)),
        (Scale(a), Scale(b)) => Scale(a + (b - a) * t),
        // Mismatched types - return the first value
        _ => a.clone(),
    }
}
