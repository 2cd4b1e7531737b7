use std::collections::HashMap;

use cgmath::prelude::*;
use cgmath::{vec3, Matrix4, Quaternion, Vector3};
use engine::motion_log;
use engine::scene::MAX_JOINTS;

/// Decomposed rest transform of a node, used whenever an animation does not
/// key one of the components.
#[derive(Clone, Copy, Debug)]
pub struct RestTransform {
    pub translation: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl RestTransform {
    pub fn identity() -> Self {
        RestTransform {
            translation: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: vec3(1.0, 1.0, 1.0),
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        compose_trs(self.translation, self.rotation, self.scale)
    }
}

/// T * R * S composition, the glTF node transform order.
pub fn compose_trs(
    translation: Vector3<f32>,
    rotation: Quaternion<f32>,
    scale: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(translation)
        * Matrix4::from(rotation)
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

/// Node hierarchy entry. `parent_slot` points into `Skeleton::nodes` and is
/// always smaller than the node's own slot (topological order).
#[derive(Clone, Debug)]
pub struct SkeletonNode {
    pub node_index: usize,
    pub name: Option<String>,
    pub parent_slot: Option<usize>,
    pub rest: RestTransform,
}

/// Construction input: one entry per glTF node, parents referenced by glTF
/// node index.
#[derive(Clone, Debug)]
pub struct NodeDesc {
    pub index: usize,
    pub parent: Option<usize>,
    pub name: Option<String>,
    pub rest: RestTransform,
}

/// Joint hierarchy extracted from a GLB skin: every scene node (animations
/// may target non-joint ancestors), the joint list, and the inverse bind
/// matrices.
#[derive(Clone, Debug)]
pub struct Skeleton {
    nodes: Vec<SkeletonNode>,
    node_to_slot: HashMap<usize, usize>,
    joints: Vec<usize>,
    inverse_bind: Vec<Matrix4<f32>>,
}

impl Skeleton {
    pub fn new(descs: Vec<NodeDesc>, joints: Vec<usize>, inverse_bind: Vec<Matrix4<f32>>) -> Self {
        let known: HashMap<usize, &NodeDesc> = descs.iter().map(|d| (d.index, d)).collect();

        // Place parents before children so global transforms resolve in one
        // forward pass.
        let mut nodes: Vec<SkeletonNode> = Vec::with_capacity(descs.len());
        let mut node_to_slot: HashMap<usize, usize> = HashMap::with_capacity(descs.len());
        let mut remaining: Vec<&NodeDesc> = descs.iter().collect();

        while !remaining.is_empty() {
            let before = remaining.len();
            remaining.retain(|desc| {
                let parent_slot = match desc.parent {
                    None => None,
                    Some(parent_index) => {
                        if !known.contains_key(&parent_index) {
                            // Parent outside the node set: treat as root
                            None
                        } else {
                            match node_to_slot.get(&parent_index) {
                                Some(slot) => Some(*slot),
                                None => return true, // parent not placed yet
                            }
                        }
                    }
                };

                node_to_slot.insert(desc.index, nodes.len());
                nodes.push(SkeletonNode {
                    node_index: desc.index,
                    name: desc.name.clone(),
                    parent_slot,
                    rest: desc.rest,
                });
                false
            });

            if remaining.len() == before {
                // Cycle in the hierarchy; orphan the rest rather than loop
                motion_log!(
                    warn,
                    "skeleton hierarchy contains a cycle, detaching {} nodes",
                    remaining.len()
                );
                for desc in remaining.drain(..) {
                    node_to_slot.insert(desc.index, nodes.len());
                    nodes.push(SkeletonNode {
                        node_index: desc.index,
                        name: desc.name.clone(),
                        parent_slot: None,
                        rest: desc.rest,
                    });
                }
            }
        }

        Skeleton {
            nodes,
            node_to_slot,
            joints,
            inverse_bind,
        }
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn nodes(&self) -> &[SkeletonNode] {
        &self.nodes
    }

    pub fn slot_for_node(&self, node_index: usize) -> Option<usize> {
        self.node_to_slot.get(&node_index).copied()
    }

    pub fn inverse_bind_matrix(&self, joint_index: usize) -> Matrix4<f32> {
        self.inverse_bind
            .get(joint_index)
            .copied()
            .unwrap_or_else(Matrix4::identity)
    }

    /// Flatten per-slot local transforms into the GPU skinning palette:
    /// global(joint) * inverseBind(joint) per joint, identity elsewhere.
    pub fn compute_palette(&self, local_transforms: &[Matrix4<f32>]) -> [Matrix4<f32>; MAX_JOINTS] {
        let mut globals = vec![Matrix4::identity(); self.nodes.len()];
        for (slot, node) in self.nodes.iter().enumerate() {
            let local = local_transforms
                .get(slot)
                .copied()
                .unwrap_or_else(Matrix4::identity);
            globals[slot] = match node.parent_slot {
                Some(parent) => globals[parent] * local,
                None => local,
            };
        }

        let mut palette = [Matrix4::identity(); MAX_JOINTS];
        for (joint_index, node_index) in self.joints.iter().enumerate().take(MAX_JOINTS) {
            if let Some(slot) = self.slot_for_node(*node_index) {
                palette[joint_index] = globals[slot] * self.inverse_bind_matrix(joint_index);
            }
        }
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(index: usize, parent: Option<usize>) -> NodeDesc {
        NodeDesc {
            index,
            parent,
            name: None,
            rest: RestTransform::identity(),
        }
    }

    #[test]
    fn test_parents_are_placed_before_children() {
        // Deliberately out of order: child listed before its parent
        let skeleton = Skeleton::new(
            vec![desc(2, Some(1)), desc(1, Some(0)), desc(0, None)],
            vec![0, 1, 2],
            vec![Matrix4::identity(); 3],
        );

        for (slot, node) in skeleton.nodes().iter().enumerate() {
            if let Some(parent_slot) = node.parent_slot {
                assert!(parent_slot < slot);
            }
        }
    }

    #[test]
    fn test_palette_composes_parent_chain() {
        let skeleton = Skeleton::new(
            vec![desc(0, None), desc(1, Some(0))],
            vec![0, 1],
            vec![Matrix4::identity(); 2],
        );

        let locals = vec![
            Matrix4::from_translation(vec3(1.0, 0.0, 0.0)),
            Matrix4::from_translation(vec3(0.0, 2.0, 0.0)),
        ];
        let palette = skeleton.compute_palette(&locals);

        // Child global = parent translation + own translation
        assert_eq!(palette[1].w.x, 1.0);
        assert_eq!(palette[1].w.y, 2.0);
    }

    #[test]
    fn test_palette_applies_inverse_bind() {
        let skeleton = Skeleton::new(
            vec![desc(0, None)],
            vec![0],
            vec![Matrix4::from_translation(vec3(-1.0, 0.0, 0.0))],
        );

        let locals = vec![Matrix4::from_translation(vec3(1.0, 0.0, 0.0))];
        let palette = skeleton.compute_palette(&locals);

        // Joint moved back to where it was bound: net zero translation
        assert_eq!(palette[0].w.x, 0.0);
    }

    #[test]
    fn test_unknown_parent_becomes_root() {
        let skeleton = Skeleton::new(vec![desc(5, Some(99))], vec![5], vec![Matrix4::identity()]);
        assert_eq!(skeleton.nodes()[0].parent_slot, None);
    }
}
