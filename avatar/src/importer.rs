use std::collections::HashMap;

use cgmath::{vec2, vec3, Matrix4, Quaternion, Vector3, Vector4};
use collision::Aabb3;
use engine::assets_log;
use engine::scene::{VertexPositionNormalUv, VertexSkinned};
use engine::texture::{PixelFormat, RawTextureData};

use crate::error::AvatarError;
use crate::motion::skeleton::{NodeDesc, RestTransform};
use crate::motion::{AnimationClip, Channel, ChannelProperty, ChannelValue, Keyframe, Skeleton};

/// CPU-side result of parsing a GLB file. Produced on the loader thread;
/// GPU upload happens later on the context thread.
pub struct AvatarContents {
    pub meshes: Vec<MeshData>,
    pub images: Vec<RawTextureData>,
    pub bounding_box: Aabb3<f32>,
    pub skeleton: Option<Skeleton>,
    pub clips: Vec<AnimationClip>,
}

pub struct MeshData {
    pub vertices: VertexData,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    pub texture_index: Option<usize>,
}

pub enum VertexData {
    Static(Vec<VertexPositionNormalUv>),
    Skinned(Vec<VertexSkinned>),
}

impl VertexData {
    pub fn len(&self) -> usize {
        match self {
            VertexData::Static(v) => v.len(),
            VertexData::Skinned(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a self-contained GLB. External buffer or image references are
/// rejected: the viewer never fetches secondary resources.
pub fn parse_glb(bytes: &[u8]) -> Result<AvatarContents, AvatarError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let document = gltf.document;
    let blob = gltf.blob;

    let mut buffers: Vec<Vec<u8>> = Vec::new();
    for buffer in document.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => match blob.as_ref() {
                Some(data) => buffers.push(data.clone()),
                None => {
                    return Err(AvatarError::Unsupported(
                        "GLB is missing its binary payload".to_string(),
                    ))
                }
            },
            gltf::buffer::Source::Uri(uri) => {
                return Err(AvatarError::Unsupported(format!(
                    "external buffer reference: {}",
                    uri
                )))
            }
        }
    }

    let images = decode_images(&document, &buffers)?;
    let (meshes, bounding_box) = extract_meshes(&document, &buffers)?;
    let skeleton = extract_skeleton(&document, &buffers);
    let clips = extract_clips(&document, &buffers);

    assets_log!(
        info,
        "parsed GLB: {} meshes, {} images, {} clips, skeleton: {}",
        meshes.len(),
        images.len(),
        clips.len(),
        skeleton.is_some()
    );

    Ok(AvatarContents {
        meshes,
        images,
        bounding_box,
        skeleton,
        clips,
    })
}

fn decode_images(
    document: &gltf::Document,
    buffers: &[Vec<u8>],
) -> Result<Vec<RawTextureData>, AvatarError> {
    let mut images = Vec::new();

    for image in document.images() {
        match image.source() {
            gltf::image::Source::View { view, .. } => {
                let buffer = buffers.get(view.buffer().index()).ok_or_else(|| {
                    AvatarError::Unsupported("image view references missing buffer".to_string())
                })?;
                let start = view.offset();
                let end = start + view.length();
                if end > buffer.len() {
                    return Err(AvatarError::Unsupported(
                        "image view exceeds buffer length".to_string(),
                    ));
                }

                match image::load_from_memory(&buffer[start..end]) {
                    Ok(decoded) => {
                        let rgba = decoded.to_rgba8();
                        let (width, height) = (rgba.width(), rgba.height());
                        images.push(RawTextureData {
                            bytes: rgba.into_raw(),
                            width,
                            height,
                            format: PixelFormat::RGBA,
                        });
                    }
                    Err(err) => {
                        assets_log!(
                            warn,
                            "could not decode embedded image: {}, using checkerboard",
                            err
                        );
                        images.push(checkerboard_image());
                    }
                }
            }
            gltf::image::Source::Uri { uri, .. } => {
                return Err(AvatarError::Unsupported(format!(
                    "external image reference: {}",
                    uri
                )))
            }
        }
    }

    Ok(images)
}

/// 4x4 magenta/black checkerboard standing in for an undecodable texture.
fn checkerboard_image() -> RawTextureData {
    let (width, height) = (4usize, 4usize);
    let mut pixels = Vec::with_capacity(width * height * 4);

    for y in 0..height {
        for x in 0..width {
            if (x + y) % 2 == 0 {
                pixels.extend_from_slice(&[255, 0, 255, 255]);
            } else {
                pixels.extend_from_slice(&[0, 0, 0, 255]);
            }
        }
    }

    RawTextureData {
        bytes: pixels,
        width: width as u32,
        height: height as u32,
        format: PixelFormat::RGBA,
    }
}

fn extract_meshes(
    document: &gltf::Document,
    buffers: &[Vec<u8>],
) -> Result<(Vec<MeshData>, Aabb3<f32>), AvatarError> {
    let mut meshes = Vec::new();
    let mut min_bounds = vec3(f32::MAX, f32::MAX, f32::MAX);
    let mut max_bounds = vec3(f32::MIN, f32::MIN, f32::MIN);

    for scene in document.scenes() {
        for node in scene.nodes() {
            process_node(
                &node,
                buffers,
                Matrix4::from_scale(1.0),
                &mut meshes,
                &mut min_bounds,
                &mut max_bounds,
            );
        }
    }

    if meshes.is_empty() {
        return Err(AvatarError::Unsupported(
            "GLB contains no renderable mesh data".to_string(),
        ));
    }

    let bounding_box = Aabb3::new(
        cgmath::Point3::new(min_bounds.x, min_bounds.y, min_bounds.z),
        cgmath::Point3::new(max_bounds.x, max_bounds.y, max_bounds.z),
    );

    Ok((meshes, bounding_box))
}

fn process_node(
    node: &gltf::Node,
    buffers: &[Vec<u8>],
    parent_transform: Matrix4<f32>,
    meshes: &mut Vec<MeshData>,
    min_bounds: &mut Vector3<f32>,
    max_bounds: &mut Vector3<f32>,
) {
    let world = parent_transform * Matrix4::from(node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if let Some(data) = process_primitive(&primitive, buffers, &world, min_bounds, max_bounds)
            {
                meshes.push(data);
            }
        }
    }

    for child in node.children() {
        process_node(&child, buffers, world, meshes, min_bounds, max_bounds);
    }
}

fn process_primitive(
    primitive: &gltf::Primitive,
    buffers: &[Vec<u8>],
    world: &Matrix4<f32>,
    min_bounds: &mut Vector3<f32>,
    max_bounds: &mut Vector3<f32>,
) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|v| v.as_slice()));

    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();

    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|iter| iter.collect())
        .unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; positions.len()]);

    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|coords| coords.into_f32().collect())
        .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);

    let indices: Vec<u32> = reader
        .read_indices()
        .map(|iter| iter.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    let joints: Option<Vec<[u16; 4]>> = reader
        .read_joints(0)
        .map(|iter| iter.into_u16().collect());
    let weights: Option<Vec<[f32; 4]>> = reader
        .read_weights(0)
        .map(|iter| iter.into_f32().collect());

    let vertices = match (joints, weights) {
        (Some(joints), Some(weights)) => {
            // Skinned vertices stay in bind space; joint matrices own their
            // placement, the node's own transform is ignored per glTF.
            let mut skinned = Vec::with_capacity(positions.len());
            for (i, pos) in positions.iter().enumerate() {
                let norm = normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]);
                let uv = uvs.get(i).copied().unwrap_or([0.0, 0.0]);
                let joint_set = joints.get(i).copied().unwrap_or([0; 4]);
                let weight_set = weights.get(i).copied().unwrap_or([1.0, 0.0, 0.0, 0.0]);

                track_bounds(min_bounds, max_bounds, vec3(pos[0], pos[1], pos[2]));

                skinned.push(VertexSkinned {
                    position: vec3(pos[0], pos[1], pos[2]),
                    normal: vec3(norm[0], norm[1], norm[2]),
                    uv: vec2(uv[0], uv[1]),
                    joints: [
                        joint_set[0] as i32,
                        joint_set[1] as i32,
                        joint_set[2] as i32,
                        joint_set[3] as i32,
                    ],
                    weights: normalize_weights(weight_set),
                });
            }
            VertexData::Skinned(skinned)
        }
        _ => {
            let mut flat = Vec::with_capacity(positions.len());
            for (i, pos) in positions.iter().enumerate() {
                let norm = normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]);
                let uv = uvs.get(i).copied().unwrap_or([0.0, 0.0]);

                let world_pos = world * Vector4::new(pos[0], pos[1], pos[2], 1.0);
                let world_norm = world * Vector4::new(norm[0], norm[1], norm[2], 0.0);
                let position = vec3(world_pos.x, world_pos.y, world_pos.z);

                track_bounds(min_bounds, max_bounds, position);

                flat.push(VertexPositionNormalUv {
                    position,
                    normal: vec3(world_norm.x, world_norm.y, world_norm.z),
                    uv: vec2(uv[0], uv[1]),
                });
            }
            VertexData::Static(flat)
        }
    };

    if vertices.is_empty() {
        return None;
    }

    let (base_color, texture_index) = extract_base_color_and_texture(&primitive.material());

    Some(MeshData {
        vertices,
        indices,
        base_color,
        texture_index,
    })
}

fn track_bounds(min_bounds: &mut Vector3<f32>, max_bounds: &mut Vector3<f32>, p: Vector3<f32>) {
    min_bounds.x = min_bounds.x.min(p.x);
    min_bounds.y = min_bounds.y.min(p.y);
    min_bounds.z = min_bounds.z.min(p.z);
    max_bounds.x = max_bounds.x.max(p.x);
    max_bounds.y = max_bounds.y.max(p.y);
    max_bounds.z = max_bounds.z.max(p.z);
}

fn normalize_weights(weights: [f32; 4]) -> [f32; 4] {
    let sum = weights.iter().sum::<f32>();
    if sum > 0.0 {
        [
            weights[0] / sum,
            weights[1] / sum,
            weights[2] / sum,
            weights[3] / sum,
        ]
    } else {
        [1.0, 0.0, 0.0, 0.0]
    }
}

fn extract_base_color_and_texture(material: &gltf::Material) -> ([f32; 4], Option<usize>) {
    if let Some(spec_gloss) = material.pbr_specular_glossiness() {
        let diffuse_factor = spec_gloss.diffuse_factor();
        let texture_index = spec_gloss
            .diffuse_texture()
            .map(|info| info.texture().source().index());
        return (diffuse_factor, texture_index);
    }

    let pbr = material.pbr_metallic_roughness();
    let texture_index = pbr
        .base_color_texture()
        .map(|info| info.texture().source().index());
    (pbr.base_color_factor(), texture_index)
}

fn extract_skeleton(document: &gltf::Document, buffers: &[Vec<u8>]) -> Option<Skeleton> {
    let skin = document.skins().next()?;

    let joints: Vec<usize> = skin.joints().map(|joint| joint.index()).collect();
    if joints.is_empty() {
        return None;
    }

    let reader = skin.reader(|buffer| buffers.get(buffer.index()).map(|v| v.as_slice()));
    let inverse_bind: Vec<Matrix4<f32>> = reader
        .read_inverse_bind_matrices()
        .map(|iter| iter.map(Matrix4::from).collect())
        .unwrap_or_default();

    // Animations may target non-joint ancestors, so the skeleton carries
    // every node in the document.
    let mut parent_of: HashMap<usize, usize> = HashMap::new();
    for node in document.nodes() {
        for child in node.children() {
            parent_of.insert(child.index(), node.index());
        }
    }

    let descs: Vec<NodeDesc> = document
        .nodes()
        .map(|node| {
            let (translation, rotation, scale) = node.transform().decomposed();
            NodeDesc {
                index: node.index(),
                parent: parent_of.get(&node.index()).copied(),
                name: node.name().map(str::to_owned),
                rest: RestTransform {
                    translation: vec3(translation[0], translation[1], translation[2]),
                    // glTF quaternions are [x, y, z, w], cgmath is w-first
                    rotation: Quaternion::new(rotation[3], rotation[0], rotation[1], rotation[2]),
                    scale: vec3(scale[0], scale[1], scale[2]),
                },
            }
        })
        .collect();

    Some(Skeleton::new(descs, joints, inverse_bind))
}

fn extract_clips(document: &gltf::Document, buffers: &[Vec<u8>]) -> Vec<AnimationClip> {
    let mut clips = Vec::new();

    for (index, animation) in document.animations().enumerate() {
        let name = animation
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("clip-{}", index));
        let mut clip = AnimationClip::new(name);

        for channel in animation.channels() {
            let target = channel.target();

            let property = match target.property() {
                gltf::animation::Property::Translation => ChannelProperty::Translation,
                gltf::animation::Property::Rotation => ChannelProperty::Rotation,
                gltf::animation::Property::Scale => ChannelProperty::Scale,
                gltf::animation::Property::MorphTargetWeights => {
                    assets_log!(warn, "skipping morph target channel (not supported)");
                    continue;
                }
            };

            let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|v| v.as_slice()));
            let times: Vec<f32> = match reader.read_inputs() {
                Some(inputs) => inputs.collect(),
                None => continue,
            };
            let outputs = match reader.read_outputs() {
                Some(outputs) => outputs,
                None => continue,
            };

            let mut out = Channel::new(target.node().index(), property);

            match outputs {
                gltf::animation::util::ReadOutputs::Translations(translations) => {
                    for (i, value) in translations.enumerate() {
                        if let Some(&time) = times.get(i) {
                            out.add_keyframe(Keyframe {
                                time,
                                value: ChannelValue::Translation(vec3(
                                    value[0], value[1], value[2],
                                )),
                            });
                        }
                    }
                }
                gltf::animation::util::ReadOutputs::Rotations(rotations) => {
                    for (i, value) in rotations.into_f32().enumerate() {
                        if let Some(&time) = times.get(i) {
                            out.add_keyframe(Keyframe {
                                time,
                                value: ChannelValue::Rotation(Quaternion::new(
                                    value[3], value[0], value[1], value[2],
                                )),
                            });
                        }
                    }
                }
                gltf::animation::util::ReadOutputs::Scales(scales) => {
                    for (i, value) in scales.enumerate() {
                        if let Some(&time) = times.get(i) {
                            out.add_keyframe(Keyframe {
                                time,
                                value: ChannelValue::Scale(vec3(value[0], value[1], value[2])),
                            });
                        }
                    }
                }
                gltf::animation::util::ReadOutputs::MorphTargetWeights(_) => continue,
            }

            clip.add_channel(out);
        }

        if clip.channels.is_empty() {
            assets_log!(warn, "skipping empty animation clip '{}'", clip.name);
            continue;
        }
        clips.push(clip);
    }

    clips
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal GLB container holding only a JSON chunk, padded to 4 bytes
    /// as the container format requires.
    fn glb_from_json(json: &str) -> Vec<u8> {
        let mut json_bytes = json.as_bytes().to_vec();
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(b' ');
        }

        let total = 12 + 8 + json_bytes.len();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(b"JSON");
        out.extend_from_slice(&json_bytes);
        out
    }

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let result = parse_glb(b"definitely not a glb file");
        assert!(matches!(result, Err(AvatarError::Parse(_))));
    }

    #[test]
    fn test_glb_without_meshes_is_unsupported() {
        let glb = glb_from_json(r#"{"asset":{"version":"2.0"},"scenes":[{"nodes":[]}],"scene":0}"#);
        let result = parse_glb(&glb);
        assert!(matches!(result, Err(AvatarError::Unsupported(_))));
    }

    #[test]
    fn test_external_buffer_reference_is_rejected() {
        let glb = glb_from_json(
            r#"{"asset":{"version":"2.0"},"buffers":[{"uri":"external.bin","byteLength":4}]}"#,
        );
        let result = parse_glb(&glb);
        match result {
            Err(AvatarError::Unsupported(message)) => {
                assert!(message.contains("external buffer"));
            }
            other => panic!("expected unsupported error, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn test_normalize_weights_handles_zero_sum() {
        assert_eq!(normalize_weights([0.0; 4]), [1.0, 0.0, 0.0, 0.0]);

        let normalized = normalize_weights([2.0, 2.0, 0.0, 0.0]);
        assert!((normalized[0] - 0.5).abs() < 1e-6);
        assert!((normalized[1] - 0.5).abs() < 1e-6);
    }
}
