use std::rc::Rc;

use cgmath::vec3;
use engine::assets_log;
use engine::scene::{basic_material, color_material, indexed_mesh, skinned_material, SceneObject};
use engine::texture::{self, RawTextureData, TextureOptions, TextureTrait};

use crate::importer::{AvatarContents, MeshData, VertexData};

/// Upload parsed contents to the GPU, producing one SceneObject per mesh.
/// Must run on the thread that owns the GL context.
pub fn upload_contents(contents: &AvatarContents) -> Vec<SceneObject> {
    let mut texture_cache = TextureCache::new(&contents.images);
    let mut objects = Vec::with_capacity(contents.meshes.len());

    for mesh in &contents.meshes {
        objects.push(upload_mesh(mesh, &mut texture_cache));
    }

    objects
}

fn upload_mesh(mesh: &MeshData, textures: &mut TextureCache) -> SceneObject {
    match &mesh.vertices {
        VertexData::Static(vertices) => {
            let geometry = Rc::new(indexed_mesh::create(vertices, &mesh.indices));
            let material = match mesh.texture_index.and_then(|i| textures.get(i)) {
                Some(tex) => basic_material::create(tex, mesh.base_color),
                None => color_material::create(vec3(
                    mesh.base_color[0],
                    mesh.base_color[1],
                    mesh.base_color[2],
                )),
            };
            SceneObject::new(material, geometry)
        }
        VertexData::Skinned(vertices) => {
            let geometry = Rc::new(indexed_mesh::create(vertices, &mesh.indices));
            // The skinned shader always samples a texture; fall back to a
            // 1x1 solid of the base color.
            let tex = mesh
                .texture_index
                .and_then(|i| textures.get(i))
                .unwrap_or_else(|| {
                    Rc::new(texture::solid_color(mesh.base_color)) as Rc<dyn TextureTrait>
                });
            SceneObject::new(skinned_material::create(tex, mesh.base_color), geometry)
        }
    }
}

/// Lazily uploads decoded images, sharing one GL texture per image index.
struct TextureCache<'a> {
    images: &'a [RawTextureData],
    uploaded: Vec<Option<Rc<dyn TextureTrait>>>,
}

impl<'a> TextureCache<'a> {
    fn new(images: &'a [RawTextureData]) -> Self {
        TextureCache {
            images,
            uploaded: vec![None; images.len()],
        }
    }

    fn get(&mut self, index: usize) -> Option<Rc<dyn TextureTrait>> {
        if index >= self.images.len() {
            assets_log!(
                warn,
                "texture index {} out of range ({} images), using base color",
                index,
                self.images.len()
            );
            return None;
        }

        if self.uploaded[index].is_none() {
            let image = &self.images[index];
            let uploaded = texture::init_from_memory(
                RawTextureData {
                    bytes: image.bytes.clone(),
                    width: image.width,
                    height: image.height,
                    format: image.format,
                },
                &TextureOptions::default(),
            );
            self.uploaded[index] = Some(Rc::new(uploaded));
        }

        self.uploaded[index].clone()
    }
}
