extern crate gl;
use gl::types::*;
use std::os::raw::c_void;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    RGB,
    RGBA,
}

/// Decoded pixel data ready for upload. Producers (the GLB importer) decode
/// to this on a worker thread; the upload itself happens on the GL thread.
pub struct RawTextureData {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

pub struct TextureOptions {
    pub wrap: GLenum,
    pub min_filter: GLenum,
    pub mag_filter: GLenum,
}

impl Default for TextureOptions {
    fn default() -> Self {
        TextureOptions {
            wrap: gl::REPEAT,
            min_filter: gl::LINEAR_MIPMAP_LINEAR,
            mag_filter: gl::LINEAR,
        }
    }
}

pub trait TextureTrait {
    fn bind0(&self);
}

pub struct Texture {
    gl_id: GLuint,
}

impl TextureTrait for Texture {
    fn bind0(&self) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, self.gl_id);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.gl_id);
        }
    }
}

pub fn init_from_memory(data: RawTextureData, options: &TextureOptions) -> Texture {
    let gl_format = match data.format {
        PixelFormat::RGB => gl::RGB,
        PixelFormat::RGBA => gl::RGBA,
    };

    let mut gl_id = 0;
    unsafe {
        gl::GenTextures(1, &mut gl_id);
        gl::BindTexture(gl::TEXTURE_2D, gl_id);

        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, options.wrap as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, options.wrap as GLint);
        gl::TexParameteri(
            gl::TEXTURE_2D,
            gl::TEXTURE_MIN_FILTER,
            options.min_filter as GLint,
        );
        gl::TexParameteri(
            gl::TEXTURE_2D,
            gl::TEXTURE_MAG_FILTER,
            options.mag_filter as GLint,
        );

        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl_format as GLint,
            data.width as GLint,
            data.height as GLint,
            0,
            gl_format,
            gl::UNSIGNED_BYTE,
            data.bytes.as_ptr() as *const c_void,
        );
        gl::GenerateMipmap(gl::TEXTURE_2D);
    }

    Texture { gl_id }
}

/// 1x1 texture of a single color, used when a material carries only a base
/// color factor.
pub fn solid_color(rgba: [f32; 4]) -> Texture {
    let clamp = |value: f32| -> u8 { (value.clamp(0.0, 1.0) * 255.0).round() as u8 };

    init_from_memory(
        RawTextureData {
            bytes: vec![clamp(rgba[0]), clamp(rgba[1]), clamp(rgba[2]), clamp(rgba[3])],
            width: 1,
            height: 1,
            format: PixelFormat::RGBA,
        },
        &TextureOptions {
            min_filter: gl::NEAREST,
            mag_filter: gl::NEAREST,
            ..TextureOptions::default()
        },
    )
}
