extern crate gl;
use gl::types::*;
use std::mem;
use std::os::raw::c_void;

use super::{Geometry, Vertex, VertexAttributeType};

pub struct IndexedMesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: GLuint,
    index_count: i32,
}

/// Upload an indexed triangle list. Empty input produces a mesh whose draw
/// is a no-op rather than an out-of-bounds buffer read.
pub fn create<T: Vertex>(vertices: &[T], indices: &[u32]) -> IndexedMesh {
    let index_count = indices.len() as i32;

    let (mut vao, mut vbo, mut ebo) = (0, 0, 0);
    unsafe {
        gl::GenVertexArrays(1, &mut vao);
        gl::GenBuffers(1, &mut vbo);
        gl::GenBuffers(1, &mut ebo);

        gl::BindVertexArray(vao);

        gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
        if !vertices.is_empty() {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (vertices.len() * mem::size_of::<T>()) as GLsizeiptr,
                vertices.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }

        gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
        if !indices.is_empty() {
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (indices.len() * mem::size_of::<u32>()) as GLsizeiptr,
                indices.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }

        let stride = T::stride();
        for (location, attr) in T::attributes().iter().enumerate() {
            match attr.attribute_type {
                VertexAttributeType::Float => {
                    gl::VertexAttribPointer(
                        location as GLuint,
                        attr.size,
                        gl::FLOAT,
                        gl::FALSE,
                        stride,
                        attr.offset as *const c_void,
                    );
                }
                VertexAttributeType::Int => {
                    gl::VertexAttribIPointer(
                        location as GLuint,
                        attr.size,
                        gl::INT,
                        stride,
                        attr.offset as *const c_void,
                    );
                }
            }
            gl::EnableVertexAttribArray(location as GLuint);
        }

        gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        gl::BindVertexArray(0);
        // The EBO binding is captured by the VAO; do not unbind it here.
    }

    IndexedMesh {
        vao,
        vbo,
        ebo,
        index_count,
    }
}

impl Geometry for IndexedMesh {
    fn draw(&self) {
        if self.index_count == 0 {
            return;
        }
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(
                gl::TRIANGLES,
                self.index_count,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            );
        }
    }
}

impl Drop for IndexedMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteBuffers(1, &self.ebo);
        }
    }
}
