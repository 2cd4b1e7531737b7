extern crate gl;
use gl::types::*;
use std::ptr;

use crate::shader::Shader;

pub struct ShaderProgram {
    pub gl_id: GLuint,
}

/// Link a vertex/fragment pair into a program. The individual shader objects
/// are deleted after linking; only the program id is kept.
///
/// # Safety
/// Requires a current GL context on the calling thread.
pub unsafe fn link(vertex_shader: &Shader, fragment_shader: &Shader) -> ShaderProgram {
    let program = gl::CreateProgram();
    gl::AttachShader(program, vertex_shader.gl_id);
    gl::AttachShader(program, fragment_shader.gl_id);
    gl::LinkProgram(program);

    let mut success = gl::FALSE as GLint;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
    if success != gl::TRUE as GLint {
        let mut len = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut info_log = vec![0u8; len.max(1) as usize];
        gl::GetProgramInfoLog(
            program,
            len,
            ptr::null_mut(),
            info_log.as_mut_ptr() as *mut GLchar,
        );
        let message = String::from_utf8_lossy(&info_log);
        panic!("shader program failed to link: {}", message);
    }

    gl::DeleteShader(vertex_shader.gl_id);
    gl::DeleteShader(fragment_shader.gl_id);

    ShaderProgram { gl_id: program }
}
