extern crate gl;
use gl::types::*;
use std::ffi::CString;
use std::ptr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderType {
    Vertex,
    Fragment,
}

pub struct Shader {
    pub gl_id: GLuint,
}

/// Compile a shader stage. Sources are written without a #version header so
/// the matching profile line can be prepended for desktop core vs GLES here.
///
/// Compilation failures abort: a broken built-in shader is a programming
/// error, not a runtime condition.
pub fn build(source: &str, shader_type: ShaderType, is_opengl_es: bool) -> Shader {
    let header = if is_opengl_es {
        "#version 300 es\nprecision highp float;\n"
    } else {
        "#version 330 core\n"
    };

    let full_source = format!("{}{}", header, source);

    let gl_type = match shader_type {
        ShaderType::Vertex => gl::VERTEX_SHADER,
        ShaderType::Fragment => gl::FRAGMENT_SHADER,
    };

    unsafe {
        let shader = gl::CreateShader(gl_type);
        let c_source = CString::new(full_source.as_bytes()).unwrap();
        gl::ShaderSource(shader, 1, &c_source.as_ptr(), ptr::null());
        gl::CompileShader(shader);

        let mut success = gl::FALSE as GLint;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        if success != gl::TRUE as GLint {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut info_log = vec![0u8; len.max(1) as usize];
            gl::GetShaderInfoLog(
                shader,
                len,
                ptr::null_mut(),
                info_log.as_mut_ptr() as *mut GLchar,
            );
            let message = String::from_utf8_lossy(&info_log);
            panic!("{:?} shader failed to compile: {}", shader_type, message);
        }

        Shader { gl_id: shader }
    }
}
