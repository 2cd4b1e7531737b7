use std::ffi::CStr;
use std::fmt;

use engine::viewer_log;

/// Why 3D rendering is unavailable on this machine.
#[derive(Debug)]
pub struct CapabilityError {
    pub reason: String,
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for CapabilityError {}

pub struct RenderingSupport {
    pub version: String,
}

/// Try to create an invisible core-profile context and load the GL symbols.
/// Pure probe: the window is dropped before returning either way. On Err
/// the caller must not bootstrap anything.
pub fn probe_rendering_support(glfw: &mut glfw::Glfw) -> Result<RenderingSupport, CapabilityError> {
    glfw.window_hint(glfw::WindowHint::Visible(false));
    glfw.window_hint(glfw::WindowHint::ContextVersion(4, 1));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
        glfw::OpenGlProfileHint::Core,
    ));
    #[cfg(target_os = "macos")]
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

    let (mut window, _events) = match glfw.create_window(
        64,
        64,
        "capability probe",
        glfw::WindowMode::Windowed,
    ) {
        Some(pair) => pair,
        None => {
            return Err(CapabilityError {
                reason: "could not create an OpenGL 4.1 core profile context".to_string(),
            })
        }
    };

    use glfw::Context;
    window.make_current();
    gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

    let version = unsafe {
        let raw = gl::GetString(gl::VERSION);
        if raw.is_null() {
            return Err(CapabilityError {
                reason: "context created but the driver reports no GL version".to_string(),
            });
        }
        CStr::from_ptr(raw as *const _).to_string_lossy().into_owned()
    };

    viewer_log!(debug, "capability probe passed: {}", version);
    Ok(RenderingSupport { version })
}

/// Static explanation shown in place of the viewer when the probe fails.
pub fn unsupported_message(error: &CapabilityError) -> String {
    format!(
        "3D rendering is not supported on this system.\n\
         \n\
         {}.\n\
         \n\
         The avatar viewer needs a GPU and driver capable of OpenGL 4.1\n\
         (core profile). Please update your graphics drivers or try a\n\
         different machine.",
        error.reason
    )
}
