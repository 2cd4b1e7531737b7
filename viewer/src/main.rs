extern crate glfw;

mod camera;
mod capability;
mod status;

use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use avatar::{AvatarLoader, AvatarNode, DEFAULT_TARGET_HEIGHT};
use camera::OrbitCamera;
use cgmath::{point3, vec2, Deg};
use clap::Parser;
use engine::scene::{LightRig, Scene};
use engine::viewer_log;
use engine::{EngineRenderContext, FrameClock};
use glfw::{Action, Context, GlfwReceiver, Key, MouseButton, WindowEvent};
use status::StatusLine;

extern crate gl;

const SCR_WIDTH: u32 = 1280;
const SCR_HEIGHT: u32 = 720;

const CAMERA_FOV_DEG: f32 = 45.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

// How long to block for events per iteration while the window is hidden
const SUSPENDED_WAIT_SECS: f64 = 0.25;

#[derive(Parser, Debug)]
#[command(author, version, about = "GLB avatar viewer", long_about = None)]
struct Cli {
    /// Avatar model to display (.glb)
    #[arg(default_value = "avatar.glb")]
    model: String,

    /// Height the avatar is scaled to, in scene units
    #[arg(long, default_value_t = DEFAULT_TARGET_HEIGHT)]
    target_height: f32,
}

struct InputState {
    rotating: bool,
    last_cursor: Option<(f64, f64)>,
    last_click: Option<Instant>,
}

struct EventOutcome {
    restored: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    engine::logging::init_logging("AVATAR_VIEWER_LOG");

    let mut glfw = glfw::init(glfw::fail_on_errors)?;

    // Hard precondition; nothing else runs when this fails
    let support = match capability::probe_rendering_support(&mut glfw) {
        Ok(support) => support,
        Err(err) => {
            eprintln!("{}", capability::unsupported_message(&err));
            std::process::exit(1);
        }
    };
    viewer_log!(info, "rendering supported: {}", support.version);

    // Scene bootstrap: window, GL, camera, lights
    glfw.default_window_hints();
    glfw.window_hint(glfw::WindowHint::ContextVersion(4, 1));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
        glfw::OpenGlProfileHint::Core,
    ));
    #[cfg(target_os = "macos")]
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

    let (mut window, events) = glfw
        .create_window(
            SCR_WIDTH,
            SCR_HEIGHT,
            "Avatar Viewer",
            glfw::WindowMode::Windowed,
        )
        .ok_or("failed to create the viewer window")?;

    window.make_current();
    window.set_key_polling(true);
    window.set_cursor_pos_polling(true);
    window.set_mouse_button_polling(true);
    window.set_scroll_polling(true);
    window.set_framebuffer_size_polling(true);
    window.set_iconify_polling(true);

    gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

    let engine = engine::opengl();
    let lights = LightRig::avatar_studio();
    let mut camera = OrbitCamera::new(point3(1.8, 0.5, 0.2), point3(0.0, 0.1, 0.0));
    let mut clock = FrameClock::new();
    let mut status = StatusLine::new();
    let mut screen_size = window.get_framebuffer_size();

    // The one avatar load of this session
    let mut loader = Some(AvatarLoader::spawn(PathBuf::from(&cli.model)));
    let mut avatar_node: Option<AvatarNode> = None;

    let mut input = InputState {
        rotating: false,
        last_cursor: None,
        last_click: None,
    };
    let mut suspended = false;

    window.set_title(&status.title());

    while !window.should_close() {
        if suspended {
            // No frames while hidden: block for events instead of spinning
            glfw.wait_events_timeout(SUSPENDED_WAIT_SECS);
        } else {
            glfw.poll_events();
        }

        let outcome = process_events(
            &mut window,
            &events,
            &mut camera,
            &mut input,
            &mut suspended,
            &mut screen_size,
        );

        if suspended {
            continue;
        }
        if outcome.restored {
            // The first resumed delta measures from the restore point; the
            // hidden interval never reaches animation state
            clock.rebaseline();
            viewer_log!(debug, "window restored, resuming frame loop");
        }

        let delta = clock.tick();
        let delta_secs = delta.as_secs_f32();
        let elapsed_secs = clock.elapsed_secs();

        // Resolve the load once the worker reports in (also the first
        // visible frame after a restore, if it finished while hidden)
        if let Some(active) = loader.as_mut() {
            if let Some(percent) = active.poll_progress() {
                status.set_progress(percent);
            }
            if let Some(result) = active.try_result() {
                let resolution = avatar::resolve(result, cli.target_height);
                if let Some(error) = &resolution.error {
                    viewer_log!(warn, "substituted fallback avatar: {}", error);
                    status.show_error("Failed to load avatar. Using fallback model.".to_string());
                }
                status.finish_loading();
                avatar_node = Some(resolution.node);
                loader = None;
            }
        }

        if let Some(node) = avatar_node.as_mut() {
            node.advance(delta_secs, elapsed_secs);
        }

        // Camera damping runs every frame regardless of avatar state
        camera.update();

        status.tick();
        if status.take_dirty() {
            window.set_title(&status.title());
        }

        let aspect = screen_size.0 as f32 / screen_size.1.max(1) as f32;
        let render_context = EngineRenderContext {
            time: elapsed_secs,
            view_matrix: camera.view_matrix(),
            projection_matrix: cgmath::perspective(
                Deg(CAMERA_FOV_DEG),
                aspect,
                CAMERA_NEAR,
                CAMERA_FAR,
            ),
            screen_size: vec2(screen_size.0 as f32, screen_size.1 as f32),
        };

        let objects = avatar_node
            .as_ref()
            .map(|node| node.scene_objects())
            .unwrap_or_default();
        let scene = Scene::with_lights(objects, lights.clone());
        engine.render(&render_context, &scene);

        window.swap_buffers();
    }

    Ok(())
}

fn process_events(
    window: &mut glfw::Window,
    events: &GlfwReceiver<(f64, WindowEvent)>,
    camera: &mut OrbitCamera,
    input: &mut InputState,
    suspended: &mut bool,
    screen_size: &mut (i32, i32),
) -> EventOutcome {
    let mut outcome = EventOutcome { restored: false };

    for (_, event) in glfw::flush_messages(events) {
        match event {
            WindowEvent::FramebufferSize(width, height) => {
                *screen_size = (width, height);
                unsafe { gl::Viewport(0, 0, width, height) };
            }
            WindowEvent::Key(Key::Escape, _, Action::Press, _) => window.set_should_close(true),
            WindowEvent::Iconify(iconified) => {
                if iconified {
                    *suspended = true;
                    viewer_log!(debug, "window hidden, suspending frame loop");
                } else if *suspended {
                    *suspended = false;
                    outcome.restored = true;
                }
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                input.rotating = true;
                input.last_cursor = None;

                let now = Instant::now();
                if let Some(last) = input.last_click {
                    if now.duration_since(last) <= DOUBLE_CLICK_WINDOW {
                        camera.reset();
                    }
                }
                input.last_click = Some(now);
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                input.rotating = false;
                input.last_cursor = None;
            }
            WindowEvent::CursorPos(x, y) => {
                if input.rotating {
                    if let Some((last_x, last_y)) = input.last_cursor {
                        camera.rotate((x - last_x) as f32, (y - last_y) as f32);
                    }
                    input.last_cursor = Some((x, y));
                }
            }
            WindowEvent::Scroll(_, y) => camera.zoom(y as f32),
            _ => {}
        }
    }

    outcome
}
