use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use glam::Vec2;
use log::info;
use pollster::block_on;
use winit::dpi::LogicalSize;
use winit::event::{
    ElementState, Event, KeyboardInput, MouseButton as WinitMouseButton, WindowEvent,
};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;

use workers_study::camera::MOVE_STEP;
use workers_study::{
    bound_action, build_scene, load_surfaces, Action, CameraMode, CameraParams, InputState,
    KeyCode, NamedKey, Renderer, SceneGeometry, SceneState, SurfaceImage,
};

const WINDOW_TITLE: &str = "The Model Worker's Study, 1965";
const WINDOW_SIZE: (f64, f64) = (1200.0, 800.0);
const TICK: Duration = Duration::from_millis(16);

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let scene = build_scene();
    let surfaces = load_surfaces(Path::new("textures"));
    info!(
        "scene built: {} batches, {} textures",
        scene.batch_count(),
        surfaces.len()
    );
    print_controls();

    match run_interactive(&scene, &surfaces) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to a headless scene summary (set DISPLAY or install X11 libs to enable rendering)."
                );
                print_summary(&scene, &surfaces);
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

fn run_interactive(scene: &SceneGeometry, surfaces: &[SurfaceImage]) -> Result<()> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let event_loop = panic::catch_unwind(AssertUnwindSafe(EventLoop::new));
    panic::set_hook(default_hook);
    let mut event_loop =
        event_loop.map_err(|panic| WindowInitError::from_panic("event loop", panic))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1))
            .build(&event_loop)
            .map_err(|err| WindowInitError::from_error("window", err))?,
    );

    let renderer = block_on(Renderer::new(Arc::clone(&window), scene, surfaces))?;

    let mut app = AppState {
        renderer,
        state: SceneState::new(),
        input: InputState::new(),
        last_tick: Instant::now(),
        last_error: None,
    };

    event_loop.run_return(|event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        if let Err(err) = app.process_event(&event, control_flow) {
            app.last_error = Some(err);
            control_flow.set_exit();
        }
    });

    if let Some(err) = app.last_error {
        return Err(err);
    }

    Ok(())
}

struct AppState {
    renderer: Renderer,
    state: SceneState,
    input: InputState,
    last_tick: Instant,
    last_error: Option<anyhow::Error>,
}

impl AppState {
    fn process_event(&mut self, event: &Event<()>, control_flow: &mut ControlFlow) -> Result<()> {
        match event {
            Event::WindowEvent { event, window_id } if *window_id == self.renderer.window_id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        control_flow.set_exit();
                    }
                    WindowEvent::Resized(size) => {
                        self.renderer.resize(*size);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        self.renderer.resize(**new_inner_size);
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        self.handle_keyboard(input, control_flow);
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        self.handle_mouse_button(*state, *button);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let pos = Vec2::new(position.x as f32, position.y as f32);
                        if let Some(delta) = self.input.update_cursor(pos) {
                            if self.state.camera.mode() == CameraMode::FirstPerson {
                                self.state.camera.first_person.look(delta.x, delta.y);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::RedrawRequested(window_id) if *window_id == self.renderer.window_id() => {
                self.compose_frame()?;
            }
            Event::MainEventsCleared => {
                // fixed-rate animation clock layered on the poll loop
                while self.last_tick.elapsed() >= TICK {
                    self.state.tick();
                    self.last_tick += TICK;
                }
                self.renderer.window().request_redraw();
            }
            _ => {}
        }
        Ok(())
    }

    /// Per frame, strictly ordered: update uniforms from the current state,
    /// then draw and present. A texture or surface hiccup degrades the frame
    /// instead of aborting the app.
    fn compose_frame(&mut self) -> Result<()> {
        let camera = CameraParams {
            view_proj: self.state.camera.view_projection(self.renderer.aspect()),
            position: self.state.camera.eye_position(),
        };
        let light = self.state.lighting.active_light();
        self.renderer.update_globals(&camera, &light);
        if let Err(err) = self.renderer.render(self.state.lighting.is_daytime()) {
            match err {
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                    let size = self.renderer.window().inner_size();
                    self.renderer.resize(size);
                }
                wgpu::SurfaceError::OutOfMemory => {
                    return Err(anyhow!("GPU is out of memory"));
                }
                wgpu::SurfaceError::Timeout => {
                    info!("surface timeout; retrying next frame");
                }
            }
        }
        Ok(())
    }

    fn handle_keyboard(&mut self, input: &KeyboardInput, control_flow: &mut ControlFlow) {
        if input.state != ElementState::Pressed {
            return;
        }
        let Some(action) = input
            .virtual_keycode
            .and_then(map_keycode)
            .and_then(bound_action)
        else {
            return;
        };
        self.apply_action(action, control_flow);
    }

    fn apply_action(&mut self, action: Action, control_flow: &mut ControlFlow) {
        match action {
            Action::Quit => control_flow.set_exit(),
            Action::ToggleCameraMode => match self.state.camera.toggle_mode() {
                CameraMode::FirstPerson => {
                    println!("Camera mode: FPS (use WASD/arrows to move, mouse drag to look)");
                }
                CameraMode::Orbital => println!("Camera mode: Orbital"),
            },
            Action::ToggleDayNight => {
                if self.state.lighting.toggle() {
                    println!("Daytime: sun on, lamp off");
                } else {
                    println!("Nighttime: sun off, lamp on");
                }
            }
            Action::TogglePause => {
                if self.state.clock.toggle_pause() {
                    println!("Animation paused");
                } else {
                    println!("Animation resumed");
                }
            }
            Action::Move(direction) => {
                // movement only steers the first-person camera
                if self.state.camera.mode() == CameraMode::FirstPerson {
                    let (dx, dz) = direction.step(MOVE_STEP);
                    self.state.camera.first_person.translate(dx, dz);
                }
            }
        }
    }

    fn handle_mouse_button(&self, state: ElementState, button: WinitMouseButton) {
        let index = match button {
            WinitMouseButton::Left => 0,
            WinitMouseButton::Right => 1,
            WinitMouseButton::Middle => 2,
            WinitMouseButton::Other(value) => value,
        } as u8;
        let button = workers_study::MouseButton::new(index);
        match state {
            ElementState::Pressed => self.input.set_mouse_button_down(button),
            ElementState::Released => self.input.set_mouse_button_up(button),
        }
    }
}

#[derive(Debug)]
struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn from_panic(stage: &str, panic: Box<dyn Any + Send>) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {}", panic_message(panic)),
        }
    }

    fn from_error(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => "unknown panic".into(),
        },
    }
}

fn map_keycode(code: winit::event::VirtualKeyCode) -> Option<KeyCode> {
    use winit::event::VirtualKeyCode as Key;
    Some(match code {
        Key::Escape => KeyCode::Named(NamedKey::Escape),
        Key::Space => KeyCode::Named(NamedKey::Space),
        Key::Left => KeyCode::Named(NamedKey::Left),
        Key::Right => KeyCode::Named(NamedKey::Right),
        Key::Up => KeyCode::Named(NamedKey::Up),
        Key::Down => KeyCode::Named(NamedKey::Down),
        Key::A => KeyCode::Character('A'),
        Key::C => KeyCode::Character('C'),
        Key::D => KeyCode::Character('D'),
        Key::L => KeyCode::Character('L'),
        Key::S => KeyCode::Character('S'),
        Key::W => KeyCode::Character('W'),
        _ => return None,
    })
}

fn print_controls() {
    println!("=========== CONTROLS ===========");
    println!("C - Switch camera mode (Orbital/FPS)");
    println!("L - Toggle Day/Night (Sun <-> Lamp)");
    println!("Space - Pause/resume the orbit");
    println!("WASD / Arrow Keys - Move camera (FPS mode)");
    println!("Mouse Drag - Look around (FPS mode)");
    println!("ESC - Exit");
    println!("================================");
}

fn print_summary(scene: &SceneGeometry, surfaces: &[SurfaceImage]) {
    println!("Scene summary:");
    println!(
        " - {} opaque batches, {} transparent batches",
        scene.opaque.len(),
        scene.transparent.len()
    );
    for batch in scene.opaque.iter().chain(scene.transparent.iter()) {
        println!(
            "   - {} ({} triangles)",
            batch.label,
            batch.indices.len() / 3
        );
    }
    println!("Textures:");
    for image in surfaces {
        let origin = if image.fell_back {
            "generated pattern"
        } else {
            "file"
        };
        println!(
            " - {} {}x{} ({origin})",
            image.surface, image.width, image.height
        );
    }
}
