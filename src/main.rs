//! Rainbow Drop entry point
//!
//! Owns the window and drives the loop: input is queued as it arrives, the
//! simulation ticks at a fixed rate, impacts go to the audio thread, and
//! every tick batch ends with a redraw.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use glam::Vec2;
use rainbow_drop::audio::{AudioManager, ImpactSample};
use rainbow_drop::platform::{TickClock, map_key, mouse_event};
use rainbow_drop::renderer::{RenderState, build_scene};
use rainbow_drop::settings::DEFAULT_SETTINGS_FILE;
use rainbow_drop::sim::{Control, InputEvent, SimState, tick};
use rainbow_drop::{AppError, AppResult, Settings};

/// Window, renderer and tick clock, created once the event loop resumes
struct Session {
    window: Arc<Window>,
    render: RenderState,
    clock: TickClock,
}

struct App {
    settings: Settings,
    state: SimState,
    audio: AudioManager,
    session: Option<Session>,
    /// Input received since the last tick
    pending: Vec<InputEvent>,
    /// Latest cursor position, ahead of the simulation's copy
    pointer: Vec2,
    error: Option<AppError>,
}

impl App {
    fn new(settings: Settings, audio: AudioManager) -> Self {
        let seed: u64 = rand::random();
        log::debug!("Simulation seed {seed}");
        let state = SimState::with_params(settings.bounds(), settings.physics, seed);
        Self {
            settings,
            state,
            audio,
            session: None,
            pending: Vec::new(),
            pointer: Vec2::ZERO,
            error: None,
        }
    }

    fn create_session(&self, event_loop: &ActiveEventLoop) -> AppResult<Session> {
        let win = &self.settings.window;
        let attributes = Window::default_attributes()
            .with_title(win.title.clone())
            .with_inner_size(LogicalSize::new(win.width, win.height))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attributes)?);
        log::info!("Window created: {}x{}", win.width, win.height);

        let render = pollster::block_on(RenderState::new(
            window.clone(),
            self.settings.bounds(),
            win.quality,
        ))?;
        log::info!("Render quality: {}", win.quality.as_str());

        Ok(Session {
            window,
            render,
            clock: TickClock::new(win.tick_rate_hz, Instant::now()),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.create_session(event_loop) {
            Ok(session) => self.session = Some(session),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.pending.push(InputEvent::Quit);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let pos = position.to_logical::<f32>(session.window.scale_factor());
                self.pointer = Vec2::new(pos.x, pos.y);
                self.pending.push(InputEvent::PointerMove { pos: self.pointer });
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(event) = mouse_event(state, button, self.pointer) {
                    self.pending.push(event);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && let PhysicalKey::Code(code) = event.physical_key
                    && let Some(input) = map_key(code)
                {
                    self.pending.push(input);
                }
            }

            WindowEvent::Resized(size) => {
                session.render.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                let scene = build_scene(&self.state);
                match session.render.render(&scene) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        session.render.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Render error: {e:?}"),
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let ticks = session.clock.due_ticks(Instant::now());
        for _ in 0..ticks {
            let inputs = std::mem::take(&mut self.pending);
            if tick(&mut self.state, &inputs) == Control::Quit {
                log::info!("Quit after {} ticks", self.state.time_ticks);
                event_loop.exit();
                return;
            }
            self.audio.handle_events(&self.state.drain_events());
        }

        if ticks > 0 {
            session.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(session.clock.deadline()));
    }
}

fn run(settings_path: PathBuf) -> AppResult<()> {
    let settings = Settings::load(&settings_path)?;
    let sample = ImpactSample::from_settings(&settings)?;
    let audio = AudioManager::start(sample, &settings)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings, audio);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rainbow Drop starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

    if let Err(e) = run(settings_path) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
