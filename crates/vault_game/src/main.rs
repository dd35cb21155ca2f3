//! Vault Run -- window, event loop and entry point.
//!
//! winit drives the loop through `ApplicationHandler`. Each `RedrawRequested`
//! runs exactly one game frame: quit check, clear, tick or win-hold, render,
//! flip, then the frame clock sleeps out the rest of the frame budget.
//!
//! Startup failures (config, window, GPU) are logged and end the process with
//! a non-zero exit code after the display has been released.

mod behavior;
mod config;
mod content;
mod entity;
mod game;
mod level;
mod movement;
#[cfg(test)]
mod replay;
mod route;
#[cfg(test)]
mod test_support;
mod world;

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use config::{load_or_default, GameConfig};
use game::{Game, LoopControl};
use vault_core::input::{InputState, Key};
use vault_core::time::{Clock, FrameClock};
use vault_platform::window::PlatformConfig;
use vault_render::QuadRenderer;

const CONFIG_PATH: &str = "assets/config/game.json";

/// Everything that needs a live window. Built in `resumed`, dropped on quit so
/// the display is released before the event loop exits.
struct EngineState {
    window: Arc<Window>,
    renderer: QuadRenderer,
    input: InputState,
    clock: FrameClock,
    game: Game,
}

impl EngineState {
    fn new(event_loop: &ActiveEventLoop, config: &GameConfig) -> Result<Self, String> {
        let platform = PlatformConfig {
            title: config.title.clone(),
            width: config.display_width,
            height: config.display_height,
        };
        let window = vault_platform::window::create_window(event_loop, &platform)?;
        log::info!("Window created: {}x{}", platform.width, platform.height);

        let renderer = QuadRenderer::new(
            window.clone(),
            (config.display_width, config.display_height),
        )?;
        let clock = FrameClock::new();
        let game = Game::new(config.clone(), clock.now());

        Ok(Self {
            window,
            renderer,
            input: InputState::new(),
            clock,
            game,
        })
    }
}

struct App {
    config: GameConfig,
    state: Option<EngineState>,
    failure: Option<String>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            state: None,
            failure: None,
        }
    }

    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.take() {
            log::info!(
                "Shutting down after {} frames ({:.1} fps average)",
                state.clock.frame_count,
                state.clock.smoothed_fps
            );
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match EngineState::new(event_loop, &self.config) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Startup failed: {err}");
                self.failure = Some(err);
                self.shut_down(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                state.input.request_quit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.renderer.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(game_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(game_key),
                            ElementState::Released => state.input.key_up(game_key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let control =
                    state
                        .game
                        .run_frame(&state.input, &mut state.renderer, &mut state.clock);
                state.input.end_frame();
                if control == LoopControl::Quit {
                    self.shut_down(event_loop);
                }
            }

            _ => {}
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

fn run() -> Result<(), String> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_PATH));
    let config = load_or_default(&config_path)?;
    log::info!(
        "Config '{}' v{}: {}x{} at {} fps",
        config_path.display(),
        config.version,
        config.display_width,
        config.display_height,
        config.framerate
    );

    let event_loop =
        EventLoop::new().map_err(|e| format!("Failed to create event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| format!("Event loop error: {e}"))?;

    match app.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Vault Run starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
