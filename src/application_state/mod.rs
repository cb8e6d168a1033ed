//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Window creation and pointer capture
//! - Input handling
//! - Application lifecycle events
//! - Driving the session once per event loop iteration

pub mod config;
pub mod input_manager;
pub mod input_state;

use std::sync::Arc;

use config::SessionConfig;
use input_manager::InputManager;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::engine_state::Session;

const WINDOW_TITLE: &str = "Block Builder";

/// The main application state container that manages the application's lifecycle.
///
/// The session is created once the event loop resumes and a window exists.
pub struct ApplicationState {
    /// Settings the session is created from
    pub config: SessionConfig,

    /// The initialized application state, if the application has started
    pub state: Option<InitializedApplicationState>,
}

/// Represents the fully initialized and running state of the application.
pub struct InitializedApplicationState {
    /// The block-building session
    pub session: Session,

    /// Handle to the application window
    pub window: Arc<Window>,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Timestamp of the last frame for delta time calculations
    pub last_wait_time: web_time::Instant,

    /// Pointer lock state last applied to the window
    pointer_locked: bool,
}

impl ApplicationState {
    /// Creates the handler; the window and session are built on first resume.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }
}

impl InitializedApplicationState {
    /// Grabs or releases the cursor to match the session's pointer lock.
    fn sync_pointer_lock(&mut self) {
        let locked = self.session.pointer_locked();
        if locked == self.pointer_locked {
            return;
        }

        let result = if locked {
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.window.set_cursor_grab(CursorGrabMode::None)
        };

        match result {
            Ok(()) => {
                self.window.set_cursor_visible(!locked);
                self.pointer_locked = locked;
            }
            Err(e) => log::warn!("Could not change cursor grab: {}", e),
        }
    }
}

/// Whether an event asks the application to close.
fn is_exit_request(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event: KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    ..
                },
                ..
            }
    )
}

impl ApplicationHandler for ApplicationState {
    /// Creates the window and the session the first time the application resumes.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let attributes = Window::default_attributes().with_title(WINDOW_TITLE);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Starting session");
        self.state = Some(InitializedApplicationState {
            session: Session::new(&self.config),
            window,
            input_manager: InputManager::new(),
            last_wait_time: web_time::Instant::now(),
            pointer_locked: false,
        });
    }

    /// Handles window-related events such as focus changes and input events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if is_exit_request(&event) {
            event_loop.exit();
            return;
        }

        if let Some(state) = &mut self.state {
            state.input_manager.intake_input(&event);

            if let WindowEvent::Focused(false) = event {
                state.input_manager.release_all();
            }
        }
    }

    /// Handles raw pointer motion used for mouse look.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                state.input_manager.intake_mouse_motion(delta);
            }
        }
    }

    /// Runs one session frame with the input gathered since the last one.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            let now = web_time::Instant::now();
            let wait_dt = now - state.last_wait_time;

            let processed_input = state.input_manager.get_and_reset_processed_input();
            state.session.set_input_commands(processed_input);
            state.sync_pointer_lock();

            for outcome in state.session.tick(wait_dt) {
                log::debug!("{:?}", outcome);
            }

            state.last_wait_time = now;
        }
    }
}
