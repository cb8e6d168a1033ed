#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Block Builder
//!
//! The spatial core of a first-person block-placement viewer: walk around a
//! world of textured blocks, remove the block under the crosshair, and place
//! new ones against the face you are looking at.
//!
//! ## Key Modules
//!
//! * `application_state` - Window lifecycle, input capture and configuration
//! * `engine_state` - The session, its spatial queries and the block store
//! * `error` - Error types for bounds, assets, configuration and startup
//!
//! ## Usage
//!
//! ```no_run
//! fn main() -> Result<(), block_builder::error::RunError> {
//!     block_builder::run(None)
//! }
//! ```
//!
//! The session can also be driven without a window:
//!
//! ```
//! use block_builder::{Session, SessionConfig, WorldCommand};
//!
//! let config = SessionConfig {
//!     viewer_start: [0.0, 0.0, 10.0],
//!     ..SessionConfig::default()
//! };
//! let mut session = Session::new(&config);
//! let ray = session.viewer.pick_ray(config.max_ray_distance).unwrap();
//!
//! session.queue_command(WorldCommand::Place { ray, block_type: 0 });
//! session.tick(web_time::Duration::from_millis(16));
//!
//! assert_eq!(session.world.len(), 2);
//! ```

use std::path::Path;

use winit::event_loop::{ControlFlow, EventLoop};

pub mod application_state;
pub mod engine_state;
pub mod error;

pub use application_state::{config::SessionConfig, ApplicationState};
pub use engine_state::{CommandOutcome, PlayerAction, Session, WorldCommand};
use error::RunError;

/// Opens a window and runs an interactive session until it is closed.
///
/// # Arguments
/// * `config_path` - JSON config file; defaults are used when `None`
pub fn run(config_path: Option<&Path>) -> Result<(), RunError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    log::info!("Logger initialized");

    let config = match config_path {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut state = ApplicationState::new(config);
    event_loop.run_app(&mut state)?;

    Ok(())
}
