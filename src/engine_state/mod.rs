//! # Engine State Module
//!
//! The state of a block-building session and the per-frame logic that drives it.
//!
//! ## Key Components
//!
//! * `Session` - Explicit record of the viewer, the placed blocks, the block
//!   catalog and the pending world edits
//! * `spatial` - Bounding boxes, ray casting, collision and placement
//! * `viewer_state` - The first-person viewer and its controller
//! * `voxels` - Block types and the store of placed blocks
//! * `rendering` - Vertex layout, mesh sources and texture decoding
//!
//! ## Frame Flow
//!
//! Input is translated into a `PlayerAction` once per frame. Clicks become
//! `WorldCommand`s carrying the pick ray of that moment; they are queued and
//! applied in order at the end of `Session::tick`, after the viewer has moved.

use std::collections::VecDeque;

use cgmath::{Deg, Point3, Vector3};
use web_time::Duration;
use winit::{event::MouseButton, keyboard::KeyCode};

use rendering::{
    mesh::{DefaultMeshLoader, MeshLoader},
    texture::{ImageTextureLoader, TextureLoader},
};
use spatial::{
    aabb::Aabb,
    collision::collides,
    placement::{PlacementOutcome, PlacementPlanner},
    raycast::{nearest_hit, Ray},
};
use viewer_state::{
    viewer::{Viewer, ViewerBody},
    ViewerController,
};
use voxels::{
    block::BlockCatalog,
    world::World,
    world_object::{ObjectTransform, WorldObject},
};

use crate::application_state::{
    config::{InitialWorld, SessionConfig},
    input_state::ProcessedInputState,
};
use crate::error::AssetError;

pub mod rendering;
pub mod spatial;
pub mod viewer_state;
pub mod voxels;

/// Keys that select a hotbar slot, in slot order
const HOTBAR_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Flags controlling session behavior
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionFlags {
    /// Whether the pointer is captured for mouse look
    pub pointer_locked: bool,
    /// Whether world bounds are exposed for a debug overlay
    pub debug_bounds: bool,
    /// Whether the digit keys select block types
    pub hotbar: bool,
}

/// A world edit requested by the player.
///
/// The ray is captured when the request is made; what it strikes is decided
/// when the command is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldCommand {
    /// Remove the nearest block along `ray`
    Remove {
        /// Pick ray at click time
        ray: Ray,
    },
    /// Place a block of `block_type` against the face struck by `ray`
    Place {
        /// Pick ray at click time
        ray: Ray,
        /// Catalog index of the block to place
        block_type: usize,
    },
}

/// What applying a `WorldCommand` did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A block was removed
    Removed {
        /// World position of the removed block
        position: Point3<f32>,
        /// Its catalog index
        block_type: usize,
    },
    /// The ray struck nothing within reach
    NothingTargeted,
    /// The placement either happened or was rejected
    Placement(PlacementOutcome),
    /// The block type's assets could not be loaded; the world is unchanged
    AssetFailed {
        /// Catalog index that failed to load
        block_type: usize,
        /// Loader message
        reason: String,
    },
}

/// The state of one block-building session.
///
/// # Examples
///
/// ```no_run
/// use block_builder::{Session, SessionConfig};
///
/// let mut session = Session::new(&SessionConfig::default());
///
/// // Main loop
/// loop {
///     // session.set_input_commands(processed_input);
///     let outcomes = session.tick(web_time::Duration::from_millis(16));
///     # break;
/// }
/// ```
pub struct Session {
    /// Position, orientation and collision body of the viewer
    pub viewer: Viewer,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// Every placed block
    pub world: World,
    /// Placeable block types
    pub catalog: BlockCatalog,
    controller: ViewerController,
    planner: PlacementPlanner,
    commands: VecDeque<WorldCommand>,
    selected_block: usize,
    max_ray_distance: f32,
    mesh_loader: Box<dyn MeshLoader>,
    texture_loader: Box<dyn TextureLoader>,
    flags: SessionFlags,
}

impl Session {
    /// Creates a session that loads assets from `config.asset_root`.
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_loaders(
            config,
            Box::new(DefaultMeshLoader::new(config.asset_root.clone())),
            Box::new(ImageTextureLoader::new(config.asset_root.clone())),
        )
    }

    /// Creates a session with caller-supplied asset loaders.
    ///
    /// The initial world is seeded from block type 0. If its assets fail to
    /// load the session starts with an empty world.
    ///
    /// # Arguments
    /// * `config` - Session settings; an invalid config is replaced by the defaults
    /// * `mesh_loader` - Source of vertex buffers for mesh paths
    /// * `texture_loader` - Decoder for texture paths
    pub fn with_loaders(
        config: &SessionConfig,
        mesh_loader: Box<dyn MeshLoader>,
        texture_loader: Box<dyn TextureLoader>,
    ) -> Self {
        let fallback;
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}; using the default session config", e);
                fallback = SessionConfig::default();
                &fallback
            }
        };

        let viewer = Viewer::new(
            config.viewer_start,
            Deg(config.viewer_yaw_degrees),
            Deg(config.viewer_pitch_degrees),
            ViewerBody::new(
                config.viewer_half_width,
                config.viewer_half_height,
                Vector3::from(config.viewer_offset),
            ),
        );

        let mut session = Self {
            viewer,
            player_actions: PlayerAction::default(),
            world: World::new(),
            catalog: BlockCatalog::new(config.block_catalog.clone()),
            controller: ViewerController::new(config.movement_speed, config.look_sensitivity),
            planner: PlacementPlanner::new(config.block_unit_size, config.block_scale),
            commands: VecDeque::new(),
            selected_block: 0,
            max_ray_distance: config.max_ray_distance,
            mesh_loader,
            texture_loader,
            flags: SessionFlags {
                pointer_locked: false,
                debug_bounds: config.debug_bounds,
                hotbar: config.hotbar,
            },
        };

        if let Err(e) = session.seed_world(config.initial_world) {
            log::warn!("Could not seed initial world: {}", e);
        }
        if collides(&session.viewer.aabb(), &session.world) {
            log::warn!(
                "Viewer starts inside a block at {:?}",
                session.viewer.position
            );
        }

        session
    }

    /// Fills the world with the blocks of an initial layout.
    fn seed_world(&mut self, layout: InitialWorld) -> Result<(), AssetError> {
        let cells: Vec<(i32, i32)> = match layout {
            InitialWorld::Empty => return Ok(()),
            InitialWorld::SingleBlock => vec![(0, 0)],
            InitialWorld::FlatGrid { radius } => {
                let radius = radius as i32;
                (-radius..=radius)
                    .flat_map(|x| (-radius..=radius).map(move |z| (x, z)))
                    .collect()
            }
        };

        let local_aabb = self.block_bounds(0)?;
        let unit = self.planner.unit;
        for (x, z) in cells {
            let position = Point3::new(x as f32 * unit, 0.0, z as f32 * unit);
            self.world.add(WorldObject::new(
                local_aabb,
                ObjectTransform::at(position, self.planner.block_scale),
                0,
            ));
        }
        log::info!("Seeded world with {} blocks ({:?})", self.world.len(), layout);

        Ok(())
    }

    /// Local bounds of a block type, loading its assets on first use.
    fn block_bounds(&mut self, block_type: usize) -> Result<Aabb, AssetError> {
        self.catalog
            .prototype(
                block_type,
                self.mesh_loader.as_ref(),
                self.texture_loader.as_ref(),
            )
            .map(|prototype| prototype.local_aabb)
    }

    /// Index of the block type new placements use.
    pub fn selected_block(&self) -> usize {
        self.selected_block
    }

    /// Selects the block type for new placements.
    ///
    /// # Returns
    /// `false` and leaves the selection unchanged if `index` is outside the catalog.
    pub fn select_block(&mut self, index: usize) -> bool {
        if index >= self.catalog.len() {
            log::debug!(
                "Ignoring selection of block type {}, catalog has {}",
                index,
                self.catalog.len()
            );
            return false;
        }
        self.selected_block = index;
        log::info!("Selected block type {}", index);
        true
    }

    /// Whether mouse look is active.
    pub fn pointer_locked(&self) -> bool {
        self.flags.pointer_locked
    }

    /// Current session flags.
    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    /// World bounds of every block, if debug bounds are enabled.
    pub fn debug_bounds(&self) -> Option<Vec<Aabb>> {
        self.flags
            .debug_bounds
            .then(|| self.world.iter().map(|object| *object.world_aabb()).collect())
    }

    /// Queues a world edit to be applied at the end of the next tick.
    pub fn queue_command(&mut self, command: WorldCommand) {
        self.commands.push_back(command);
    }

    /// Number of edits waiting for the next tick.
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Advances the session by one frame.
    ///
    /// Moves the viewer according to the current player actions, then applies
    /// every queued command in order.
    ///
    /// # Returns
    /// The outcome of each applied command, in application order.
    pub fn tick(&mut self, wait_duration: Duration) -> Vec<CommandOutcome> {
        self.controller.intake_actions(&self.player_actions);
        if self.controller.has_updates() {
            self.controller
                .update_viewer(&mut self.viewer, &self.world, wait_duration);
        }
        self.player_actions = PlayerAction::default();

        let mut outcomes = Vec::with_capacity(self.commands.len());
        while let Some(command) = self.commands.pop_front() {
            outcomes.push(self.apply_command(command));
        }
        outcomes
    }

    /// Applies a single world edit immediately.
    pub fn apply_command(&mut self, command: WorldCommand) -> CommandOutcome {
        match command {
            WorldCommand::Remove { ray } => match self.planner.remove_targeted(&mut self.world, &ray) {
                Some(removed) => CommandOutcome::Removed {
                    position: removed.grid_position(),
                    block_type: removed.block_type(),
                },
                None => CommandOutcome::NothingTargeted,
            },
            WorldCommand::Place { ray, block_type } => {
                let Some(hit) = nearest_hit(&ray, &self.world) else {
                    return CommandOutcome::NothingTargeted;
                };
                let viewer_aabb = self.viewer.aabb();

                let Self {
                    world,
                    catalog,
                    planner,
                    mesh_loader,
                    texture_loader,
                    ..
                } = self;
                let result = planner.place(world, &hit, &viewer_aabb, block_type, |index| {
                    catalog
                        .prototype(index, &**mesh_loader, &**texture_loader)
                        .map(|prototype| prototype.local_aabb)
                });

                match result {
                    Ok(outcome) => CommandOutcome::Placement(outcome),
                    Err(e) => {
                        log::warn!("Could not place block type {}: {}", block_type, e);
                        CommandOutcome::AssetFailed {
                            block_type,
                            reason: e.to_string(),
                        }
                    }
                }
            }
        }
    }

    /// Sets the input commands for the session.
    ///
    /// # Arguments
    /// * `input` - The processed input state of this frame
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        let player_action = self.translate_processed_input(input);

        if let Some(slot) = player_action.select_block {
            self.select_block(slot);
        }

        if !player_action.clicks.is_empty() {
            match self.viewer.pick_ray(self.max_ray_distance) {
                Some(ray) => {
                    for button in &player_action.clicks {
                        let command = match button {
                            MouseButton::Left => WorldCommand::Remove { ray },
                            _ => WorldCommand::Place {
                                ray,
                                block_type: self.selected_block,
                            },
                        };
                        self.queue_command(command);
                    }
                }
                None => log::debug!("No pick ray for the current view"),
            }
        }

        self.player_actions = player_action;
    }

    /// Translates the processed input state into player actions.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate
    ///
    /// # Returns
    /// A PlayerAction struct with the appropriate actions set
    fn translate_processed_input(&mut self, input: ProcessedInputState) -> PlayerAction {
        let mut player_action = PlayerAction::default();

        // Movement actions - active if key is pressed or held
        player_action.move_forward = input.get_key_state(KeyCode::KeyW).is_active();
        player_action.move_backward = input.get_key_state(KeyCode::KeyS).is_active();
        player_action.move_left = input.get_key_state(KeyCode::KeyA).is_active();
        player_action.move_right = input.get_key_state(KeyCode::KeyD).is_active();

        if input.get_key_state(KeyCode::KeyL).is_just_pressed() {
            self.flags.pointer_locked = !self.flags.pointer_locked;
            player_action.toggle_pointer_lock = true;
            log::info!("Pointer lock {}", if self.flags.pointer_locked { "on" } else { "off" });
        }

        // Mouse look only while the pointer is captured
        if self.flags.pointer_locked {
            player_action.rotate_view = input.get_mouse_delta();
        }

        // Every press counts, in arrival order
        player_action.clicks = input
            .get_clicks()
            .iter()
            .copied()
            .filter(|button| matches!(button, MouseButton::Left | MouseButton::Right))
            .collect();

        if self.flags.hotbar {
            player_action.select_block = HOTBAR_KEYS
                .iter()
                .position(|key| input.get_key_state(*key).is_just_pressed());
        }

        player_action
    }
}

/// Represents player actions derived from input
///
/// This struct contains flags for movement, look and the edits a frame of
/// input requests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerAction {
    /// Move along the view direction while the key is pressed or held
    pub move_forward: bool,
    /// Move against the view direction
    pub move_backward: bool,
    /// Strafe left
    pub move_left: bool,
    /// Strafe right
    pub move_right: bool,

    /// View rotation - Some while the pointer is locked and has moved
    pub rotate_view: Option<(f64, f64)>,

    /// Left (remove) and right (place) presses of this frame, in arrival order
    pub clicks: Vec<MouseButton>,
    /// Whether `L` was pressed this frame
    pub toggle_pointer_lock: bool,
    /// Hotbar slot chosen this frame
    pub select_block: Option<usize>,
}
