//! # Session Configuration
//!
//! Tunable settings for a block-building session, read from a JSON file.
//! Every field has a default, so a config file only needs the values it
//! changes.
//!
//! ```json
//! {
//!     "block_unit_size": 2.0,
//!     "initial_world": { "layout": "flat_grid", "radius": 5 },
//!     "viewer_start": [0.0, 4.0, 12.0],
//!     "hotbar": true
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine_state::rendering::{mesh::BUILTIN_CUBE, texture::BUILTIN_WHITE};
use crate::engine_state::voxels::block::BlockTypeEntry;
use crate::error::ConfigError;

/// Largest accepted `FlatGrid` radius
pub const MAX_GRID_RADIUS: u32 = 256;

/// Which blocks exist when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum InitialWorld {
    /// No blocks at all
    Empty,
    /// One block at the origin
    SingleBlock,
    /// A `(2 * radius + 1)²` floor of blocks at y = 0, one block unit apart
    FlatGrid {
        /// Blocks on each side of the origin, at most [`MAX_GRID_RADIUS`]
        radius: u32,
    },
}

/// Settings for a block-building session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Spacing between adjacent block positions
    pub block_unit_size: f32,
    /// Uniform scale applied to placed block meshes
    pub block_scale: f32,
    /// How far the pick ray reaches
    pub max_ray_distance: f32,

    /// Initial eye position
    pub viewer_start: [f32; 3],
    /// Initial yaw; -90 looks down -Z
    pub viewer_yaw_degrees: f32,
    /// Initial pitch, clamped just inside ±90
    pub viewer_pitch_degrees: f32,
    /// Half extent of the viewer's collision box along X and Z
    pub viewer_half_width: f32,
    /// Half extent of the viewer's collision box along Y
    pub viewer_half_height: f32,
    /// Offset from the eye to the center of the collision box
    pub viewer_offset: [f32; 3],

    /// World units per second
    pub movement_speed: f32,
    /// Radians per pixel of pointer movement
    pub look_sensitivity: f32,

    /// Directory mesh and texture paths are resolved against
    pub asset_root: PathBuf,
    /// Placeable block types, selected by index
    pub block_catalog: Vec<BlockTypeEntry>,
    /// Blocks present when the session starts
    pub initial_world: InitialWorld,

    /// Expose every block's world bounds for a debug overlay
    pub debug_bounds: bool,
    /// Let the digit keys select the block type to place
    pub hotbar: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            block_unit_size: 2.0,
            block_scale: 1.0,
            max_ray_distance: 20.0,
            viewer_start: [2.0, 2.0, 5.0],
            viewer_yaw_degrees: -90.0,
            viewer_pitch_degrees: 0.0,
            viewer_half_width: 0.3,
            viewer_half_height: 0.9,
            viewer_offset: [0.0, -0.7, 0.0],
            movement_speed: 6.0,
            look_sensitivity: 0.002,
            asset_root: PathBuf::from("."),
            block_catalog: vec![BlockTypeEntry::new(BUILTIN_CUBE, BUILTIN_WHITE)],
            initial_world: InitialWorld::SingleBlock,
            debug_bounds: false,
            hotbar: true,
        }
    }
}

impl SessionConfig {
    /// Reads and validates a config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        log::info!("Loaded session config from {:?}", path.as_ref());
        Self::from_json_str(&contents)
    }

    /// Parses and validates a config from JSON text.
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("block_unit_size", self.block_unit_size),
            ("block_scale", self.block_scale),
            ("max_ray_distance", self.max_ray_distance),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                });
            }
        }

        let non_negative = [
            ("viewer_half_width", self.viewer_half_width),
            ("viewer_half_height", self.viewer_half_height),
            ("movement_speed", self.movement_speed),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must not be negative, got {}", value),
                });
            }
        }

        if let InitialWorld::FlatGrid { radius } = self.initial_world {
            if radius > MAX_GRID_RADIUS {
                return Err(ConfigError::Invalid {
                    field: "initial_world",
                    reason: format!("grid radius {} exceeds {}", radius, MAX_GRID_RADIUS),
                });
            }
        }

        if self.block_catalog.is_empty() {
            return Err(ConfigError::Invalid {
                field: "block_catalog",
                reason: "needs at least one block type".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SessionConfig::from_json_str(
            r#"{ "block_unit_size": 1.0, "initial_world": { "layout": "flat_grid", "radius": 2 } }"#,
        )
        .unwrap();

        assert_eq!(config.block_unit_size, 1.0);
        assert_eq!(config.initial_world, InitialWorld::FlatGrid { radius: 2 });
        assert_eq!(config.max_ray_distance, 20.0);
        assert_eq!(config.block_catalog.len(), 1);
    }

    #[test]
    fn catalog_entries_parse_in_order() {
        let config = SessionConfig::from_json_str(
            r#"{ "block_catalog": [
                { "mesh": "shapes/grass.obj", "texture": "textures/grass.png" },
                { "mesh": "builtin:cube", "texture": "textures/brick.png" }
            ] }"#,
        )
        .unwrap();

        assert_eq!(config.block_catalog[0].mesh, "shapes/grass.obj");
        assert_eq!(config.block_catalog[1].texture, "textures/brick.png");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let result = SessionConfig::from_json_str(r#"{ "block_unit_size": 0.0 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "block_unit_size",
                ..
            })
        ));

        let result = SessionConfig::from_json_str(r#"{ "block_catalog": [] }"#);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "block_catalog",
                ..
            })
        ));

        let result = SessionConfig::from_json_str(r#"{ "viewer_half_width": -1.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let result = SessionConfig::from_json_str(
            r#"{ "initial_world": { "layout": "flat_grid", "radius": 4000000000 } }"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "initial_world",
                ..
            })
        ));

        let config = SessionConfig {
            initial_world: InitialWorld::FlatGrid {
                radius: MAX_GRID_RADIUS,
            },
            ..SessionConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SessionConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "debug_bounds": true }}"#).unwrap();

        let config = SessionConfig::from_json_file(file.path()).unwrap();

        assert!(config.debug_bounds);
        assert!(matches!(
            SessionConfig::from_json_file(file.path().with_extension("missing")),
            Err(ConfigError::Io(_))
        ));
    }
}
