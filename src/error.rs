//! # Errors
//!
//! Error types surfaced by the block builder. Ray misses and placement
//! rejections are ordinary outcomes and are not represented here.

use thiserror::Error;

/// Failures while deriving a bounding box from raw vertex data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    /// The vertex buffer contained no vertices at all.
    #[error("vertex buffer is empty")]
    EmptyVertexBuffer,

    /// The stride cannot hold a 3-component position.
    #[error("vertex stride {stride} is too small to hold a position")]
    InvalidStride {
        /// Floats per vertex
        stride: usize,
    },

    /// The buffer length is not a whole number of vertices.
    #[error("vertex buffer of {len} floats is not a multiple of stride {stride}")]
    MalformedVertexBuffer {
        /// Floats in the buffer
        len: usize,
        /// Floats per vertex
        stride: usize,
    },
}

/// Failures while loading the assets a block type needs before it can be placed.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The mesh could not be read or parsed.
    #[error("failed to load mesh {path}: {reason}")]
    MeshLoad {
        /// Mesh path as configured
        path: String,
        /// Loader message
        reason: String,
    },

    /// The texture could not be read or decoded.
    #[error("failed to load texture {path}: {reason}")]
    TextureLoad {
        /// Texture path as configured
        path: String,
        /// Decoder message
        reason: String,
    },

    /// The mesh loaded but has no usable bounds.
    #[error("mesh {path} has no usable bounds: {source}")]
    DegenerateMesh {
        /// Mesh path as configured
        path: String,
        /// Why no bounds could be computed
        #[source]
        source: BoundsError,
    },

    /// The index is past the end of the catalog.
    #[error("block type {index} does not exist, catalog has {len} entries")]
    UnknownBlockType {
        /// Requested block type
        index: usize,
        /// Catalog size
        len: usize,
    },
}

/// Failures while reading or validating a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not valid config JSON.
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is out of range.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Failures that stop the interactive viewer from starting or running.
#[derive(Debug, Error)]
pub enum RunError {
    /// The config file was unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// winit could not create or run the event loop.
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
