//! Error types for terrain synthesis and meshing.

use thiserror::Error;

/// Result type alias using [`TerrainError`].
pub type Result<T> = std::result::Result<T, TerrainError>;

/// Errors that can occur while generating or meshing terrain.
#[derive(Error, Debug)]
pub enum TerrainError {
    /// The grid subdivision count cannot be halved down to unit cells.
    #[error("invalid grid size {n}: {reason}")]
    InvalidGridSize {
        /// The rejected subdivision count.
        n: usize,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The mesh domain rectangle is unusable.
    #[error("invalid domain [{min_x}, {max_x}] x [{min_y}, {max_y}]")]
    InvalidDomain {
        /// Lower x bound.
        min_x: f32,
        /// Upper x bound.
        max_x: f32,
        /// Lower y bound.
        min_y: f32,
        /// Upper y bound.
        max_y: f32,
    },

    /// A vertex ended up with a zero-length (or non-finite) accumulated normal.
    #[error("vertex {vertex} has a degenerate normal")]
    DegenerateNormal {
        /// Flat index of the vertex.
        vertex: usize,
    },

    /// A triangle index list whose length is not a multiple of three.
    #[error("triangle index list has length {len}, expected a multiple of 3")]
    MalformedTriangleList {
        /// Length of the rejected list.
        len: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A terrain config could not be parsed.
    #[error("failed to parse terrain config from {origin}: {source}")]
    Config {
        /// Where the config text came from (a file path or `<string>`).
        origin: String,
        /// The RON parse error.
        source: ron::error::SpannedError,
    },
}

impl TerrainError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        TerrainError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
