//! Errors surfaced by avatar generation.
//!
//! Bad or missing parameters never show up here: they fall back to the
//! configured defaults while the request is resolved.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvatarError {
    /// Requested resolution is above `max_size` and the policy is to reject.
    #[error("Requested payload exceeds maximum allowed size of {max}px")]
    PayloadTooLarge { requested: i64, max: u32 },

    /// Requested grid is above `max_grid`.
    #[error("Requested grid exceeds maximum allowed size of {max} cells")]
    GridTooLarge { requested: i64, max: u32 },

    /// Writing the PNG into the in-memory sink failed.
    #[error("failed to encode avatar: {0}")]
    Encoding(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, AvatarError>;
