//! identigen - Deterministic pixel-art avatars.
//!
//! A name is hashed, the first digest bytes pick a color, and the first
//! sixteen bytes decide which cells of the left half of a square grid are
//! filled. The half is mirrored onto the right to give a symmetric image,
//! which is served over HTTP or written out as a PNG.

pub mod config;
pub mod error;
pub mod generator;
pub mod request;
pub mod server;

pub use config::{AvatarSettings, IdentigenConfig, OversizePolicy};
pub use error::AvatarError;
pub use generator::digest::HashAlgorithm;
pub use generator::AvatarGenerator;
pub use request::{AvatarParams, AvatarRequest};
