//! Avatar foreground color.

use super::digest::NameDigest;
use image::Rgba;

/// Lower channel bound used when clamping.
pub const CHANNEL_MIN: u8 = 30;
/// Upper channel bound used when clamping.
pub const CHANNEL_MAX: u8 = 225;

/// Opaque RGB color derived from a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl AvatarColor {
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, u8::MAX])
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Take bytes 0..3 as R, G, B, optionally pulling each channel into
/// `[CHANNEL_MIN, CHANNEL_MAX]` to avoid near-black and near-white avatars.
pub fn derive_color(digest: &NameDigest, clamp: bool) -> AvatarColor {
    let [r, g, b] = digest.rgb();
    let channel = |v: u8| {
        if clamp {
            v.clamp(CHANNEL_MIN, CHANNEL_MAX)
        } else {
            v
        }
    };

    AvatarColor {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}
