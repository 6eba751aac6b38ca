//! Avatar generation pipeline.
//!
//! name → digest → (color, half-grid mask) → mirrored RGBA image → PNG.
//! Every stage is a pure function of its inputs; [`AvatarGenerator`] only
//! carries the immutable settings so one instance can serve any number of
//! concurrent callers.

pub mod color;
pub mod digest;
pub mod encode;
pub mod pattern;
pub mod raster;

use crate::config::AvatarSettings;
use crate::error::Result;
use crate::request::{AvatarParams, AvatarRequest};
use color::{derive_color, AvatarColor};
use image::RgbaImage;
use pattern::HalfGrid;

#[derive(Debug, Clone, Default)]
pub struct AvatarGenerator {
    settings: AvatarSettings,
}

impl AvatarGenerator {
    pub fn new(settings: AvatarSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AvatarSettings {
        &self.settings
    }

    pub fn color(&self, name: &str) -> AvatarColor {
        derive_color(&self.settings.hash.digest(name), self.settings.clamp_color)
    }

    pub fn mask(&self, name: &str, grid: u32) -> HalfGrid {
        HalfGrid::from_digest(&self.settings.hash.digest(name), grid)
    }

    /// Rasterize without encoding.
    pub fn render(&self, params: &AvatarParams) -> RgbaImage {
        let digest = self.settings.hash.digest(&params.name);
        let color = derive_color(&digest, self.settings.clamp_color);
        let mask = HalfGrid::from_digest(&digest, params.grid);
        raster::rasterize(&mask, color, params.size)
    }

    /// Text preview: the hex color on the first line, then the mirrored grid.
    pub fn preview(&self, params: &AvatarParams) -> String {
        let digest = self.settings.hash.digest(&params.name);
        let color = derive_color(&digest, self.settings.clamp_color);
        let mask = HalfGrid::from_digest(&digest, params.grid);
        format!("{}\n{}", color.to_hex(), mask.to_ascii())
    }

    /// Render and encode as PNG.
    pub fn generate(&self, params: &AvatarParams) -> Result<Vec<u8>> {
        encode::encode_png(&self.render(params))
    }

    /// Apply defaults and bounds to `request`, then generate.
    pub fn generate_for(&self, request: &AvatarRequest) -> Result<Vec<u8>> {
        let params = request.resolve(&self.settings)?;
        self.generate(&params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OversizePolicy;
    use crate::error::AvatarError;
    use crate::generator::color::CHANNEL_MIN;
    use crate::generator::digest::HashAlgorithm;
    use crate::generator::raster::block_span;
    use image::ImageFormat;

    fn params(name: &str, size: u32, grid: u32) -> AvatarParams {
        AvatarParams {
            name: name.to_string(),
            size,
            grid,
        }
    }

    fn decode(bytes: &[u8]) -> RgbaImage {
        image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8()
    }

    #[test]
    fn same_input_same_bytes() {
        let gen = AvatarGenerator::default();
        let a = gen.generate(&params("saitama", 256, 6)).unwrap();
        let b = gen.generate(&params("saitama", 256, 6)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn default_substitution() {
        let gen = AvatarGenerator::default();
        let from_empty = gen
            .generate_for(&AvatarRequest::new("").with_resolution(0).with_grid(0))
            .unwrap();
        let explicit = gen.generate(&params("saitama", 256, 6)).unwrap();
        assert_eq!(from_empty, explicit);
    }

    #[test]
    fn distinct_names_differ() {
        let gen = AvatarGenerator::default();
        let images: Vec<RgbaImage> = ["alice", "bob", "carol"]
            .iter()
            .map(|name| gen.render(&params(name, 128, 6)))
            .collect();
        assert_ne!(images[0], images[1]);
        assert_ne!(images[0], images[2]);
        assert_ne!(images[1], images[2]);
    }

    #[test]
    fn hash_choice_changes_output() {
        let md5 = AvatarGenerator::default();
        let sha = AvatarGenerator::new(AvatarSettings {
            hash: HashAlgorithm::Sha256,
            ..Default::default()
        });
        assert_ne!(md5.color("alice"), sha.color("alice"));
    }

    #[test]
    fn saitama_scenario() {
        let gen = AvatarGenerator::default();
        let bytes = gen.generate(&params("saitama", 256, 6)).unwrap();
        let img = decode(&bytes);
        assert_eq!(img.dimensions(), (256, 256));

        let mask = gen.mask("saitama", 6);
        let block = 256.0 / 6.0;
        let area = |(start, end): (u32, u32)| (end - start) as usize;

        // Even grid: every filled cell and its mirror are disjoint blocks.
        let expected: usize = mask
            .filled_cells()
            .map(|(x, y)| {
                let rows = area(block_span(y, block));
                let left = area(block_span(x, block));
                let right = area(block_span(6 - x - 1, block));
                (left + right) * rows
            })
            .sum();
        let opaque = img.pixels().filter(|p| p.0[3] == 255).count();
        assert_eq!(opaque, expected);

        let centre = |i: u32| {
            let (start, end) = block_span(i, block);
            (start + end) / 2
        };
        for cy in 0..6 {
            for cx in 0..6 {
                let here = img.get_pixel(centre(cx), centre(cy));
                let mirrored = img.get_pixel(centre(6 - cx - 1), centre(cy));
                assert_eq!(here, mirrored, "block ({cx}, {cy})");
                assert_eq!(here.0[3] == 255, mask.get_mirrored(cx, cy), "block ({cx}, {cy})");
            }
        }
    }

    #[test]
    fn grid_cycling_stays_symmetric() {
        let gen = AvatarGenerator::default();
        for grid in [6, 12] {
            let img = gen.render(&params("saitama", 240, grid));
            for y in 0..240 {
                for x in 0..240 {
                    assert_eq!(img.get_pixel(x, y), img.get_pixel(239 - x, y));
                }
            }
        }
    }

    #[test]
    fn oversize_never_exceeds_max() {
        let reject = AvatarGenerator::default();
        let err = reject
            .generate_for(&AvatarRequest::new("a").with_resolution(5000))
            .unwrap_err();
        assert!(matches!(err, AvatarError::PayloadTooLarge { .. }));

        let clamp = AvatarGenerator::new(AvatarSettings {
            oversize: OversizePolicy::Clamp,
            ..Default::default()
        });
        let bytes = clamp
            .generate_for(&AvatarRequest::new("a").with_resolution(5000))
            .unwrap();
        assert_eq!(decode(&bytes).dimensions(), (1080, 1080));
    }

    #[test]
    fn preview_shows_color_and_grid() {
        let gen = AvatarGenerator::default();
        let preview = gen.preview(&params("abc", 64, 5));
        let mut lines = preview.lines();
        assert_eq!(lines.next(), Some("#900150"));

        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 5);
        let mask = gen.mask("abc", 5);
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.chars().enumerate() {
                assert_eq!(cell == '#', mask.get_mirrored(x as u32, y as u32));
            }
        }
    }

    #[test]
    fn clamped_color_flows_into_pixels() {
        let gen = AvatarGenerator::new(AvatarSettings {
            clamp_color: true,
            ..Default::default()
        });
        let color = gen.color("abc");
        assert_eq!(color.g, CHANNEL_MIN);

        let img = gen.render(&params("abc", 60, 6));
        let painted = img.pixels().find(|p| p.0[3] == 255).copied();
        if let Some(pixel) = painted {
            assert_eq!(pixel, color.to_rgba());
        }
    }
}
