//! Fill decisions for the left half of the grid.
//!
//! Only `ceil(grid / 2)` columns are decided; the rasterizer mirrors them
//! onto the right half. Cell `(x, y)` reads digest byte
//! `(x + y * half_width) % 16` and is filled when that byte is even, so
//! larger grids cycle through the same sixteen bytes.

use super::digest::NameDigest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfGrid {
    grid: u32,
    half_width: u32,
    /// Row-major, `grid * half_width` cells.
    cells: Vec<bool>,
}

impl HalfGrid {
    /// Build the mask for `grid` rows. `grid` must be at least 1.
    pub fn from_digest(digest: &NameDigest, grid: u32) -> Self {
        debug_assert!(grid >= 1, "grid must be positive");
        let half_width = grid.div_ceil(2);

        let mut cells = Vec::with_capacity((grid * half_width) as usize);
        for y in 0..grid {
            for x in 0..half_width {
                let index = (x + y * half_width) as usize;
                cells.push(digest.pattern_byte(index) % 2 == 0);
            }
        }

        Self {
            grid,
            half_width,
            cells,
        }
    }

    pub fn grid(&self) -> u32 {
        self.grid
    }

    pub fn half_width(&self) -> u32 {
        self.half_width
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.half_width && y < self.grid && self.cells[(x + y * self.half_width) as usize]
    }

    /// Whether the full-width cell at column `x` (0..grid) is filled.
    pub fn get_mirrored(&self, x: u32, y: u32) -> bool {
        if x >= self.grid {
            return false;
        }
        let half_x = if x < self.half_width {
            x
        } else {
            self.grid - x - 1
        };
        self.get(half_x, y)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }

    /// `(x, y)` of every filled half-grid cell, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let half_width = self.half_width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(i, _)| (i as u32 % half_width, i as u32 / half_width))
    }

    /// Render as text rows, `#` for filled and `.` for empty, mirrored to full width.
    pub fn to_ascii(&self) -> String {
        (0..self.grid)
            .map(|y| {
                (0..self.grid)
                    .map(|x| if self.get_mirrored(x, y) { '#' } else { '.' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::digest::HashAlgorithm;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1)]
    #[case(5, 3)]
    #[case(6, 3)]
    #[case(7, 4)]
    #[case(12, 6)]
    fn half_width_rounds_up(#[case] grid: u32, #[case] half: u32) {
        let mask = HalfGrid::from_digest(&HashAlgorithm::Md5.digest("x"), grid);
        assert_eq!(mask.half_width(), half);
        assert_eq!(mask.grid(), grid);
    }

    #[rstest]
    #[case(6)]
    #[case(12)]
    #[case(7)]
    fn cells_follow_modular_index(#[case] grid: u32) {
        let digest = HashAlgorithm::Sha256.digest("saitama");
        let mask = HalfGrid::from_digest(&digest, grid);
        let half = mask.half_width();
        for y in 0..grid {
            for x in 0..half {
                let byte = digest.as_bytes()[((x + y * half) % 16) as usize];
                assert_eq!(mask.get(x, y), byte % 2 == 0, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn mirrored_lookup_is_symmetric() {
        let mask = HalfGrid::from_digest(&HashAlgorithm::Md5.digest("alice"), 7);
        for y in 0..7 {
            for x in 0..7 {
                assert_eq!(mask.get_mirrored(x, y), mask.get_mirrored(7 - x - 1, y));
            }
        }
    }

    #[test]
    fn filled_cells_agree_with_count() {
        let mask = HalfGrid::from_digest(&HashAlgorithm::Md5.digest("bob"), 12);
        let cells: Vec<_> = mask.filled_cells().collect();
        assert_eq!(cells.len(), mask.filled_count());
        assert!(cells.iter().all(|&(x, y)| mask.get(x, y)));
    }

    #[test]
    fn out_of_range_is_empty() {
        let mask = HalfGrid::from_digest(&HashAlgorithm::Md5.digest("carol"), 4);
        assert!(!mask.get(2, 0));
        assert!(!mask.get(0, 4));
        assert!(!mask.get_mirrored(4, 0));
    }

    #[test]
    fn ascii_rows_are_palindromes() {
        let mask = HalfGrid::from_digest(&HashAlgorithm::Md5.digest("saitama"), 6);
        let art = mask.to_ascii();
        assert_eq!(art.lines().count(), 6);
        for line in art.lines() {
            assert_eq!(line.len(), 6);
            assert_eq!(line, line.chars().rev().collect::<String>());
        }
    }
}
