//! Decorative QR-style module matrix.
//!
//! This is not a QR encoder and the output does not decode; it exists to
//! give a shortened link a scannable-looking badge. Finder squares sit in
//! three corners, timing lines run between them, and the remaining modules
//! are filled from an FNV-1a hash stream of the input, so the same link
//! always renders the same pattern.

use std::hash::Hasher;

use fnv::FnvHasher;

use crate::constants::QR_MODULES;

const FINDER: usize = 7;
// Finder plus its one-module separator.
const RESERVED: usize = FINDER + 1;
const TIMING: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    pub fn generate(value: &str) -> Self {
        let size = QR_MODULES;
        let mut matrix = Self {
            size,
            modules: vec![false; size * size],
        };
        matrix.place_finder(0, 0);
        matrix.place_finder(size - FINDER, 0);
        matrix.place_finder(0, size - FINDER);
        matrix.place_timing();
        matrix.fill_data(value);
        matrix
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.size + x]
    }

    fn set(&mut self, x: usize, y: usize, dark: bool) {
        self.modules[y * self.size + x] = dark;
    }

    /// Concentric 7x7 square: dark ring, light ring, dark 3x3 core.
    fn place_finder(&mut self, ox: usize, oy: usize) {
        for dy in 0..FINDER {
            for dx in 0..FINDER {
                let edge = dx == 0 || dy == 0 || dx == FINDER - 1 || dy == FINDER - 1;
                let core = (2..=4).contains(&dx) && (2..=4).contains(&dy);
                self.set(ox + dx, oy + dy, edge || core);
            }
        }
    }

    /// Alternating line along row/column 6 between the finder zones.
    fn place_timing(&mut self) {
        for i in RESERVED..self.size - RESERVED {
            self.set(i, TIMING, i % 2 == 0);
            self.set(TIMING, i, i % 2 == 0);
        }
    }

    fn is_reserved(&self, x: usize, y: usize) -> bool {
        let far = self.size - RESERVED;
        (x < RESERVED && y < RESERVED)
            || (x >= far && y < RESERVED)
            || (x < RESERVED && y >= far)
            || x == TIMING
            || y == TIMING
    }

    fn fill_data(&mut self, value: &str) {
        for y in 0..self.size {
            for x in 0..self.size {
                if self.is_reserved(x, y) {
                    continue;
                }
                let mut hasher = FnvHasher::default();
                hasher.write(value.as_bytes());
                hasher.write_u64((y * self.size + x) as u64);
                self.set(x, y, hasher.finish().count_ones() % 2 == 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_value_renders_the_same_pattern() {
        let a = QrMatrix::generate("https://short.link/abc123");
        let b = QrMatrix::generate("https://short.link/abc123");
        assert_eq!(a, b);
    }

    #[test]
    fn different_values_render_different_patterns() {
        let a = QrMatrix::generate("https://short.link/abc123");
        let b = QrMatrix::generate("https://short.link/def456");
        assert_ne!(a, b);
    }

    #[test]
    fn finder_corners_are_dark() {
        let m = QrMatrix::generate("x");
        let last = m.size() - 1;
        assert!(m.is_dark(0, 0));
        assert!(m.is_dark(last, 0));
        assert!(m.is_dark(0, last));
        // Fourth corner carries data, not a finder.
        let center = FINDER / 2;
        assert!(m.is_dark(center, center));
    }

    #[test]
    fn finder_separator_stays_light() {
        let m = QrMatrix::generate("x");
        for i in 0..RESERVED {
            assert!(!m.is_dark(FINDER, i));
            assert!(!m.is_dark(i, FINDER));
        }
    }

    #[test]
    fn data_region_is_roughly_half_dark() {
        let m = QrMatrix::generate("https://short.link/q7w8e9");
        let mut dark = 0usize;
        let mut total = 0usize;
        for y in 0..m.size() {
            for x in 0..m.size() {
                if !m.is_reserved(x, y) {
                    total += 1;
                    dark += m.is_dark(x, y) as usize;
                }
            }
        }
        let ratio = dark as f64 / total as f64;
        assert!((0.3..=0.7).contains(&ratio), "dark ratio {ratio}");
    }
}
