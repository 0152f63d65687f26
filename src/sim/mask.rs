//! Pixel-accurate collision masks
//!
//! A mask is a row-major grid of opaque/transparent cells derived from a
//! sprite's alpha channel. Two masks collide when any opaque cell of one lands
//! on an opaque cell of the other after translating by their position offset.

use std::fmt;

/// Alpha at or above this value counts as opaque
pub const ALPHA_THRESHOLD: u8 = 127;

/// Per-pixel opacity map
#[derive(Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl fmt::Debug for CollisionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionMask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("opaque", &self.count())
            .finish()
    }
}

impl CollisionMask {
    /// Fully opaque mask
    pub fn solid(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Build a mask by evaluating `opaque(x, y)` for every cell
    pub fn from_fn(width: u32, height: u32, mut opaque: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(opaque(x, y));
            }
        }
        Self { width, height, bits }
    }

    /// Build a mask from a row-major alpha channel.
    ///
    /// Returns `None` when `alpha` does not hold exactly `width * height` values.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Option<Self> {
        if alpha.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            bits: alpha.iter().map(|&a| a >= ALPHA_THRESHOLD).collect(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the cell at (x, y) is opaque; out-of-range cells are transparent
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Number of opaque cells
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Test overlap with `other` placed at `offset` relative to this mask's origin.
    ///
    /// Only the intersection of the two rectangles is scanned.
    pub fn overlaps(&self, other: &CollisionMask, offset: (i32, i32)) -> bool {
        let (ox, oy) = offset;
        let x_start = ox.max(0);
        let y_start = oy.max(0);
        let x_end = (self.width as i32).min(ox + other.width as i32);
        let y_end = (self.height as i32).min(oy + other.height as i32);

        if x_start >= x_end || y_start >= y_end {
            return false;
        }

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - ox, y - oy) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: u32) -> CollisionMask {
        CollisionMask::from_fn(size, size, |x, y| (x + y) % 2 == 0)
    }

    #[test]
    fn test_from_alpha_threshold() {
        let mask = CollisionMask::from_alpha(2, 2, &[0, 126, 127, 255]).unwrap();
        assert!(!mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert!(mask.get(0, 1));
        assert!(mask.get(1, 1));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_from_alpha_wrong_length() {
        assert!(CollisionMask::from_alpha(3, 3, &[255; 8]).is_none());
    }

    #[test]
    fn test_solid_overlap_and_miss() {
        let a = CollisionMask::solid(10, 10);
        let b = CollisionMask::solid(4, 4);
        assert!(a.overlaps(&b, (0, 0)));
        assert!(a.overlaps(&b, (9, 9)));
        assert!(a.overlaps(&b, (-3, -3)));
        assert!(!a.overlaps(&b, (10, 0)));
        assert!(!a.overlaps(&b, (-4, 5)));
    }

    #[test]
    fn test_bounding_boxes_overlap_but_pixels_do_not() {
        // Opaque only in the top-left / bottom-right corners respectively
        let a = CollisionMask::from_fn(10, 10, |x, y| x < 3 && y < 3);
        let b = CollisionMask::from_fn(10, 10, |x, y| x >= 7 && y >= 7);
        assert!(!a.overlaps(&b, (0, 0)));
        // Shift b so its opaque corner lands on a's opaque corner
        assert!(a.overlaps(&b, (-6, -6)));
    }

    #[test]
    fn test_checkerboard_parity() {
        let a = checkerboard(8);
        assert!(a.overlaps(&a, (0, 0)));
        // Shifting by one cell puts every opaque cell on a transparent one
        assert!(!a.overlaps(&a, (1, 0)));
        assert!(a.overlaps(&a, (1, 1)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = CollisionMask::from_fn(6, 4, |x, _| x % 3 == 0);
        let b = CollisionMask::from_fn(5, 5, |_, y| y == 2);
        for ox in -6..7 {
            for oy in -6..7 {
                assert_eq!(a.overlaps(&b, (ox, oy)), b.overlaps(&a, (-ox, -oy)));
            }
        }
    }
}
