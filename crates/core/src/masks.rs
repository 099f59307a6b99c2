//! Mask painters for the host collaborators
//!
//! The simulator never mutates its masks; a host acting as the Mask Provider
//! paints them between ticks. These painters cover the two shapes the host
//! loop needs: a filled circle defined in normalized grid coordinates
//! (suitable for a moving emitter repainted every tick) and a border ring of
//! solid cells that closes the domain. Both are row-parallel like the
//! simulation kernels and write the active value 1.0, matching the
//! [`crate::solver::MASK_THRESHOLD`] convention.

use crate::fields::{ScalarField, Vec2};
use crate::solver::dispatch;
use rayon::prelude::*;

/// Overwrite `mask` with a filled circle
///
/// `center` and `radius` are in normalized grid space: (0, 0) is the
/// bottom-left corner, (1, 1) the top-right, and distances are measured
/// after scaling cell coordinates by 1/width and 1/height. Every cell whose
/// normalized center lies within `radius` of `center` becomes 1.0, every
/// other cell 0.0. Because the whole grid is rewritten, repainting with a
/// new center each tick yields a clean moving emitter with no trail.
pub fn paint_circle(mask: &mut ScalarField, center: Vec2, radius: f32) {
    let inv_width = 1.0 / mask.width as f32;
    let inv_height = 1.0 / mask.height as f32;
    let radius_sq = radius * radius;
    let width = mask.width;

    dispatch(mask.as_mut_slice(), width, |x, y| {
        let dx = (x as f32 + 0.5) * inv_width - center.x;
        let dy = (y as f32 + 0.5) * inv_height - center.y;
        if dx * dx + dy * dy <= radius_sq {
            1.0
        } else {
            0.0
        }
    });
}

/// Mark every cell within `thickness` cells of the grid edge as active
///
/// The interior is left untouched, so the ring composes with obstacles the
/// host painted earlier. A thickness of zero is a no-op; a thickness at or
/// beyond half the grid fills it completely.
pub fn paint_border(mask: &mut ScalarField, thickness: usize) {
    let width = mask.width;
    let height = mask.height;
    let thickness = thickness.min(width).min(height);

    mask.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            if y < thickness || y >= height - thickness {
                row.fill(1.0);
            } else {
                row[..thickness].fill(1.0);
                row[width - thickness..].fill(1.0);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_center_cell_is_active() {
        let mut mask = ScalarField::new(32, 32);
        paint_circle(&mut mask, Vec2::new(0.5, 0.5), 0.1);

        assert_eq!(mask.get(16, 16), 1.0);
        assert_eq!(mask.get(0, 0), 0.0);
        assert_eq!(mask.get(31, 31), 0.0);
    }

    #[test]
    fn test_circle_radius_bounds_the_region() {
        let mut mask = ScalarField::new(64, 64);
        paint_circle(&mut mask, Vec2::new(0.5, 0.5), 0.25);

        let active = mask.as_slice().iter().filter(|&&v| v >= 0.5).count();
        // Area of a radius-0.25 circle in a unit square is pi/16 of the cells
        let expected = (std::f32::consts::PI / 16.0 * 64.0 * 64.0) as usize;
        assert!(
            active.abs_diff(expected) < expected / 10,
            "Painted {active} cells, expected about {expected}"
        );
    }

    #[test]
    fn test_circle_repaint_clears_previous_region() {
        let mut mask = ScalarField::new(32, 32);
        paint_circle(&mut mask, Vec2::new(0.25, 0.5), 0.1);
        assert_eq!(mask.get(8, 16), 1.0);

        // The emitter moves; the old region must be gone
        paint_circle(&mut mask, Vec2::new(0.75, 0.5), 0.1);
        assert_eq!(mask.get(8, 16), 0.0);
        assert_eq!(mask.get(24, 16), 1.0);
    }

    #[test]
    fn test_border_ring_closes_the_domain() {
        let mut mask = ScalarField::new(16, 16);
        paint_border(&mut mask, 2);

        for x in 0..16 {
            assert_eq!(mask.get(x, 0), 1.0);
            assert_eq!(mask.get(x, 1), 1.0);
            assert_eq!(mask.get(x, 15), 1.0);
        }
        for y in 0..16 {
            assert_eq!(mask.get(0, y), 1.0);
            assert_eq!(mask.get(15, y), 1.0);
        }
        assert_eq!(mask.get(8, 8), 0.0);
    }

    #[test]
    fn test_border_preserves_interior_obstacles() {
        let mut mask = ScalarField::new(16, 16);
        mask.set(8, 8, 1.0);
        paint_border(&mut mask, 1);

        assert_eq!(mask.get(8, 8), 1.0);
        assert_eq!(mask.get(7, 8), 0.0);
    }
}
