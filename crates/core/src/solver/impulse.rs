//! Impulse injection kernel
//!
//! Models a continuous emitter of fixed strength: wherever the impulse mask
//! is active the output is forced to the fill value (a hard set, not an
//! addition), everywhere else the source passes through unchanged. The
//! orchestrator invokes it once per injected quantity (temperature, density)
//! with separate fill magnitudes.

use super::boundary::MASK_THRESHOLD;
use super::dispatch::dispatch;

/// Copy `source` to `out`, overwriting masked cells with `fill`
///
/// All slices cover a `width`-column grid; `out` must not alias the inputs.
pub fn apply_impulse(source: &[f32], mask: &[f32], fill: f32, out: &mut [f32], width: usize) {
    dispatch(out, width, |x, y| {
        let idx = y * width + x;
        if mask[idx] >= MASK_THRESHOLD {
            fill
        } else {
            source[idx]
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_cells_take_fill_value() {
        let width = 4;
        let source = vec![0.5; width * width];
        let mut mask = vec![0.0; width * width];
        mask[width + 2] = 1.0;
        mask[3 * width] = 1.0;
        let mut out = vec![0.0; width * width];

        apply_impulse(&source, &mask, 10.0, &mut out, width);

        assert_eq!(out[width + 2], 10.0);
        assert_eq!(out[3 * width], 10.0);
    }

    #[test]
    fn test_unmasked_cells_pass_source_through() {
        let width = 4;
        let mut source = vec![0.0; width * width];
        for (idx, cell) in source.iter_mut().enumerate() {
            *cell = idx as f32;
        }
        let mut mask = vec![0.0; width * width];
        mask[7] = 1.0;
        let mut out = vec![0.0; width * width];

        apply_impulse(&source, &mask, -1.0, &mut out, width);

        for idx in 0..out.len() {
            if idx == 7 {
                assert_eq!(out[idx], -1.0);
            } else {
                assert_eq!(out[idx], source[idx]);
            }
        }
    }

    #[test]
    fn test_fill_overwrites_regardless_of_prior_value() {
        let width = 4;
        let source = vec![99.0; width * width];
        let mask = vec![1.0; width * width];
        let mut out = vec![0.0; width * width];

        apply_impulse(&source, &mask, 2.5, &mut out, width);

        assert!(out.iter().all(|&v| v == 2.5), "Hard set, not additive");
    }

    #[test]
    fn test_sub_threshold_mask_is_inactive() {
        let width = 4;
        let source = vec![1.0; width * width];
        let mask = vec![0.49; width * width];
        let mut out = vec![0.0; width * width];

        apply_impulse(&source, &mask, 7.0, &mut out, width);

        assert!(out.iter().all(|&v| v == 1.0));
    }
}
