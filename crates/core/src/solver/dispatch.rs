//! Parallel dispatch of per-cell kernels
//!
//! Every kernel in this crate runs through [`dispatch`]: the output grid is
//! decomposed into row bands of [`WORK_GROUP_SIZE`] rows and the bands are
//! processed as independent rayon work items. A work item writes only the
//! cells of its own band and reads only the kernel's input slices, so there
//! is no ordering requirement between cells. The call returns once every
//! band has completed, which gives the full barrier between dependent
//! kernel dispatches.

use crate::config::WORK_GROUP_SIZE;
use rayon::prelude::*;

/// Evaluate `op(x, y)` for every cell of a `width`-column grid and store the
/// results in `out`
///
/// `op` must be a pure function of the cell coordinates and the input grids
/// it captures; it must not touch `out` through any other path.
///
/// # Panics
///
/// Panics if `width` is zero while `out` is non-empty, or if `out.len()` is
/// not a multiple of `width`.
pub fn dispatch<T, F>(out: &mut [T], width: usize, op: F)
where
    T: Send,
    F: Fn(usize, usize) -> T + Sync,
{
    if out.is_empty() {
        return;
    }
    assert!(width > 0, "Grid width must be positive");
    assert!(
        out.len() % width == 0,
        "Output length must be a whole number of rows"
    );

    let band_rows = WORK_GROUP_SIZE as usize;
    out.par_chunks_mut(width * band_rows)
        .enumerate()
        .for_each(|(band, cells)| {
            let band_start = band * band_rows;
            for (row_in_band, row) in cells.chunks_mut(width).enumerate() {
                let y = band_start + row_in_band;
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = op(x, y);
                }
            }
        });
}
