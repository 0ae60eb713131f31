//! Block grid generation
//!
//! The type sequence is shuffled once per session and dealt to cells in
//! row-major order. A grid with more cells than tokens wraps around the
//! shuffled sequence; extra tokens in a longer sequence go unused.

use rand::Rng;
use rand::seq::SliceRandom;

use super::collision::Rect;
use super::state::{Block, BlockGrid, BlockKind};
use crate::config::GridConfig;

/// Uniform random permutation of the type sequence (Fisher-Yates)
pub fn shuffle_kinds<R: Rng + ?Sized>(kinds: &[BlockKind], rng: &mut R) -> Vec<BlockKind> {
    let mut shuffled = kinds.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Pixel rectangle of the cell at `(row, col)`
pub fn cell_rect(grid: &GridConfig, row: usize, col: usize) -> Rect {
    Rect::new(
        grid.offset_left + col as f32 * (grid.block_width + grid.padding),
        grid.offset_top + row as f32 * (grid.block_height + grid.padding),
        grid.block_width,
        grid.block_height,
    )
}

/// Build a freshly shuffled grid. `kinds` must be non-empty (checked by config validation).
pub fn generate_grid<R: Rng + ?Sized>(
    grid: &GridConfig,
    kinds: &[BlockKind],
    rng: &mut R,
) -> BlockGrid {
    let shuffled = shuffle_kinds(kinds, rng);
    let cells = grid.cell_count();

    if shuffled.len() < cells {
        log::warn!(
            "Block type sequence has {} entries for {} cells; wrapping around",
            shuffled.len(),
            cells
        );
    } else if shuffled.len() > cells {
        log::warn!(
            "Block type sequence has {} entries for {} cells; {} unused",
            shuffled.len(),
            cells,
            shuffled.len() - cells
        );
    }

    let mut blocks = Vec::with_capacity(cells);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let index = row * grid.cols + col;
            let kind = shuffled[index % shuffled.len()];
            blocks.push(Block::new(row, col, cell_rect(grid, row, col), kind));
        }
    }

    BlockGrid {
        rows: grid.rows,
        cols: grid.cols,
        blocks,
    }
}
