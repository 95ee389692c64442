//! Fills a surface by repeating a tile on a translated square grid
//!
//! Painting mutates the target in place and never clears it. Callers that
//! want a fresh frame own the clear or background fill before calling
//! [`paint_pattern`]; the preview surface and the export pipeline both do.

use crate::composite::sampling::composite_over;
use crate::composite::tile::Tile;
use image::RgbaImage;

/// Position of the tile grid's anchor within the target's coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Horizontal anchor in pixels
    pub x: i64,
    /// Vertical anchor in pixels
    pub y: i64,
}

impl Offset {
    /// Create an offset
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Grid of tile placements covering a target surface
///
/// The grid starts one tile before the anchor's wrapped position and spans
/// two extra cells per axis, so it always over-covers the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternGrid {
    /// Top-left corner of the first cell, never positive
    pub start: [i64; 2],
    /// Side of every cell in pixels
    pub tile_size: u32,
    /// Number of columns drawn
    pub cols: u32,
    /// Number of rows drawn
    pub rows: u32,
}

impl PatternGrid {
    /// Lay out the grid for a `width × height` target
    ///
    /// A zero `tile_size` yields an empty grid.
    pub fn new(width: u32, height: u32, tile_size: u32, offset: Offset) -> Self {
        if tile_size == 0 {
            return Self {
                start: [0, 0],
                tile_size,
                cols: 0,
                rows: 0,
            };
        }

        let size = i64::from(tile_size);
        let start = [
            offset.x.rem_euclid(size) - size,
            offset.y.rem_euclid(size) - size,
        ];

        Self {
            start,
            tile_size,
            cols: width.div_ceil(tile_size) + 2,
            rows: height.div_ceil(tile_size) + 2,
        }
    }

    /// Top-left corner of every cell, row by row
    pub fn cell_origins(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let size = i64::from(self.tile_size);
        (0..i64::from(self.rows)).flat_map(move |row| {
            (0..i64::from(self.cols))
                .map(move |col| (self.start[0] + col * size, self.start[1] + row * size))
        })
    }
}

/// Repeat `tile` across `target`, anchored at `offset`
///
/// Each copy is composited source-over at its grid cell without clipping;
/// the target's own bounds discard whatever falls outside. Copies are pure
/// translations of one another, so continuity across tile edges holds only
/// as far as the tile's own edges agree.
pub fn paint_pattern(target: &mut RgbaImage, tile: &Tile, offset: Offset) -> PatternGrid {
    let grid = PatternGrid::new(target.width(), target.height(), tile.size(), offset);

    for (x, y) in grid.cell_origins() {
        draw_tile(target, tile.pixels(), x, y);
    }

    grid
}

/// Composite `tile` with its top-left corner at `(x, y)`, clipped to `target`
fn draw_tile(target: &mut RgbaImage, tile: &RgbaImage, x: i64, y: i64) {
    let (target_w, target_h) = (i64::from(target.width()), i64::from(target.height()));
    let (tile_w, tile_h) = (i64::from(tile.width()), i64::from(tile.height()));

    let x_span = x.max(0)..(x + tile_w).min(target_w);
    let y_span = y.max(0)..(y + tile_h).min(target_h);

    for ty in y_span {
        for tx in x_span.clone() {
            let src = *tile.get_pixel((tx - x) as u32, (ty - y) as u32);
            composite_over(target.get_pixel_mut(tx as u32, ty as u32), src);
        }
    }
}
