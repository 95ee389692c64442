/// Value-keyed memoization of built tiles
pub mod cache;
/// Grid layout and tile repetition across a surface
pub mod painter;
/// Rotation transform and bilinear sampling
pub mod sampling;
/// Tile construction from a source image and motif parameters
pub mod tile;

pub use cache::{TileCache, TileKey};
pub use painter::{Offset, PatternGrid, paint_pattern};
pub use tile::{Tile, TileSpec, build_tile, build_tile_with_fill};
