//! Map generation: deterministic border and outline, random interior fill.

use deltaball_core::{consts::WALL_PROBABILITY, TileMap, TileType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Tile box whose edge cells are walled, expressed as exclusive bounds.
///
/// A cell is walled when it lies strictly inside the bounds and sits on one of
/// the box's edge lines (`left`, `right - 1`, `top` or `bottom - 1`). The left
/// and top lines never pass the strict test, so only the right column and the
/// bottom row are walled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outline {
    /// Exclusive lower column bound.
    pub left: u32,
    /// Exclusive upper column bound.
    pub right: u32,
    /// Exclusive lower row bound.
    pub top: u32,
    /// Exclusive upper row bound.
    pub bottom: u32,
}

/// Structure placed in the middle of every generated map.
pub const CENTRAL_OUTLINE: Outline = Outline {
    left: 20,
    right: 30,
    top: 15,
    bottom: 25,
};

impl Outline {
    /// Reports whether the tile is one of the outline's walls.
    #[must_use]
    pub const fn contains(&self, column: u32, row: u32) -> bool {
        let inside =
            column > self.left && column < self.right && row > self.top && row < self.bottom;
        inside
            && (column == self.left
                || column + 1 == self.right
                || row == self.top
                || row + 1 == self.bottom)
    }
}

/// Generates a map using the provided random source.
///
/// Every interior tile consumes exactly one sample in row-major order, so a
/// seeded source always reproduces the same layout.
pub fn generate_map<R>(columns: u32, rows: u32, tile_length: f32, rng: &mut R) -> TileMap
where
    R: Rng + ?Sized,
{
    let mut tiles = Vec::with_capacity(columns as usize * rows as usize);

    for row in 0..rows {
        for column in 0..columns {
            let on_border = column == 0 || row == 0 || column + 1 == columns || row + 1 == rows;
            let tile = if on_border {
                TileType::Wall
            } else {
                let random_wall = rng.gen_bool(WALL_PROBABILITY);
                if random_wall || CENTRAL_OUTLINE.contains(column, row) {
                    TileType::Wall
                } else {
                    TileType::Floor
                }
            };
            tiles.push(tile);
        }
    }

    // The vector is sized from the same dimensions, so the shape check cannot fail.
    TileMap::from_tiles(columns, rows, tile_length, tiles)
        .unwrap_or_else(|_| TileMap::bordered(columns, rows, tile_length))
}

/// Generates a map from a seed using a ChaCha stream.
#[must_use]
pub fn generate_seeded(columns: u32, rows: u32, tile_length: f32, seed: u64) -> TileMap {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let map = generate_map(columns, rows, tile_length, &mut rng);
    log::info!(
        "generated {}x{} map from seed {seed:#x} with {} walls",
        columns,
        rows,
        map.count(TileType::Wall)
    );
    map
}
