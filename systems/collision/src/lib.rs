#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tile-grid collision queries for the player circle.
//!
//! The circle is approximated by an axis-aligned square whose half-width is the
//! radius minus [`COLLISION_MARGIN`], which lets the player slip past tile
//! corners it would otherwise graze.

use deltaball_core::{consts::COLLISION_MARGIN, TileMap, TileSpan, Vec2};

/// Tile indices overlapped by the collision square of a circle.
///
/// Indices are signed and may fall outside the map.
#[must_use]
pub fn covered_tiles(map: &TileMap, center: Vec2, radius: f32) -> TileSpan {
    let half_width = radius - COLLISION_MARGIN;
    let tile_length = map.tile_length();
    let index = |edge: f32| (edge / tile_length).floor() as i64;

    TileSpan {
        min_column: index(center.x - half_width),
        max_column: index(center.x + half_width),
        min_row: index(center.y - half_width),
        max_row: index(center.y + half_width),
    }
}

/// Reports whether a circle at `center` would overlap a wall or leave the map.
#[must_use]
pub fn is_blocked(map: &TileMap, center: Vec2, radius: f32) -> bool {
    covered_tiles(map, center, radius)
        .iter()
        .any(|(column, row)| match map.tile_at(column, row) {
            Some(tile) => tile.is_solid(),
            None => true,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covered_tiles_shrinks_by_the_margin() {
        let map = TileMap::bordered(10, 10, 40.0);

        // Half-width 10 keeps a circle centered at (60, 60) inside tile (1, 1).
        let span = covered_tiles(&map, Vec2::new(60.0, 60.0), 12.0);
        assert_eq!(
            span,
            TileSpan {
                min_column: 1,
                max_column: 1,
                min_row: 1,
                max_row: 1,
            }
        );

        let straddling = covered_tiles(&map, Vec2::new(75.0, 60.0), 12.0);
        assert_eq!(straddling.min_column, 1);
        assert_eq!(straddling.max_column, 2);
    }

    #[test]
    fn negative_edges_round_towards_negative_infinity() {
        let map = TileMap::bordered(10, 10, 40.0);
        let span = covered_tiles(&map, Vec2::new(5.0, 5.0), 12.0);

        assert_eq!(span.min_column, -1);
        assert_eq!(span.min_row, -1);
    }
}
