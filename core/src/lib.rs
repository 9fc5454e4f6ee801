#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the DeltaBall prototype.
//!
//! This crate defines the data that flows between adapters, the authoritative
//! world, and the pure systems. Adapters submit [`Command`] values describing
//! desired mutations, the world executes those commands via its `apply` entry
//! point, and then broadcasts [`Event`] values describing what changed.
//! Systems read the immutable [`TileMap`] and [`FrameState`] snapshots and
//! compute the next frame without touching shared state.

use std::{error::Error, fmt};

pub use glam::Vec2;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "DeltaBall";

/// Constants describing the fixed shape of the world.
pub mod consts {
    /// Edge length of a single square tile in world units.
    pub const TILE_LENGTH: f32 = 40.0;
    /// Number of tile columns in the generated map.
    pub const MAP_COLUMNS: u32 = 50;
    /// Number of tile rows in the generated map.
    pub const MAP_ROWS: u32 = 40;
    /// Collision radius of the player circle.
    pub const PLAYER_RADIUS: f32 = 12.0;
    /// Distance travelled per frame while a movement key is held.
    pub const MOVEMENT_SPEED: f32 = 5.0;
    /// Tolerance shaved off the player's bounding square to avoid edge grazing.
    pub const COLLISION_MARGIN: f32 = 2.0;
    /// Chance that an interior tile is filled with a wall.
    pub const WALL_PROBABILITY: f64 = 0.08;
    /// Preferred spawn position of the player, in world units.
    pub const PLAYER_SPAWN: (f32, f32) = (TILE_LENGTH * 5.0, TILE_LENGTH * 5.0);
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Records the size of the host viewport.
    ResizeViewport {
        /// Viewport dimensions reported by the host.
        viewport: Viewport,
    },
    /// Replaces the player and camera positions with a freshly simulated frame.
    AdvanceFrame {
        /// Frame produced by the simulation step.
        frame: FrameState,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that the viewport dimensions changed.
    ViewportResized {
        /// New viewport dimensions.
        viewport: Viewport,
    },
    /// Confirms that the player's center moved.
    PlayerMoved {
        /// Position before the frame was applied.
        from: Vec2,
        /// Position after the frame was applied.
        to: Vec2,
    },
    /// Confirms that the camera offset moved.
    CameraMoved {
        /// Offset before the frame was applied.
        from: Vec2,
        /// Offset after the frame was applied.
        to: Vec2,
    },
}

/// Classification of a single map tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileType {
    /// Walkable ground.
    #[default]
    Floor,
    /// Solid tile that blocks movement.
    Wall,
    /// Walkable tile reserved for visual variation.
    Decoration,
}

impl TileType {
    /// Reports whether the tile blocks movement.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Location of a single tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Inclusive rectangular range of signed tile indices.
///
/// Indices may fall outside the map; callers decide how to treat them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileSpan {
    /// First covered column.
    pub min_column: i64,
    /// Last covered column.
    pub max_column: i64,
    /// First covered row.
    pub min_row: i64,
    /// Last covered row.
    pub max_row: i64,
}

impl TileSpan {
    /// Iterates over every `(column, row)` pair in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> {
        let Self {
            min_column,
            max_column,
            min_row,
            max_row,
        } = *self;
        (min_row..=max_row)
            .flat_map(move |row| (min_column..=max_column).map(move |column| (column, row)))
    }
}

/// Immutable grid of tile classifications.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    columns: u32,
    rows: u32,
    tile_length: f32,
    tiles: Vec<TileType>,
}

impl TileMap {
    /// Creates a map from row-major tiles.
    ///
    /// Returns an error when the tile count does not equal `columns * rows`.
    pub fn from_tiles(
        columns: u32,
        rows: u32,
        tile_length: f32,
        tiles: Vec<TileType>,
    ) -> Result<Self, MapShapeError> {
        let expected = columns as usize * rows as usize;
        if tiles.len() != expected {
            return Err(MapShapeError {
                expected,
                actual: tiles.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            tiles,
        })
    }

    /// Creates a floor map enclosed by a single ring of walls.
    #[must_use]
    pub fn bordered(columns: u32, rows: u32, tile_length: f32) -> Self {
        let tiles = (0..rows)
            .flat_map(|row| {
                (0..columns).map(move |column| {
                    let on_border =
                        column == 0 || row == 0 || column + 1 == columns || row + 1 == rows;
                    if on_border {
                        TileType::Wall
                    } else {
                        TileType::Floor
                    }
                })
            })
            .collect();

        Self {
            columns,
            rows,
            tile_length,
            tiles,
        }
    }

    /// Number of columns contained in the map.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the map.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single tile in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the map in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the map in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Tile stored at the provided coordinate, if it lies within the map.
    #[must_use]
    pub fn tile(&self, coord: TileCoord) -> Option<TileType> {
        self.tile_at(i64::from(coord.column()), i64::from(coord.row()))
    }

    /// Tile stored at signed indices, or `None` when they fall outside the map.
    #[must_use]
    pub fn tile_at(&self, column: i64, row: i64) -> Option<TileType> {
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }

        let index = row as usize * self.columns as usize + column as usize;
        self.tiles.get(index).copied()
    }

    /// Iterates over every tile with its coordinate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, TileType)> + '_ {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = index as u32;
            (TileCoord::new(index % columns, index / columns), *tile)
        })
    }

    /// Counts the tiles of the provided type.
    #[must_use]
    pub fn count(&self, kind: TileType) -> usize {
        self.tiles.iter().filter(|tile| **tile == kind).count()
    }

    /// World-space center of the provided tile.
    #[must_use]
    pub fn tile_center(&self, coord: TileCoord) -> Vec2 {
        Vec2::new(
            (coord.column() as f32 + 0.5) * self.tile_length,
            (coord.row() as f32 + 0.5) * self.tile_length,
        )
    }
}

/// Dimensions of the host drawing surface in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width of the surface.
    pub width: f32,
    /// Height of the surface.
    pub height: f32,
}

impl Viewport {
    /// Creates a new viewport descriptor.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Dimensions expressed as a vector.
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Player and camera positions for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    /// World-space center of the player circle.
    pub player: Vec2,
    /// World-space top-left offset of the camera.
    pub camera: Vec2,
}

impl FrameState {
    /// Creates a new frame state.
    #[must_use]
    pub const fn new(player: Vec2, camera: Vec2) -> Self {
        Self { player, camera }
    }
}

/// Opaque identifier of a physical key, such as `"ArrowUp"` or `"KeyW"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(String);

impl KeyCode {
    /// Creates a key code from its string identifier.
    #[must_use]
    pub fn new<T>(code: T) -> Self
    where
        T: Into<String>,
    {
        Self(code.into())
    }

    /// String identifier of the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised when a tile vector does not match the requested map dimensions.
#[derive(Debug, PartialEq, Eq)]
pub struct MapShapeError {
    /// Number of tiles implied by the dimensions.
    pub expected: usize,
    /// Number of tiles provided.
    pub actual: usize,
}

impl fmt::Display for MapShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "map expects {} tiles but received {}",
            self.expected, self.actual
        )
    }
}

impl Error for MapShapeError {}
