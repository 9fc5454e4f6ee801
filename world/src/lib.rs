#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for DeltaBall.

mod generation;

use deltaball_core::{
    consts::{MAP_COLUMNS, MAP_ROWS, PLAYER_RADIUS, PLAYER_SPAWN, TILE_LENGTH},
    Command, Event, FrameState, TileCoord, TileMap, Vec2, Viewport, WELCOME_BANNER,
};
use deltaball_system_collision::is_blocked;

pub use generation::{generate_map, generate_seeded, Outline, CENTRAL_OUTLINE};

/// Represents the authoritative DeltaBall world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    map: TileMap,
    seed: Option<u64>,
    frame: FrameState,
    viewport: Viewport,
}

impl World {
    /// Creates a world around an existing map.
    ///
    /// The player starts at the preferred spawn point, or at the closest free
    /// tile center when that point is blocked. The camera starts at the origin
    /// and follows the player from the first advanced frame onwards.
    #[must_use]
    pub fn new(map: TileMap, viewport: Viewport) -> Self {
        let preferred = Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1);
        let player = find_spawn(&map, preferred, PLAYER_RADIUS);
        Self {
            banner: WELCOME_BANNER,
            map,
            seed: None,
            frame: FrameState::new(player, Vec2::ZERO),
            viewport,
        }
    }

    /// Generates the standard map from the provided seed and wraps it in a world.
    #[must_use]
    pub fn generate(seed: u64, viewport: Viewport) -> Self {
        let map = generate_seeded(MAP_COLUMNS, MAP_ROWS, TILE_LENGTH, seed);
        let mut world = Self::new(map, viewport);
        world.seed = Some(seed);
        world
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Events are only emitted for values that actually changed.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ResizeViewport { viewport } => {
            if world.viewport != viewport {
                world.viewport = viewport;
                out_events.push(Event::ViewportResized { viewport });
            }
        }
        Command::AdvanceFrame { frame } => {
            let previous = world.frame;
            world.frame = frame;

            if previous.player != frame.player {
                out_events.push(Event::PlayerMoved {
                    from: previous.player,
                    to: frame.player,
                });
            }
            if previous.camera != frame.camera {
                out_events.push(Event::CameraMoved {
                    from: previous.camera,
                    to: frame.camera,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use deltaball_core::{FrameState, TileMap, Vec2, Viewport};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the world's tile map.
    #[must_use]
    pub fn map(world: &World) -> &TileMap {
        &world.map
    }

    /// Player and camera positions of the most recent frame.
    #[must_use]
    pub fn frame(world: &World) -> FrameState {
        world.frame
    }

    /// World-space center of the player.
    #[must_use]
    pub fn player(world: &World) -> Vec2 {
        world.frame.player
    }

    /// World-space top-left offset of the camera.
    #[must_use]
    pub fn camera(world: &World) -> Vec2 {
        world.frame.camera
    }

    /// Last viewport reported by the host.
    #[must_use]
    pub fn viewport(world: &World) -> Viewport {
        world.viewport
    }

    /// Seed the map was generated from, if it was generated at all.
    #[must_use]
    pub fn seed(world: &World) -> Option<u64> {
        world.seed
    }
}

/// Resolves a spawn position for a circle of the provided radius.
///
/// Returns `preferred` when it is free. Otherwise tile centers are examined in
/// square rings of growing distance around the preferred tile, and the free
/// center closest to `preferred` within the first ring that has one wins.
/// When the whole map is blocked the preferred position is returned unchanged.
#[must_use]
pub fn find_spawn(map: &TileMap, preferred: Vec2, radius: f32) -> Vec2 {
    if !is_blocked(map, preferred, radius) {
        return preferred;
    }

    let tile_length = map.tile_length();
    let origin_column = (preferred.x / tile_length).floor() as i64;
    let origin_row = (preferred.y / tile_length).floor() as i64;
    let max_ring = i64::from(map.columns().max(map.rows()));

    for ring in 1..=max_ring {
        let mut best: Option<(f32, Vec2)> = None;

        for row in (origin_row - ring)..=(origin_row + ring) {
            for column in (origin_column - ring)..=(origin_column + ring) {
                let on_ring =
                    (row - origin_row).abs() == ring || (column - origin_column).abs() == ring;
                if !on_ring || map.tile_at(column, row).is_none() {
                    continue;
                }

                let center = map.tile_center(TileCoord::new(column as u32, row as u32));
                if is_blocked(map, center, radius) {
                    continue;
                }

                let distance = center.distance_squared(preferred);
                if best.map_or(true, |(closest, _)| distance < closest) {
                    best = Some((distance, center));
                }
            }
        }

        if let Some((_, center)) = best {
            log::warn!(
                "spawn point ({}, {}) is blocked, relocating player to ({}, {})",
                preferred.x,
                preferred.y,
                center.x,
                center.y
            );
            return center;
        }
    }

    log::warn!(
        "no free tile found for spawn point ({}, {})",
        preferred.x,
        preferred.y
    );
    preferred
}
