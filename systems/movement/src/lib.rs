#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic per-frame simulation step for the player and camera.

use deltaball_core::{
    consts::{MOVEMENT_SPEED, PLAYER_RADIUS},
    FrameState, TileMap, Vec2, Viewport,
};
use deltaball_system_collision::is_blocked;
use deltaball_system_input::{Direction, InputSnapshot};

/// Advances the player and camera by a single frame.
///
/// Movement is resolved one axis at a time: the horizontal move is committed
/// first when it is free, and the vertical move is then tested from the
/// possibly updated position. A wall on one axis therefore never stops motion
/// along the other.
#[must_use]
pub fn step(
    input: &InputSnapshot,
    frame: FrameState,
    map: &TileMap,
    viewport: Viewport,
) -> FrameState {
    let velocity = velocity(input.direction());
    let mut player = frame.player;

    if velocity.x != 0.0 {
        let candidate = Vec2::new(player.x + velocity.x, player.y);
        if !is_blocked(map, candidate, PLAYER_RADIUS) {
            player = candidate;
        }
    }

    if velocity.y != 0.0 {
        let candidate = Vec2::new(player.x, player.y + velocity.y);
        if !is_blocked(map, candidate, PLAYER_RADIUS) {
            player = candidate;
        }
    }

    FrameState::new(player, clamp_camera(player, map, viewport))
}

/// Per-frame displacement for a direction.
///
/// Diagonals are normalized so every non-zero direction covers
/// [`MOVEMENT_SPEED`] units.
#[must_use]
pub fn velocity(direction: Direction) -> Vec2 {
    if direction.is_none() {
        return Vec2::ZERO;
    }

    Vec2::new(f32::from(direction.dx), f32::from(direction.dy)).normalize() * MOVEMENT_SPEED
}

/// Camera offset that centers the player without showing anything past the map.
///
/// An axis on which the viewport is larger than the map is pinned to zero.
#[must_use]
pub fn clamp_camera(player: Vec2, map: &TileMap, viewport: Viewport) -> Vec2 {
    let target = player - viewport.extent() / 2.0;
    let limit = Vec2::new(map.width(), map.height()) - viewport.extent();

    target.min(limit).max(Vec2::ZERO)
}
