use deltaball_core::{consts::PLAYER_RADIUS, TileMap, TileSpan, TileType, Vec2, Viewport};

use crate::{palette, DrawSurface, Scene};

const WALL_BORDER_INSET: f32 = 2.0;
const WALL_BORDER_WIDTH: f32 = 2.0;

const OVERLAY_FONT_SIZE: f32 = 18.0;
const OVERLAY_MARGIN: f32 = 10.0;

/// Tile indices that intersect the viewport, plus one tile of overscan.
///
/// The span is not clamped to the map; callers skip indices without a tile.
#[must_use]
pub fn visible_tiles(camera: Vec2, viewport: Viewport, tile_length: f32) -> TileSpan {
    let min_column = (camera.x / tile_length).floor() as i64;
    let min_row = (camera.y / tile_length).floor() as i64;

    TileSpan {
        min_column,
        max_column: min_column + (viewport.width / tile_length).ceil() as i64 + 1,
        min_row,
        max_row: min_row + (viewport.height / tile_length).ceil() as i64 + 1,
    }
}

/// Draws the visible part of the map and the player.
///
/// The camera offset is floored before translating so tile edges land on
/// whole pixels.
pub fn render<S>(surface: &mut S, map: &TileMap, player: Vec2, camera: Vec2, viewport: Viewport)
where
    S: DrawSurface + ?Sized,
{
    surface.fill_rect(0.0, 0.0, viewport.width, viewport.height, palette::BACKGROUND);

    surface.save();
    surface.translate(-camera.x.floor(), -camera.y.floor());

    let tile_length = map.tile_length();
    for (column, row) in visible_tiles(camera, viewport, tile_length).iter() {
        let Some(tile) = map.tile_at(column, row) else {
            continue;
        };
        draw_tile(surface, tile, column, row, tile_length);
    }

    draw_player(surface, player, PLAYER_RADIUS);

    surface.restore();
}

fn draw_tile<S>(surface: &mut S, tile: TileType, column: i64, row: i64, tile_length: f32)
where
    S: DrawSurface + ?Sized,
{
    let x = column as f32 * tile_length;
    let y = row as f32 * tile_length;

    match tile {
        TileType::Wall => {
            surface.fill_rect(x, y, tile_length, tile_length, palette::WALL);
            surface.stroke_rect(
                x + WALL_BORDER_INSET,
                y + WALL_BORDER_INSET,
                tile_length - 2.0 * WALL_BORDER_INSET,
                tile_length - 2.0 * WALL_BORDER_INSET,
                WALL_BORDER_WIDTH,
                palette::WALL_BORDER,
            );
        }
        TileType::Floor | TileType::Decoration => {
            let color = if (column + row) % 2 == 0 {
                palette::FLOOR_LIGHT
            } else {
                palette::FLOOR_DARK
            };
            surface.fill_rect(x, y, tile_length, tile_length, color);
        }
    }
}

fn draw_player<S>(surface: &mut S, center: Vec2, radius: f32)
where
    S: DrawSurface + ?Sized,
{
    surface.fill_ellipse(
        center.x,
        center.y + radius * 0.8,
        radius,
        radius * 0.4,
        palette::PLAYER_SHADOW,
    );
    surface.fill_ellipse(center.x, center.y, radius, radius, palette::PLAYER);
    surface.fill_ellipse(
        center.x - radius * 0.3,
        center.y - radius * 0.3,
        radius * 0.3,
        radius * 0.3,
        palette::PLAYER_HIGHLIGHT,
    );
}

/// Draws the debug readout in screen space.
pub fn render_debug_overlay<S>(surface: &mut S, scene: &Scene)
where
    S: DrawSurface + ?Sized,
{
    let player = scene.frame.player;
    let camera = scene.frame.camera;
    let seed = scene
        .seed
        .map_or_else(|| String::from("none"), |seed| format!("{seed:#x}"));
    let lines = [
        format!("player ({:.1}, {:.1})", player.x, player.y),
        format!("camera ({:.1}, {:.1})", camera.x, camera.y),
        format!("seed {seed}"),
    ];

    for (index, line) in lines.iter().enumerate() {
        let baseline = OVERLAY_MARGIN + OVERLAY_FONT_SIZE * (index as f32 + 1.0);
        surface.draw_text(
            line,
            OVERLAY_MARGIN,
            baseline,
            OVERLAY_FONT_SIZE,
            palette::OVERLAY_TEXT,
        );
    }
}
