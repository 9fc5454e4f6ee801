//! Colors used to draw the map and the player.

use crate::Color;

/// Clear color behind the map.
pub const BACKGROUND: Color = Color::from_rgb_u8(0x0f, 0x0f, 0x1b);
/// Floor tiles whose column and row sum to an even number.
pub const FLOOR_LIGHT: Color = Color::from_rgb_u8(0x1a, 0x1a, 0x2e);
/// Floor tiles whose column and row sum to an odd number.
pub const FLOOR_DARK: Color = Color::from_rgb_u8(0x16, 0x21, 0x3e);
/// Fill of wall tiles.
pub const WALL: Color = Color::from_rgb_u8(0x00, 0x00, 0x00);
/// Inset outline drawn on every wall tile.
pub const WALL_BORDER: Color = Color::from_rgb_u8(0xe9, 0x45, 0x60);
/// Player body.
pub const PLAYER: Color = Color::from_rgb_u8(0x00, 0xff, 0xff);
/// Translucent ellipse under the player.
pub const PLAYER_SHADOW: Color = Color::from_rgba_u8(0x00, 0xff, 0xff, 0.3);
/// Specular highlight on the player.
pub const PLAYER_HIGHLIGHT: Color = Color::from_rgba_u8(0xff, 0xff, 0xff, 0.6);
/// Debug overlay text.
pub const OVERLAY_TEXT: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);
