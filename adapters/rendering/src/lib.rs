#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for DeltaBall adapters.
//!
//! Backends own a window and a [`DrawSurface`]. Once per display refresh they
//! collect a [`FrameInput`] and hand it to a [`FrameDriver`], which runs the
//! simulation callback and then draws the [`Scene`] through [`render`].

pub mod driver;
pub mod palette;
mod renderer;
mod surface;

#[cfg(test)]
mod recording;

use anyhow::Result as AnyResult;
use deltaball_core::{FrameState, KeyCode, TileMap, Viewport};

pub use driver::{FrameDriver, FrameStatus, FrameTimings, StopHandle};
pub use renderer::{render, render_debug_overlay, visible_tiles};
pub use surface::{DrawSurface, TranslationStack};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba_u8(red, green, blue, 1.0)
    }

    /// Creates a color from byte RGB values and a fractional alpha.
    #[must_use]
    pub const fn from_rgba_u8(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha,
        }
    }
}

/// Key transition reported by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    /// The key went down.
    Pressed(KeyCode),
    /// The key went up.
    Released(KeyCode),
}

impl KeyEvent {
    /// Code of the key that changed state.
    #[must_use]
    pub fn code(&self) -> &KeyCode {
        match self {
            Self::Pressed(code) | Self::Released(code) => code,
        }
    }

    /// Reports whether this is a press of the key with the provided code.
    #[must_use]
    pub fn is_press_of(&self, code: &str) -> bool {
        matches!(self, Self::Pressed(pressed) if pressed.as_str() == code)
    }
}

/// Input gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInput {
    /// Key transitions observed since the previous frame, in arrival order.
    pub key_events: Vec<KeyEvent>,
    /// Current dimensions of the drawing surface.
    pub viewport: Viewport,
}

impl FrameInput {
    /// Creates a frame input without any key activity.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            key_events: Vec::new(),
            viewport,
        }
    }

    /// Appends a key transition.
    #[must_use]
    pub fn with_event(mut self, event: KeyEvent) -> Self {
        self.key_events.push(event);
        self
    }

    /// Reports whether the key with the provided code was pressed this frame.
    #[must_use]
    pub fn was_pressed(&self, code: &str) -> bool {
        self.key_events.iter().any(|event| event.is_press_of(code))
    }
}

/// Everything the renderer needs to draw a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Static tile layout.
    pub map: TileMap,
    /// Player and camera positions of the frame being drawn.
    pub frame: FrameState,
    /// Dimensions of the drawing surface.
    pub viewport: Viewport,
    /// Seed the map was generated from, shown by the debug overlay.
    pub seed: Option<u64>,
    /// Whether the debug overlay is drawn on top of the frame.
    pub debug_overlay: bool,
}

impl Scene {
    /// Creates a new scene descriptor with the debug overlay hidden.
    #[must_use]
    pub fn new(map: TileMap, frame: FrameState, viewport: Viewport) -> Self {
        Self {
            map,
            frame,
            viewport,
            seed: None,
            debug_overlay: false,
        }
    }

    /// Records the seed shown by the debug overlay.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the initial visibility of the debug overlay.
    #[must_use]
    pub fn with_debug_overlay(mut self, visible: bool) -> Self {
        self.debug_overlay = visible;
        self
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting DeltaBall scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the input captured by the
    /// adapter for the frame and may mutate the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(&FrameInput, &mut Scene) + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_channels_are_normalised() {
        let color = Color::from_rgba_u8(255, 0, 51, 0.5);

        assert_eq!(color, Color::new(1.0, 0.0, 0.2, 0.5));
        assert_eq!(Color::from_rgb_u8(0, 0, 0).alpha, 1.0);
    }

    #[test]
    fn frame_input_detects_presses_but_not_releases() {
        let input = FrameInput::new(Viewport::new(10.0, 10.0))
            .with_event(KeyEvent::Released(KeyCode::from("F3")))
            .with_event(KeyEvent::Pressed(KeyCode::from("Escape")));

        assert!(input.was_pressed("Escape"));
        assert!(!input.was_pressed("F3"));
        assert_eq!(input.key_events[0].code().as_str(), "F3");
    }
}
