//! Translation of macroquad key polling into host-neutral key events.

use deltaball_core::KeyCode as HostKeyCode;
use deltaball_rendering::KeyEvent;
use macroquad::input::{is_key_down, is_key_pressed, is_key_released, KeyCode};

/// Keys the adapter watches, paired with their browser-style code names.
const KEY_TABLE: [(KeyCode, &str); 10] = [
    (KeyCode::Up, "ArrowUp"),
    (KeyCode::Down, "ArrowDown"),
    (KeyCode::Left, "ArrowLeft"),
    (KeyCode::Right, "ArrowRight"),
    (KeyCode::W, "KeyW"),
    (KeyCode::A, "KeyA"),
    (KeyCode::S, "KeyS"),
    (KeyCode::D, "KeyD"),
    (KeyCode::Escape, "Escape"),
    (KeyCode::F3, "F3"),
];

/// Browser-style code for a macroquad key, when the adapter watches it.
#[must_use]
pub fn browser_code(key: KeyCode) -> Option<&'static str> {
    KEY_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, code)| *code)
}

/// Every browser-style code the adapter can report.
pub fn watched_codes() -> impl Iterator<Item = &'static str> {
    KEY_TABLE.iter().map(|(_, code)| *code)
}

/// What macroquad reported for one key during the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct KeySample {
    pub(crate) pressed: bool,
    pub(crate) released: bool,
    pub(crate) down: bool,
}

/// Turns per-frame key polling into an ordered stream of transitions.
///
/// After each poll the tracked state of every key equals what macroquad
/// reports as held, even when a key was tapped or re-pressed within a frame.
#[derive(Debug, Default)]
pub(crate) struct KeyTracker {
    held: [bool; KEY_TABLE.len()],
}

impl KeyTracker {
    /// Collects the key transitions macroquad observed since the last frame.
    pub(crate) fn poll(&mut self) -> Vec<KeyEvent> {
        self.update(|key| KeySample {
            pressed: is_key_pressed(key),
            released: is_key_released(key),
            down: is_key_down(key),
        })
    }

    fn update<S>(&mut self, mut sample: S) -> Vec<KeyEvent>
    where
        S: FnMut(KeyCode) -> KeySample,
    {
        let mut events = Vec::new();
        for ((key, code), held) in KEY_TABLE.iter().zip(self.held.iter_mut()) {
            let KeySample {
                pressed,
                released,
                down,
            } = sample(*key);
            let code = HostKeyCode::from(*code);

            if *held && released {
                events.push(KeyEvent::Released(code.clone()));
                *held = false;
            }
            if pressed && !*held {
                events.push(KeyEvent::Pressed(code.clone()));
                *held = true;
            }
            if *held != down {
                events.push(if down {
                    KeyEvent::Pressed(code)
                } else {
                    KeyEvent::Released(code)
                });
                *held = down;
            }
        }
        events
    }
}
