#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Keyboard state tracking for DeltaBall.
//!
//! Hosts feed key presses and releases into an [`InputSampler`] as they
//! arrive. Once per frame the simulation takes an immutable [`InputSnapshot`]
//! and derives the movement [`Direction`] from it.

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use deltaball_core::KeyCode;

/// Movement intents recognised by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementKey {
    /// Move towards negative y.
    Up,
    /// Move towards positive y.
    Down,
    /// Move towards negative x.
    Left,
    /// Move towards positive x.
    Right,
}

impl MovementKey {
    /// Every movement key, in declaration order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Key codes bound to the intent: the arrow key first, then its WASD twin.
    #[must_use]
    pub const fn codes(self) -> [&'static str; 2] {
        match self {
            Self::Up => ["ArrowUp", "KeyW"],
            Self::Down => ["ArrowDown", "KeyS"],
            Self::Left => ["ArrowLeft", "KeyA"],
            Self::Right => ["ArrowRight", "KeyD"],
        }
    }
}

/// Unit step direction with each component in `{-1, 0, 1}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Horizontal component.
    pub dx: i8,
    /// Vertical component.
    pub dy: i8,
}

impl Direction {
    /// Direction with no movement on either axis.
    pub const NONE: Self = Self { dx: 0, dy: 0 };

    /// Creates a direction from its components.
    #[must_use]
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    /// Reports whether the direction moves on neither axis.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Immutable copy of the keys held at the moment it was taken.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: BTreeSet<KeyCode>,
}

impl InputSnapshot {
    /// Builds a snapshot directly from a list of held codes.
    #[must_use]
    pub fn from_codes<'a, I>(codes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            held: codes.into_iter().map(KeyCode::from).collect(),
        }
    }

    /// Reports whether the key with the provided code is held.
    #[must_use]
    pub fn is_held(&self, code: &str) -> bool {
        self.held.iter().any(|held| held.as_str() == code)
    }

    /// Reports whether either code bound to the movement key is held.
    #[must_use]
    pub fn is_pressed(&self, key: MovementKey) -> bool {
        key.codes().iter().any(|code| self.is_held(code))
    }

    /// Number of held keys, recognised or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Reports whether no key is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Movement direction implied by the held keys.
    ///
    /// Opposing keys cancel each other out, and keys without a movement
    /// binding are ignored.
    #[must_use]
    pub fn direction(&self) -> Direction {
        let axis = |negative: MovementKey, positive: MovementKey| {
            i8::from(self.is_pressed(positive)) - i8::from(self.is_pressed(negative))
        };

        Direction::new(
            axis(MovementKey::Left, MovementKey::Right),
            axis(MovementKey::Up, MovementKey::Down),
        )
    }
}

/// Mutable set of held keys, updated by host key events.
#[derive(Clone, Debug, Default)]
pub struct InputSampler {
    held: BTreeSet<KeyCode>,
}

impl InputSampler {
    /// Creates a sampler with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the key as held. Repeated presses are idempotent.
    pub fn key_down(&mut self, code: KeyCode) {
        let _ = self.held.insert(code);
    }

    /// Marks the key as released. Releasing an unheld key does nothing.
    pub fn key_up(&mut self, code: &KeyCode) {
        let _ = self.held.remove(code);
    }

    /// Releases every held key.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Copies the current key membership.
    #[must_use]
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            held: self.held.clone(),
        }
    }
}

/// Thread-safe handle to an [`InputSampler`].
///
/// Clones share the same key set, so a producer thread delivering key events
/// and the frame loop sampling them can each hold one.
#[derive(Clone, Debug, Default)]
pub struct SharedInputSampler {
    inner: Arc<Mutex<InputSampler>>,
}

impl SharedInputSampler {
    /// Creates a shared sampler with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the key as held.
    pub fn key_down(&self, code: KeyCode) {
        self.lock().key_down(code);
    }

    /// Marks the key as released.
    pub fn key_up(&self, code: &KeyCode) {
        self.lock().key_up(code);
    }

    /// Releases every held key.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Copies the current key membership.
    #[must_use]
    pub fn snapshot(&self) -> InputSnapshot {
        self.lock().snapshot()
    }

    // The key set stays consistent even if a holder panicked mid-update.
    fn lock(&self) -> MutexGuard<'_, InputSampler> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_movement_key_has_an_arrow_and_a_letter() {
        for key in MovementKey::ALL {
            let [arrow, letter] = key.codes();
            assert!(arrow.starts_with("Arrow"), "{key:?}");
            assert!(letter.starts_with("Key"), "{key:?}");
        }
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let sampler = SharedInputSampler::new();
        sampler.key_down(KeyCode::from("KeyW"));

        let poisoner = sampler.clone();
        let outcome = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().expect("lock is healthy");
            panic!("poison the sampler");
        })
        .join();
        assert!(outcome.is_err());
        assert!(sampler.inner.is_poisoned());

        sampler.key_down(KeyCode::from("KeyD"));
        assert_eq!(sampler.snapshot().direction(), Direction::new(1, -1));
    }

    #[test]
    fn empty_snapshot_has_no_direction() {
        let snapshot = InputSampler::new().snapshot();

        assert!(snapshot.is_empty());
        assert!(snapshot.direction().is_none());
    }
}
