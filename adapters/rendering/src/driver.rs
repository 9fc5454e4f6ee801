//! Per-refresh orchestration of the update callback and the renderer.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use crate::{render, render_debug_overlay, DrawSurface, FrameInput, Scene};

const QUIT_KEY: &str = "Escape";
const DEBUG_OVERLAY_KEY: &str = "F3";

/// Outcome of driving a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame ran; the host should schedule another one.
    Continue,
    /// A stop was requested; the host should leave its loop.
    Stopped,
}

/// Clonable request to stop a [`FrameDriver`].
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Asks the driver to stop before its next frame.
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Reports whether a stop was requested.
    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Wall-clock cost of the most recent frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameTimings {
    /// Time spent inside the update callback.
    pub simulation: Duration,
    /// Time spent issuing draw calls.
    pub render: Duration,
}

/// Runs the update callback and then renders the scene, once per call.
#[derive(Debug)]
pub struct FrameDriver<F> {
    scene: Scene,
    update: F,
    stop: StopHandle,
    timings: FrameTimings,
}

impl<F> FrameDriver<F>
where
    F: FnMut(&FrameInput, &mut Scene),
{
    /// Creates a driver that owns the scene and the update callback.
    #[must_use]
    pub fn new(scene: Scene, update: F) -> Self {
        Self {
            scene,
            update,
            stop: StopHandle::default(),
            timings: FrameTimings::default(),
        }
    }

    /// Handle that stops this driver when triggered.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Scene as of the last driven frame.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Timings of the last driven frame.
    #[must_use]
    pub fn timings(&self) -> FrameTimings {
        self.timings
    }

    /// Drives a single frame.
    ///
    /// Pressing `Escape` stops the driver. Pressing `F3` toggles the debug
    /// overlay. Once stopped, neither the callback nor the renderer runs again.
    pub fn drive<S>(&mut self, input: FrameInput, surface: &mut S) -> FrameStatus
    where
        S: DrawSurface + ?Sized,
    {
        if input.was_pressed(QUIT_KEY) && !self.stop.is_stop_requested() {
            log::info!("quit key pressed, stopping frame driver");
            self.stop.request_stop();
        }
        if self.stop.is_stop_requested() {
            return FrameStatus::Stopped;
        }

        if input.was_pressed(DEBUG_OVERLAY_KEY) {
            self.scene.debug_overlay = !self.scene.debug_overlay;
            log::debug!("debug overlay visible: {}", self.scene.debug_overlay);
        }
        self.scene.viewport = input.viewport;

        let simulation_start = Instant::now();
        (self.update)(&input, &mut self.scene);
        let simulation = simulation_start.elapsed();

        let render_start = Instant::now();
        let Scene {
            map,
            frame,
            viewport,
            debug_overlay,
            ..
        } = &self.scene;
        render(surface, map, frame.player, frame.camera, *viewport);
        if *debug_overlay {
            render_debug_overlay(surface, &self.scene);
        }
        self.timings = FrameTimings {
            simulation,
            render: render_start.elapsed(),
        };

        FrameStatus::Continue
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{
        recording::{DrawOp, RecordingSurface},
        KeyEvent,
    };
    use deltaball_core::{FrameState, KeyCode, TileMap, Vec2, Viewport};

    const VIEWPORT: Viewport = Viewport::new(400.0, 300.0);

    fn scene() -> Scene {
        let frame = FrameState::new(Vec2::new(100.0, 100.0), Vec2::ZERO);
        Scene::new(TileMap::bordered(10, 10, 40.0), frame, VIEWPORT)
    }

    fn press(code: &str) -> FrameInput {
        FrameInput::new(VIEWPORT).with_event(KeyEvent::Pressed(KeyCode::from(code)))
    }

    #[test]
    fn update_runs_before_render() {
        let mut driver = FrameDriver::new(scene(), |_input: &FrameInput, scene: &mut Scene| {
            scene.frame.player = Vec2::new(140.0, 100.0);
        });
        let mut surface = RecordingSurface::new(VIEWPORT);

        let status = driver.drive(FrameInput::new(VIEWPORT), &mut surface);

        assert_eq!(status, FrameStatus::Continue);
        assert!(surface.ops.contains(&DrawOp::FillEllipse {
            center_x: 140.0,
            center_y: 100.0,
            radius_x: 12.0,
            radius_y: 12.0,
            color: crate::palette::PLAYER,
        }));
    }

    #[test]
    fn stop_handle_halts_updates_and_rendering() {
        let updates = Rc::new(Cell::new(0));
        let counter = Rc::clone(&updates);
        let mut driver = FrameDriver::new(scene(), move |_: &FrameInput, _: &mut Scene| {
            counter.set(counter.get() + 1);
        });
        let handle = driver.stop_handle();
        let mut surface = RecordingSurface::new(VIEWPORT);

        assert_eq!(
            driver.drive(FrameInput::new(VIEWPORT), &mut surface),
            FrameStatus::Continue
        );
        handle.request_stop();
        surface.ops.clear();

        for _ in 0..3 {
            assert_eq!(
                driver.drive(FrameInput::new(VIEWPORT), &mut surface),
                FrameStatus::Stopped
            );
        }
        assert_eq!(updates.get(), 1);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn escape_stops_the_driver() {
        let mut driver = FrameDriver::new(scene(), |_: &FrameInput, _: &mut Scene| {});
        let mut surface = RecordingSurface::new(VIEWPORT);

        assert_eq!(driver.drive(press("Escape"), &mut surface), FrameStatus::Stopped);
        assert!(driver.stop_handle().is_stop_requested());
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn f3_toggles_the_debug_overlay() {
        let scene = scene().with_seed(Some(3));
        let mut driver = FrameDriver::new(scene, |_: &FrameInput, _: &mut Scene| {});
        let mut surface = RecordingSurface::new(VIEWPORT);

        let _ = driver.drive(press("F3"), &mut surface);
        assert!(driver.scene().debug_overlay);
        assert_eq!(surface.texts().len(), 3);
        // Overlay text is drawn in screen space, after the map translation is undone.
        let restore = surface
            .ops
            .iter()
            .position(|op| *op == DrawOp::Restore)
            .expect("render restores the translation");
        let first_text = surface
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::Text { .. }))
            .expect("overlay drew text");
        assert!(first_text > restore);

        surface.ops.clear();
        let _ = driver.drive(press("F3"), &mut surface);
        assert!(!driver.scene().debug_overlay);
        assert!(surface.texts().is_empty());
    }

    #[test]
    fn driver_tracks_the_reported_viewport() {
        let mut driver = FrameDriver::new(scene(), |input: &FrameInput, scene: &mut Scene| {
            assert_eq!(scene.viewport, input.viewport);
        });
        let resized = Viewport::new(1024.0, 768.0);
        let mut surface = RecordingSurface::new(resized);

        let _ = driver.drive(FrameInput::new(resized), &mut surface);

        assert_eq!(driver.scene().viewport, resized);
        assert_eq!(
            surface.ops[0],
            DrawOp::FillRect {
                x: 0.0,
                y: 0.0,
                width: 1024.0,
                height: 768.0,
                color: crate::palette::BACKGROUND,
            }
        );
    }
}
