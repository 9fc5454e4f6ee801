#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for DeltaBall.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

mod keys;
mod surface;

use std::{collections::VecDeque, fmt, time::Duration};

use anyhow::{Context, Result};
use deltaball_core::Viewport;
use deltaball_rendering::{
    FrameDriver, FrameInput, FrameStatus, FrameTimings, Presentation, RenderingBackend, Scene,
};

pub use self::keys::{browser_code, watched_codes};
use self::{keys::KeyTracker, surface::MacroquadSurface};

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const REPORT_INTERVAL: Duration = Duration::from_secs(1);
const TRAILING_WINDOW: Duration = Duration::from_secs(10);

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_width: u32,
    window_height: u32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures the initial window size in logical pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }
}

/// Frame rate and average step costs over the last reporting interval.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsReport {
    fps: f32,
    trailing_fps: f32,
    timings: FrameTimings,
}

impl fmt::Display for FpsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FPS: {:.2} (10s avg: {:.2}) | sim: {:>6.2}ms render: {:>6.2}ms",
            self.fps,
            self.trailing_fps,
            self.timings.simulation.as_secs_f64() * 1_000.0,
            self.timings.render.as_secs_f64() * 1_000.0,
        )
    }
}

/// Accumulates frame durations into once-per-second reports.
#[derive(Debug, Default)]
struct FpsCounter {
    interval_elapsed: Duration,
    interval_frames: u32,
    interval_timings: FrameTimings,
    trailing: VecDeque<Duration>,
    trailing_total: Duration,
}

impl FpsCounter {
    fn record(&mut self, frame: Duration, timings: FrameTimings) -> Option<FpsReport> {
        self.trailing.push_back(frame);
        self.trailing_total += frame;
        while self.trailing_total > TRAILING_WINDOW {
            let Some(oldest) = self.trailing.pop_front() else {
                break;
            };
            self.trailing_total = self.trailing_total.saturating_sub(oldest);
        }

        self.interval_elapsed += frame;
        self.interval_frames = self.interval_frames.saturating_add(1);
        self.interval_timings.simulation += timings.simulation;
        self.interval_timings.render += timings.render;
        if self.interval_elapsed < REPORT_INTERVAL {
            return None;
        }

        let frames = self.interval_frames;
        let fps = frames as f32 / self.interval_elapsed.as_secs_f32();
        let trailing_seconds = self.trailing_total.as_secs_f32();
        let trailing_fps = if trailing_seconds > 0.0 {
            self.trailing.len() as f32 / trailing_seconds
        } else {
            fps
        };
        let report = FpsReport {
            fps,
            trailing_fps,
            timings: FrameTimings {
                simulation: self.interval_timings.simulation / frames,
                render: self.interval_timings.render / frames,
            },
        };

        self.interval_elapsed = Duration::ZERO;
        self.interval_frames = 0;
        self.interval_timings = FrameTimings::default();
        Some(report)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, update_scene: F) -> Result<()>
    where
        F: FnMut(&FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_width,
            window_height,
        } = self;

        let Presentation {
            window_title,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(window_width)
                .context("window width exceeds the platform limit")?,
            window_height: i32::try_from(window_height)
                .context("window height exceeds the platform limit")?,
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut driver = FrameDriver::new(scene, update_scene);
            let mut surface = MacroquadSurface::default();
            let mut fps_counter = FpsCounter::default();
            let mut keys = KeyTracker::default();

            loop {
                let viewport = Viewport::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let input = FrameInput {
                    key_events: keys.poll(),
                    viewport,
                };

                surface.begin_frame(viewport);
                if driver.drive(input, &mut surface) == FrameStatus::Stopped {
                    break;
                }

                let frame = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                let report = fps_counter.record(frame, driver.timings());
                if let Some(report) = report.filter(|_| show_fps) {
                    log::info!("{report}");
                }

                macroquad::window::next_frame().await;
            }

            log::info!("window loop finished");
        });

        Ok(())
    }
}

fn to_macroquad_color(color: deltaball_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
