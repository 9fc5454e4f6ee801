#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the DeltaBall experience.

mod config;
mod session;

use anyhow::Result;
use clap::Parser;
use deltaball_core::Viewport;
use deltaball_rendering::{Presentation, RenderingBackend, Scene};
use deltaball_rendering_macroquad::MacroquadBackend;
use deltaball_world::{query, World};

use self::{
    config::{CliArgs, FileConfig, GameConfig},
    session::Session,
};

/// Entry point for the DeltaBall command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let config = GameConfig::resolve(&args, file, rand::random)?;
    log::info!(
        "starting with seed {:#x}, window {}x{}, vsync {}",
        config.seed,
        config.window_width,
        config.window_height,
        config.vsync
    );

    run(config)
}

fn run(config: GameConfig) -> Result<()> {
    let viewport = Viewport::new(config.window_width as f32, config.window_height as f32);
    let world = World::generate(config.seed, viewport);
    log::info!("{}", query::welcome_banner(&world));

    let scene = Scene::new(query::map(&world).clone(), query::frame(&world), viewport)
        .with_seed(query::seed(&world))
        .with_debug_overlay(config.debug_overlay);
    let presentation = Presentation::new(query::welcome_banner(&world), scene);

    let mut session = Session::new(world);
    MacroquadBackend::new()
        .with_vsync(config.vsync)
        .with_show_fps(config.show_fps)
        .with_window_size(config.window_width, config.window_height)
        .run(presentation, move |input, scene| session.advance(input, scene))
}
