//! Glue between host frames and the authoritative world.

use deltaball_core::{Command, Event};
use deltaball_rendering::{FrameInput, KeyEvent, Scene};
use deltaball_system_input::InputSampler;
use deltaball_system_movement::step;
use deltaball_world::{self as world, query, World};

/// Owns the world and the held-key set for a running game.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    input: InputSampler,
    events: Vec<Event>,
}

impl Session {
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            input: InputSampler::new(),
            events: Vec::new(),
        }
    }

    /// Runs one simulation step and publishes the result into the scene.
    pub(crate) fn advance(&mut self, input: &FrameInput, scene: &mut Scene) {
        for event in &input.key_events {
            match event {
                KeyEvent::Pressed(code) => self.input.key_down(code.clone()),
                KeyEvent::Released(code) => self.input.key_up(code),
            }
        }

        world::apply(
            &mut self.world,
            Command::ResizeViewport {
                viewport: input.viewport,
            },
            &mut self.events,
        );

        let snapshot = self.input.snapshot();
        let next = step(
            &snapshot,
            query::frame(&self.world),
            query::map(&self.world),
            query::viewport(&self.world),
        );
        world::apply(
            &mut self.world,
            Command::AdvanceFrame { frame: next },
            &mut self.events,
        );

        for event in self.events.drain(..) {
            match event {
                Event::ViewportResized { viewport } => {
                    log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
                }
                Event::PlayerMoved { from, to } => {
                    log::trace!("player moved from {from} to {to}");
                }
                Event::CameraMoved { from, to } => {
                    log::trace!("camera moved from {from} to {to}");
                }
            }
        }

        scene.frame = query::frame(&self.world);
        scene.viewport = query::viewport(&self.world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deltaball_core::{KeyCode, TileMap, Vec2, Viewport};

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    fn session() -> (Session, Scene) {
        let world = World::new(TileMap::bordered(50, 40, 40.0), VIEWPORT);
        let scene = Scene::new(
            query::map(&world).clone(),
            query::frame(&world),
            query::viewport(&world),
        );
        (Session::new(world), scene)
    }

    fn frame_with(events: Vec<KeyEvent>) -> FrameInput {
        FrameInput {
            key_events: events,
            viewport: VIEWPORT,
        }
    }

    #[test]
    fn held_keys_move_the_player_every_frame() {
        let (mut session, mut scene) = session();

        session.advance(
            &frame_with(vec![KeyEvent::Pressed(KeyCode::from("ArrowRight"))]),
            &mut scene,
        );
        session.advance(&frame_with(Vec::new()), &mut scene);

        assert_eq!(scene.frame.player, Vec2::new(210.0, 200.0));
        assert_eq!(query::player(&session.world), scene.frame.player);

        session.advance(
            &frame_with(vec![KeyEvent::Released(KeyCode::from("ArrowRight"))]),
            &mut scene,
        );
        assert_eq!(scene.frame.player, Vec2::new(210.0, 200.0));
    }

    #[test]
    fn viewport_changes_reach_the_world_and_the_camera() {
        let (mut session, mut scene) = session();
        let small = Viewport::new(200.0, 100.0);

        session.advance(
            &FrameInput {
                key_events: Vec::new(),
                viewport: small,
            },
            &mut scene,
        );

        assert_eq!(query::viewport(&session.world), small);
        assert_eq!(scene.viewport, small);
        assert_eq!(scene.frame.camera, Vec2::new(100.0, 150.0));
    }
}
