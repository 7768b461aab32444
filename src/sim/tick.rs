//! Frame-stepped game loop
//!
//! One [`Game::tick`] is one frame: input, state transition, then (only while
//! running) update, collisions and refresh, and finally an unconditional draw.

use glam::Vec2;

use super::collision::CollisionRules;
use super::entity::{FrameInput, UpdateCtx};
use super::manager::EntityManager;
use super::state::{Background, Ball, Brick, GameState, Paddle};
use crate::renderer::{Color, Key, Surface, WindowEvent};
use crate::settings::Layout;

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the entities and the paused/running state machine
#[derive(Debug)]
pub struct Game {
    layout: Layout,
    manager: EntityManager,
    rules: CollisionRules,
    state: GameState,
    /// Pause key held during the previous frame (edge detection)
    pause_key_active: bool,
    frame_count: u64,
    board_cleared: bool,
}

impl Game {
    pub fn new(layout: Layout) -> Self {
        Self::with_rules(layout, CollisionRules::default())
    }

    /// Game using custom collision resolution
    pub fn with_rules(layout: Layout, rules: CollisionRules) -> Self {
        let mut game = Self {
            layout,
            manager: EntityManager::new(),
            rules,
            state: GameState::Paused,
            pause_key_active: false,
            frame_count: 0,
            board_cleared: false,
        };
        game.reset();
        game
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn manager(&self) -> &EntityManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut EntityManager {
        &mut self.manager
    }

    /// Frames ticked since construction
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn bricks_remaining(&self) -> usize {
        self.manager.count_of::<Brick>()
    }

    /// Destroy every entity and rebuild the starting board, paused
    pub fn reset(&mut self) {
        self.state = GameState::Paused;
        self.board_cleared = false;

        self.manager.clear();

        let layout = &self.layout;
        self.manager.create(Background::new(Vec2::ZERO, layout));
        self.manager.create(Ball::new(
            Vec2::new(layout.window_width / 2.0, layout.window_height / 2.0),
            layout,
        ));
        self.manager.create(Paddle::new(
            Vec2::new(
                layout.window_width / 2.0,
                layout.window_height - layout.paddle_height,
            ),
            layout,
        ));

        for i in 0..layout.brick_columns {
            for j in 0..layout.brick_rows {
                let x = layout.brick_offset + (i + 1) as f32 * layout.brick_width;
                let y = (j + 1) as f32 * layout.brick_height;
                self.manager.create(Brick::new(Vec2::new(x, y), layout));
            }
        }

        log::info!(
            "Board reset: {} entities, {} bricks",
            self.manager.len(),
            layout.brick_count()
        );
    }

    /// Run one frame against `surface`
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Flow {
        self.frame_count += 1;

        surface.clear(Color::BLACK);

        // Drain backend events; only a close request matters
        while let Some(event) = surface.poll_event() {
            if event == WindowEvent::Closed {
                surface.close();
            }
        }
        if !surface.is_open() {
            log::info!("Window closed after {} frames", self.frame_count);
            return Flow::Quit;
        }

        if surface.is_key_pressed(Key::Escape) {
            log::info!("Quit requested after {} frames", self.frame_count);
            return Flow::Quit;
        }

        // Toggle on the press edge only, not while the key stays held
        let pause_pressed = surface.is_key_pressed(Key::P);
        if pause_pressed && !self.pause_key_active {
            self.state = self.state.toggled();
            log::debug!("State toggled to {:?}", self.state);
        }
        self.pause_key_active = pause_pressed;

        if surface.is_key_pressed(Key::R) {
            self.reset();
        }

        if self.state == GameState::Running {
            let input = FrameInput {
                left: surface.is_key_pressed(Key::Left),
                right: surface.is_key_pressed(Key::Right),
            };
            self.step(input);
        }

        self.manager.draw_all(surface);
        surface.display();

        Flow::Continue
    }

    /// Update, resolve collisions, then purge what they destroyed
    fn step(&mut self, input: FrameInput) {
        let ctx = UpdateCtx {
            layout: &self.layout,
            input,
        };
        self.manager.update_all(&ctx);

        let rules = self.rules;
        self.manager.for_each_pair::<Ball, Brick>(|ball, brick| {
            (rules.ball_brick)(ball, brick);
        });
        self.manager.for_each_pair::<Ball, Paddle>(|ball, paddle| {
            (rules.ball_paddle)(ball, paddle);
        });

        if self.manager.refresh() > 0 && !self.board_cleared && self.bricks_remaining() == 0 {
            self.board_cleared = true;
            log::info!("Board cleared after {} frames", self.frame_count);
        }
    }

    /// Tick until the surface closes or the player quits; returns frames run
    pub fn run(&mut self, surface: &mut dyn Surface) -> u64 {
        surface.set_framerate_limit(self.layout.frame_rate_limit);

        let start = self.frame_count;
        while surface.is_open() {
            if self.tick(surface) == Flow::Quit {
                break;
            }
        }
        self.frame_count - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{HeadlessSurface, ScriptedFrame};
    use crate::sim::entity::Entity;

    fn small_layout() -> Layout {
        Layout {
            brick_rows: 2,
            brick_columns: 3,
            ..Layout::default()
        }
    }

    fn ball_pos(game: &Game) -> Vec2 {
        let id = game.manager().ids_of::<Ball>()[0];
        game.manager().get::<Ball>(id).unwrap().pos
    }

    #[test]
    fn test_new_game_is_paused_with_full_board() {
        let layout = Layout::default();
        let game = Game::new(layout.clone());
        assert_eq!(game.state(), GameState::Paused);
        assert_eq!(game.manager().count_of::<Background>(), 1);
        assert_eq!(game.manager().count_of::<Ball>(), 1);
        assert_eq!(game.manager().count_of::<Paddle>(), 1);
        assert_eq!(game.bricks_remaining(), layout.brick_count());
        assert_eq!(game.manager().len(), 3 + layout.brick_count());
    }

    #[test]
    fn test_brick_grid_layout() {
        let layout = small_layout();
        let game = Game::new(layout.clone());
        let positions: Vec<Vec2> = game
            .manager()
            .ids_of::<Brick>()
            .iter()
            .map(|&id| game.manager().get::<Brick>(id).unwrap().pos)
            .collect();

        // Column-major, matching creation order
        assert_eq!(positions[0], Vec2::new(21.5 + 43.0, 20.0));
        assert_eq!(positions[1], Vec2::new(21.5 + 43.0, 40.0));
        assert_eq!(positions[2], Vec2::new(21.5 + 86.0, 20.0));
        assert_eq!(positions.len(), 6);
    }

    #[test]
    fn test_paused_game_draws_but_does_not_update() {
        let mut game = Game::new(small_layout());
        let before = ball_pos(&game);
        let mut surface = HeadlessSurface::idle(3);

        game.run(&mut surface);

        assert_eq!(ball_pos(&game), before);
        assert_eq!(surface.frames_presented(), 3);
        assert_eq!(surface.last_frame().len(), game.manager().len());
        assert_eq!(surface.clear_color(), Some(Color::BLACK));
    }

    #[test]
    fn test_pause_toggle_is_edge_triggered() {
        let mut game = Game::new(small_layout());
        let mut script = vec![ScriptedFrame::holding(&[Key::P]); 5];
        script.push(ScriptedFrame::idle());
        let mut surface = HeadlessSurface::new(script);

        for _ in 0..5 {
            game.tick(&mut surface);
        }
        assert_eq!(game.state(), GameState::Running);

        // Release, then press again
        game.tick(&mut surface);
        let mut surface = HeadlessSurface::new([ScriptedFrame::holding(&[Key::P])]);
        game.tick(&mut surface);
        assert_eq!(game.state(), GameState::Paused);
    }

    #[test]
    fn test_running_game_moves_the_ball() {
        let mut game = Game::new(small_layout());
        let before = ball_pos(&game);
        let mut surface = HeadlessSurface::new([
            ScriptedFrame::holding(&[Key::P]),
            ScriptedFrame::idle(),
        ]);

        game.run(&mut surface);

        assert_eq!(game.state(), GameState::Running);
        assert_eq!(ball_pos(&game), before + Vec2::splat(8.0));
    }

    #[test]
    fn test_escape_quits_before_drawing() {
        let mut game = Game::new(small_layout());
        let mut surface = HeadlessSurface::new([
            ScriptedFrame::idle(),
            ScriptedFrame::holding(&[Key::Escape]),
            ScriptedFrame::idle(),
        ]);

        let frames = game.run(&mut surface);
        assert_eq!(frames, 2);
        assert_eq!(surface.frames_presented(), 1);
    }

    #[test]
    fn test_close_event_ends_loop() {
        let mut game = Game::new(small_layout());
        let mut surface = HeadlessSurface::new([
            ScriptedFrame::idle(),
            ScriptedFrame::idle().with_event(WindowEvent::Closed),
            ScriptedFrame::idle(),
        ]);

        game.run(&mut surface);
        assert!(!surface.is_open());
        assert_eq!(surface.frames_presented(), 1);
    }

    #[test]
    fn test_other_window_events_are_discarded() {
        let mut game = Game::new(small_layout());
        let mut surface = HeadlessSurface::new([
            ScriptedFrame::idle().with_event(WindowEvent::Other),
            ScriptedFrame::idle(),
        ]);

        assert_eq!(game.tick(&mut surface), Flow::Continue);
        assert!(surface.is_open());
        assert_eq!(surface.frames_presented(), 1);
        assert_eq!(surface.last_frame().len(), game.manager().len());

        assert_eq!(game.run(&mut surface), 1);
        assert_eq!(surface.frames_presented(), 2);
    }

    #[test]
    fn test_run_applies_frame_rate_cap() {
        let mut game = Game::new(small_layout());
        let mut surface = HeadlessSurface::idle(1);
        game.run(&mut surface);
        assert_eq!(surface.frame_rate_limit(), crate::consts::FRAME_RATE_LIMIT);
    }

    #[test]
    fn test_reset_restores_board_from_any_state() {
        let layout = small_layout();
        let mut game = Game::new(layout.clone());

        // Run, knock out some bricks by hand, then reset while running
        let mut surface = HeadlessSurface::new([ScriptedFrame::holding(&[Key::P])]);
        game.tick(&mut surface);
        assert_eq!(game.state(), GameState::Running);
        game.manager_mut().for_each_of::<Brick>(|b| b.destroy());
        game.manager_mut().refresh();
        assert_eq!(game.bricks_remaining(), 0);

        let mut surface = HeadlessSurface::new([ScriptedFrame::holding(&[Key::R])]);
        game.tick(&mut surface);

        assert_eq!(game.state(), GameState::Paused);
        assert_eq!(game.manager().count_of::<Background>(), 1);
        assert_eq!(game.manager().count_of::<Ball>(), 1);
        assert_eq!(game.manager().count_of::<Paddle>(), 1);
        assert_eq!(game.bricks_remaining(), layout.brick_count());
        assert!(game.manager().iter().all(|(_, e)| !e.is_destroyed()));
        assert_eq!(game.manager().len(), 3 + layout.brick_count());
    }

    #[test]
    fn test_brick_hit_is_removed_before_draw() {
        let layout = small_layout();
        let mut game = Game::new(layout.clone());

        // Park the ball just under the bottom brick of the first column, moving up
        let ball_id = game.manager().ids_of::<Ball>()[0];
        let brick_id = game.manager().ids_of::<Brick>()[layout.brick_rows as usize - 1];
        let brick_pos = game.manager().get::<Brick>(brick_id).unwrap().pos;
        {
            let ball = game.manager_mut().get_mut::<Ball>(ball_id).unwrap();
            ball.pos = brick_pos + Vec2::new(0.0, 17.0);
            ball.vel = Vec2::new(0.0, -4.0);
        }

        let mut surface = HeadlessSurface::new([ScriptedFrame::holding(&[Key::P])]);
        game.tick(&mut surface);

        assert!(!game.manager().contains(brick_id));
        assert_eq!(game.bricks_remaining(), layout.brick_count() - 1);
        assert!(game.manager().get::<Ball>(ball_id).unwrap().vel.y > 0.0);
        assert_eq!(surface.last_frame().len(), game.manager().len());
    }

    #[test]
    fn test_custom_rules_are_used() {
        fn never(_: &mut Ball, _: &mut Brick) -> bool {
            false
        }
        let rules = CollisionRules {
            ball_brick: never,
            ..CollisionRules::default()
        };
        let mut game = Game::with_rules(small_layout(), rules);

        let ball_id = game.manager().ids_of::<Ball>()[0];
        let brick_id = game.manager().ids_of::<Brick>()[0];
        let brick_pos = game.manager().get::<Brick>(brick_id).unwrap().pos;
        game.manager_mut().get_mut::<Ball>(ball_id).unwrap().pos = brick_pos;

        let mut surface = HeadlessSurface::new([ScriptedFrame::holding(&[Key::P])]);
        game.tick(&mut surface);
        assert!(game.manager().contains(brick_id));
    }
}
