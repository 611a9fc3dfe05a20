//! Per-tick physics: bird motion, collisions, respawn and wall scrolling.

use super::types::{random_offset, AdvanceOutcome, BirdSprite, PhysicsEngine};
use crate::core::config::PhysicsConfig;
use crate::geometry::Rect;
use rand::Rng;

/// Hitboxes of the (upper, lower) walls at the given scroll position.
///
/// Both are narrower than the wall sprite by the hitbox inset and pushed
/// the same distance away from the gap.
pub fn wall_rects(config: &PhysicsConfig, x: i32, offset: i32) -> (Rect, Rect) {
    let width = config.wall_width - config.wall_hitbox_inset;
    let upper = Rect::new(
        x,
        -config.wall_gap - offset - config.wall_hitbox_inset,
        width,
        config.wall_height,
    );
    let lower = Rect::new(
        x,
        config.wall_band_center + config.wall_gap - offset + config.wall_hitbox_inset,
        width,
        config.wall_height,
    );
    (upper, lower)
}

impl PhysicsEngine {
    /// Start (or restart) a jump arc.
    pub fn apply_jump_impulse(&mut self) {
        self.bird.remaining_jump_ticks = self.config.jump_height;
        self.bird.gravity_accumulator = self.config.gravity;
        self.bird.jump_speed = self.config.jump_speed;
    }

    /// Current (upper, lower) wall hitboxes.
    pub fn wall_rects(&self) -> (Rect, Rect) {
        wall_rects(
            &self.config,
            self.wall.horizontal_position,
            self.wall.vertical_offset,
        )
    }

    pub fn is_dead(&self) -> bool {
        self.bird.is_dead
    }

    pub fn score(&self) -> u32 {
        self.wall.passed_count
    }

    pub fn sprite(&self) -> BirdSprite {
        if self.bird.is_dead {
            BirdSprite::Dead
        } else if self.bird.is_jumping() {
            BirdSprite::Flapping
        } else {
            BirdSprite::Idle
        }
    }

    /// Where the sprite is drawn: the hitbox row at the sprite column.
    pub fn sprite_box(&self) -> Rect {
        Rect {
            x: self.config.bird_x,
            ..self.bird_box
        }
    }

    /// Advance one tick. Step order matters: a bird that collides and
    /// leaves the band in the same tick ends the tick alive.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::default();

        self.move_bird();

        self.bird_box = Rect::new(
            self.config.bird_hitbox_x,
            self.bird.vertical_position as i32,
            self.config.bird_size,
            self.config.bird_size,
        );

        let (upper, lower) = self.wall_rects();
        if upper.intersects(&self.bird_box) || lower.intersects(&self.bird_box) {
            if !self.bird.is_dead {
                log::debug!("Bird hit wall at x={}", self.wall.horizontal_position);
                outcome.died = true;
            }
            self.bird.is_dead = true;
        }

        let y = self.bird_box.y;
        if y <= self.config.play_band_top || y >= self.config.play_band_bottom {
            self.respawn(rng);
            outcome.respawned = true;
        }

        outcome.wall_passed = self.scroll_wall(rng);
        outcome
    }

    fn move_bird(&mut self) {
        let bird = &mut self.bird;
        if bird.remaining_jump_ticks > 0 {
            bird.jump_speed -= self.config.jump_speed_decay;
            bird.vertical_position -= bird.jump_speed;
            bird.remaining_jump_ticks -= 1;
        } else {
            bird.vertical_position += bird.gravity_accumulator;
            bird.gravity_accumulator += self.config.gravity_acceleration;
        }
    }

    /// Put the bird back at its default height and restart the wall run.
    /// An in-flight jump arc keeps going.
    fn respawn<R: Rng>(&mut self, rng: &mut R) {
        log::debug!(
            "Bird left play band at y={}, score {} lost",
            self.bird_box.y,
            self.wall.passed_count
        );
        let config = &self.config;
        self.bird.vertical_position = config.bird_y_default;
        self.bird.gravity_accumulator = config.gravity;
        self.bird.is_dead = false;
        self.bird_box.y = config.bird_y_default as i32;

        self.wall.passed_count = 0;
        self.wall.horizontal_position = config.wall_start_x;
        self.wall.vertical_offset = random_offset(config, rng);
    }

    /// Returns true when the wall wrapped.
    fn scroll_wall<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.wall.horizontal_position -= self.config.wall_scroll_speed;
        if self.wall.horizontal_position < self.config.wall_exit_x {
            self.wall.horizontal_position = self.config.wall_start_x;
            self.wall.passed_count += 1;
            self.wall.vertical_offset = random_offset(&self.config, rng);
            log::debug!("Wall passed, score {}", self.wall.passed_count);
            return true;
        }
        false
    }
}
