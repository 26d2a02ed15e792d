//! The player character
//!
//! Movement resolves one axis at a time against every platform, then the
//! player is tested against hazards and pickups in a fixed precedence:
//! falling out of the world, enemy contact, coins, and finally the flag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect, overlaps};
use super::level::Level;
use super::state::{Facing, GameEvent};
use crate::consts::*;

/// What happened to the player this tick, if anything notable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerOutcome {
    /// Dropped below the bottom of the screen
    Fell,
    /// Touched an enemy without stomping it
    Hit,
    /// Touched the flag
    LevelComplete,
}

/// The player-controlled character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// Airborne after a jump; cleared only by landing on a platform
    pub jumping: bool,
    pub lives: u32,
    pub score: u64,
    pub coins: u32,
    /// Ticks of remaining damage immunity
    pub invincibility_ticks: u32,
    /// Walk animation counter (0..WALK_CYCLE_PERIOD)
    pub walk_cycle: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: SPAWN_POINT,
            vel: Vec2::ZERO,
            size: PLAYER_SIZE,
            facing: Facing::Right,
            jumping: false,
            lives: STARTING_LIVES,
            score: 0,
            coins: 0,
            invincibility_ticks: 0,
            walk_cycle: 0,
        }
    }

    /// Set horizontal velocity from movement intent
    pub fn move_x(&mut self, dx: f32) {
        self.vel.x = dx;
        if dx != 0.0 {
            self.facing = if dx > 0.0 { Facing::Right } else { Facing::Left };
            self.walk_cycle = (self.walk_cycle + 1) % WALK_CYCLE_PERIOD;
        }
    }

    /// Start a jump if grounded; returns whether the jump happened
    pub fn jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.vel.y = JUMP_STRENGTH;
        self.jumping = true;
        true
    }

    /// Back to the spawn point, standing still
    pub fn respawn(&mut self) {
        self.pos = SPAWN_POINT;
        self.vel = Vec2::ZERO;
        self.jumping = false;
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_ticks > 0
    }

    /// Whether the damage flash hides the player this frame
    pub fn is_blink_hidden(&self) -> bool {
        self.is_invincible() && self.invincibility_ticks % 10 < 5
    }

    fn touches<B: Bounds + ?Sized>(&self, other: &B) -> bool {
        overlaps(self, other)
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.respawn();
        }
    }

    /// Advance one tick of physics and resolve contacts with the level
    ///
    /// Stomped enemies and collected coins are removed from `level`.
    /// Gameplay events are appended to `events`.
    pub fn update(
        &mut self,
        level: &mut Level,
        events: &mut Vec<GameEvent>,
    ) -> Option<PlayerOutcome> {
        self.vel.y += GRAVITY;

        // Horizontal pass
        self.pos.x += self.vel.x;
        for platform in &level.platforms {
            if self.touches(platform) {
                if self.vel.x > 0.0 {
                    self.pos.x = platform.rect.left() - self.size.x;
                } else if self.vel.x < 0.0 {
                    self.pos.x = platform.rect.right();
                }
                self.vel.x = 0.0;
            }
        }

        // Vertical pass
        self.pos.y += self.vel.y;
        for platform in &level.platforms {
            if self.touches(platform) {
                if self.vel.y > 0.0 {
                    self.pos.y = platform.rect.top() - self.size.y;
                    self.vel.y = 0.0;
                    self.jumping = false;
                } else if self.vel.y < 0.0 {
                    self.pos.y = platform.rect.bottom();
                    self.vel.y = 0.0;
                }
            }
        }

        // Hard walls at both ends of the level
        let right_wall = level.width.max(SCREEN_WIDTH) - self.size.x;
        self.pos.x = self.pos.x.clamp(0.0, right_wall);

        if self.pos.y > SCREEN_HEIGHT {
            self.lose_life();
            log::debug!("Player fell, {} lives left", self.lives);
            events.push(GameEvent::PlayerFell {
                lives_left: self.lives,
            });
            return Some(PlayerOutcome::Fell);
        }

        if !self.is_invincible() && self.resolve_enemies(level, events) {
            return Some(PlayerOutcome::Hit);
        }

        self.collect_coins(level, events);

        if level.flag.as_ref().is_some_and(|flag| self.touches(flag)) {
            return Some(PlayerOutcome::LevelComplete);
        }

        if self.invincibility_ticks > 0 {
            self.invincibility_ticks -= 1;
        }

        None
    }

    /// Stomp or get hurt by enemies; returns true if the player was hit
    fn resolve_enemies(&mut self, level: &mut Level, events: &mut Vec<GameEvent>) -> bool {
        let mut stomped = Vec::new();
        let mut hit = false;

        for (index, enemy) in level.enemies.iter().enumerate() {
            if !self.touches(enemy) {
                continue;
            }
            if self.vel.y > 0.0 && self.pos.y < enemy.pos.y {
                stomped.push(index);
                self.vel.y = JUMP_STRENGTH * STOMP_BOUNCE;
                self.score += STOMP_SCORE;
                log::debug!("Stomped enemy at ({:.0}, {:.0})", enemy.pos.x, enemy.pos.y);
                events.push(GameEvent::EnemyStomped);
            } else {
                self.lose_life();
                self.invincibility_ticks = INVINCIBILITY_TICKS;
                log::debug!("Player hit, {} lives left", self.lives);
                events.push(GameEvent::PlayerHit {
                    lives_left: self.lives,
                });
                hit = true;
                break;
            }
        }

        // Remove in reverse so earlier indices stay valid
        for index in stomped.into_iter().rev() {
            level.enemies.remove(index);
        }

        hit
    }

    fn collect_coins(&mut self, level: &mut Level, events: &mut Vec<GameEvent>) {
        for coin in level.coins.iter_mut() {
            if !coin.collected && self.touches(&*coin) {
                coin.collected = true;
                self.coins += 1;
                self.score += COIN_SCORE;
                log::debug!("Coin {} collected", self.coins);
                events.push(GameEvent::CoinCollected { total: self.coins });
            }
        }
        level.coins.retain(|coin| !coin.collected);
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Enemy, Flag, Platform, PlatformStyle};

    fn floor_level() -> Level {
        Level {
            index: 1,
            width: 1600.0,
            platforms: vec![Platform::new(
                Rect::new(0.0, 550.0, 1600.0, 50.0),
                PlatformStyle::Ground,
            )],
            ..Default::default()
        }
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player {
            pos: Vec2::new(x, y),
            ..Player::new()
        }
    }

    #[test]
    fn test_lands_on_platform() {
        let mut level = floor_level();
        let mut events = Vec::new();
        let mut player = player_at(100.0, 498.0);
        player.jumping = true;
        player.vel.y = 4.0;

        let outcome = player.update(&mut level, &mut events);

        assert_eq!(outcome, None);
        assert_eq!(player.pos.y + player.size.y, 550.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(!player.jumping);
    }

    #[test]
    fn test_standing_player_stays_put() {
        let mut level = floor_level();
        let mut events = Vec::new();
        let mut player = player_at(100.0, 500.0);

        for _ in 0..10 {
            player.update(&mut level, &mut events);
        }

        assert_eq!(player.pos, Vec2::new(100.0, 500.0));
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_head_bump() {
        let mut level = floor_level();
        level.platforms.push(Platform::new(
            Rect::new(50.0, 300.0, 200.0, 20.0),
            PlatformStyle::Ledge,
        ));
        let mut events = Vec::new();
        let mut player = player_at(100.0, 325.0);
        player.vel.y = -10.0;

        player.update(&mut level, &mut events);

        assert_eq!(player.pos.y, 320.0);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_walks_into_wall() {
        let mut level = floor_level();
        level.platforms.push(Platform::new(
            Rect::new(200.0, 400.0, 50.0, 150.0),
            PlatformStyle::Ledge,
        ));
        let mut events = Vec::new();
        let mut player = player_at(165.0, 500.0);
        player.move_x(MOVE_SPEED);

        player.update(&mut level, &mut events);

        assert_eq!(player.pos.x, 170.0);
        assert_eq!(player.vel.x, 0.0);

        let mut player = player_at(253.0, 500.0);
        player.move_x(-MOVE_SPEED);
        player.update(&mut level, &mut events);
        assert_eq!(player.pos.x, 250.0);
    }

    #[test]
    fn test_level_walls() {
        let mut level = floor_level();
        let mut events = Vec::new();

        let mut player = player_at(2.0, 500.0);
        player.move_x(-MOVE_SPEED);
        player.update(&mut level, &mut events);
        assert_eq!(player.pos.x, 0.0);

        // Past the screen edge is fine, the level keeps going
        let mut player = player_at(768.0, 500.0);
        player.move_x(MOVE_SPEED);
        player.update(&mut level, &mut events);
        assert_eq!(player.pos.x, 774.0);

        let mut player = player_at(1568.0, 500.0);
        player.move_x(MOVE_SPEED);
        player.update(&mut level, &mut events);
        assert_eq!(player.pos.x, level.width - player.size.x);
    }

    #[test]
    fn test_move_updates_facing_and_walk_cycle() {
        let mut player = Player::new();
        player.move_x(-MOVE_SPEED);
        assert_eq!(player.facing, Facing::Left);
        assert_eq!(player.walk_cycle, 1);
        assert_eq!(player.vel.x, -MOVE_SPEED);

        player.move_x(0.0);
        assert_eq!(player.facing, Facing::Left);
        assert_eq!(player.walk_cycle, 1);
        assert_eq!(player.vel.x, 0.0);

        for _ in 0..WALK_CYCLE_PERIOD {
            player.move_x(MOVE_SPEED);
        }
        assert_eq!(player.facing, Facing::Right);
        assert_eq!(player.walk_cycle, 1);
    }

    #[test]
    fn test_double_jump_ignored() {
        let mut player = Player::new();
        assert!(player.jump());
        assert_eq!(player.vel.y, JUMP_STRENGTH);

        player.vel.y = -7.0;
        assert!(!player.jump());
        assert_eq!(player.vel.y, -7.0);
        assert!(player.jumping);
    }

    #[test]
    fn test_fall_out_of_world() {
        let mut level = Level::default();
        let mut events = Vec::new();
        let mut player = player_at(400.0, 599.5);
        player.vel = Vec2::new(3.0, 5.0);
        player.jumping = true;

        let outcome = player.update(&mut level, &mut events);

        assert_eq!(outcome, Some(PlayerOutcome::Fell));
        assert_eq!(player.lives, STARTING_LIVES - 1);
        assert_eq!(player.pos, SPAWN_POINT);
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(!player.jumping);
        assert_eq!(events, vec![GameEvent::PlayerFell { lives_left: 2 }]);
    }

    #[test]
    fn test_last_fall_does_not_respawn() {
        let mut level = Level::default();
        let mut events = Vec::new();
        let mut player = player_at(400.0, 650.0);
        player.lives = 1;

        assert_eq!(player.update(&mut level, &mut events), Some(PlayerOutcome::Fell));
        assert_eq!(player.lives, 0);
        assert!(player.pos.y > SCREEN_HEIGHT);
    }

    #[test]
    fn test_stomp_enemy() {
        let mut level = floor_level();
        level.enemies.push(Enemy::new(Vec2::new(100.0, 520.0), 50.0));
        let mut events = Vec::new();
        // Bottom at 515 moving down 5.8 -> 520.8, overlapping the enemy top
        let mut player = player_at(100.0, 465.0);
        player.vel.y = 5.0;

        let outcome = player.update(&mut level, &mut events);

        assert_eq!(outcome, None);
        assert!(level.enemies.is_empty());
        assert_eq!(player.score, STOMP_SCORE);
        assert_eq!(player.vel.y, STOMP_BOUNCE * JUMP_STRENGTH);
        assert!(player.vel.y < 0.0);
        assert_eq!(events, vec![GameEvent::EnemyStomped]);
    }

    #[test]
    fn test_stomp_and_coin_same_tick() {
        let mut level = floor_level();
        level.enemies.push(Enemy::new(Vec2::new(100.0, 520.0), 50.0));
        level.coins.push(Coin::new(Vec2::new(105.0, 480.0), 0.0));
        let mut events = Vec::new();
        let mut player = player_at(100.0, 465.0);
        player.vel.y = 5.0;

        let outcome = player.update(&mut level, &mut events);

        assert_eq!(outcome, None);
        assert!(level.enemies.is_empty());
        assert!(level.coins.is_empty());
        assert_eq!(player.coins, 1);
        assert_eq!(player.score, STOMP_SCORE + COIN_SCORE);
        assert_eq!(player.vel.y, STOMP_BOUNCE * JUMP_STRENGTH);
        assert_eq!(
            events,
            vec![
                GameEvent::EnemyStomped,
                GameEvent::CoinCollected { total: 1 }
            ]
        );
    }

    #[test]
    fn test_stomp_then_hit_still_removes_stomped_enemy() {
        let mut level = floor_level();
        level.enemies.push(Enemy::new(Vec2::new(100.0, 520.0), 50.0));
        // Overlaps too, but the bounce has already turned the player upward
        level.enemies.push(Enemy::new(Vec2::new(115.0, 500.0), 50.0));
        let mut events = Vec::new();
        let mut player = player_at(100.0, 465.0);
        player.vel.y = 5.0;

        let outcome = player.update(&mut level, &mut events);

        assert_eq!(outcome, Some(PlayerOutcome::Hit));
        assert_eq!(level.enemies.len(), 1);
        assert_eq!(level.enemies[0].pos, Vec2::new(115.0, 500.0));
        assert_eq!(player.lives, STARTING_LIVES - 1);
        assert_eq!(player.score, STOMP_SCORE);
        assert_eq!(player.pos, SPAWN_POINT);
        assert_eq!(
            events,
            vec![
                GameEvent::EnemyStomped,
                GameEvent::PlayerHit {
                    lives_left: STARTING_LIVES - 1
                }
            ]
        );
    }

    #[test]
    fn test_side_hit() {
        let mut level = floor_level();
        level.enemies.push(Enemy::new(Vec2::new(130.0, 520.0), 50.0));
        let mut events = Vec::new();
        let mut player = player_at(100.0, 500.0);
        player.move_x(MOVE_SPEED);

        let outcome = player.update(&mut level, &mut events);

        assert_eq!(outcome, Some(PlayerOutcome::Hit));
        assert_eq!(player.lives, STARTING_LIVES - 1);
        assert_eq!(player.invincibility_ticks, INVINCIBILITY_TICKS);
        assert_eq!(player.pos, SPAWN_POINT);
        assert_eq!(level.enemies.len(), 1);
    }

    #[test]
    fn test_invincible_player_passes_through_enemies() {
        let mut level = floor_level();
        level.enemies.push(Enemy::new(Vec2::new(110.0, 520.0), 50.0));
        let mut events = Vec::new();
        let mut player = player_at(100.0, 500.0);
        player.invincibility_ticks = 10;

        assert_eq!(player.update(&mut level, &mut events), None);
        assert_eq!(player.lives, STARTING_LIVES);
        assert_eq!(player.invincibility_ticks, 9);
        assert!(events.is_empty());
    }

    #[test]
    fn test_one_hit_per_tick() {
        let mut level = floor_level();
        level.enemies.push(Enemy::new(Vec2::new(105.0, 520.0), 50.0));
        level.enemies.push(Enemy::new(Vec2::new(110.0, 520.0), 50.0));
        let mut events = Vec::new();
        let mut player = player_at(100.0, 500.0);

        assert_eq!(player.update(&mut level, &mut events), Some(PlayerOutcome::Hit));
        assert_eq!(player.lives, STARTING_LIVES - 1);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_hit_skips_coins_and_flag() {
        let mut level = floor_level();
        level.enemies.push(Enemy::new(Vec2::new(110.0, 520.0), 50.0));
        level.coins.push(Coin::new(Vec2::new(100.0, 510.0), 0.0));
        level.flag = Some(Flag::new(Vec2::new(100.0, 490.0)));
        let mut events = Vec::new();
        let mut player = player_at(100.0, 500.0);

        assert_eq!(player.update(&mut level, &mut events), Some(PlayerOutcome::Hit));
        assert_eq!(player.coins, 0);
        assert_eq!(level.coins.len(), 1);
    }

    #[test]
    fn test_collects_each_coin_once() {
        let mut level = floor_level();
        level.coins.push(Coin::new(Vec2::new(100.0, 510.0), 0.0));
        level.coins.push(Coin::new(Vec2::new(110.0, 510.0), 0.0));
        level.coins.push(Coin::new(Vec2::new(400.0, 510.0), 0.0));
        let mut events = Vec::new();
        let mut player = player_at(100.0, 500.0);

        player.update(&mut level, &mut events);
        player.update(&mut level, &mut events);

        assert_eq!(player.coins, 2);
        assert_eq!(player.score, 2 * COIN_SCORE);
        assert_eq!(level.coins.len(), 1);
        assert_eq!(level.coins[0].pos.x, 400.0);
        assert_eq!(
            events,
            vec![
                GameEvent::CoinCollected { total: 1 },
                GameEvent::CoinCollected { total: 2 }
            ]
        );
    }

    #[test]
    fn test_flag_after_coin_same_tick() {
        let mut level = floor_level();
        level.coins.push(Coin::new(Vec2::new(100.0, 510.0), 0.0));
        level.flag = Some(Flag::new(Vec2::new(110.0, 490.0)));
        let mut events = Vec::new();
        let mut player = player_at(100.0, 500.0);

        assert_eq!(
            player.update(&mut level, &mut events),
            Some(PlayerOutcome::LevelComplete)
        );
        assert_eq!(player.coins, 1);
    }

    #[test]
    fn test_flag_reached_while_invincible() {
        let mut level = floor_level();
        level.flag = Some(Flag::new(Vec2::new(110.0, 490.0)));
        let mut events = Vec::new();
        let mut player = player_at(100.0, 500.0);
        player.invincibility_ticks = 30;

        assert_eq!(
            player.update(&mut level, &mut events),
            Some(PlayerOutcome::LevelComplete)
        );
        // The timer is left alone on the tick the level ends
        assert_eq!(player.invincibility_ticks, 30);
    }

    #[test]
    fn test_blink_pattern() {
        let mut player = Player::new();
        assert!(!player.is_blink_hidden());
        player.invincibility_ticks = 90;
        assert!(player.is_blink_hidden());
        player.invincibility_ticks = 87;
        assert!(!player.is_blink_hidden());
    }
}
