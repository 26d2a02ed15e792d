//! Whole-game scenarios driven through the public tick API

use glam::Vec2;
use proptest::prelude::*;

use super_platformer::consts::*;
use super_platformer::sim::{
    GameEvent, GamePhase, GameState, Horizontal, Rect, TickInput, overlaps, tick,
};

fn confirm() -> TickInput {
    TickInput {
        confirm: true,
        ..Default::default()
    }
}

fn started(seed: u64) -> GameState {
    let mut state = GameState::new(seed).expect("standard levels are valid");
    tick(&mut state, &confirm());
    state.drain_events();
    state
}

#[test]
fn test_first_level_playthrough() {
    let mut state = started(2024);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.current_level, 1);
    assert_eq!(state.player.lives, 3);
    assert_eq!(state.player.score, 0);

    // First coin of level 1
    state.player.pos = Vec2::new(250.0, 200.0);
    state.player.vel = Vec2::ZERO;
    tick(&mut state, &TickInput::default());
    assert_eq!(state.player.coins, 1);
    assert_eq!(state.player.score, 200);
    assert_eq!(state.level.coins.len(), 7);
    assert!(
        state
            .drain_events()
            .contains(&GameEvent::CoinCollected { total: 1 })
    );

    // Flag
    state.player.pos = Vec2::new(900.0, 200.0);
    state.player.vel = Vec2::ZERO;
    tick(&mut state, &TickInput::default());
    assert_eq!(state.phase, GamePhase::LevelComplete);
    assert_eq!(state.level_complete_ticks, LEVEL_COMPLETE_TICKS);

    for _ in 0..LEVEL_COMPLETE_TICKS {
        tick(&mut state, &TickInput::default());
    }
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.current_level, 2);
    assert_eq!(state.level.coins.len(), 12);
    assert_eq!(state.level.enemies.len(), 4);
    assert_eq!(state.player.pos, SPAWN_POINT);
    assert_eq!(state.player.lives, 3);
    assert_eq!(state.player.score, 200);
    assert_eq!(state.player.coins, 1);
    assert!(
        state
            .drain_events()
            .contains(&GameEvent::LevelStarted { level: 2 })
    );
}

#[test]
fn test_falling_three_times_ends_run() {
    let mut state = started(7);

    for lives_left in (0..STARTING_LIVES).rev() {
        state.player.pos.y = SCREEN_HEIGHT + 10.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, lives_left);
    }

    assert_eq!(state.phase, GamePhase::GameOver);

    tick(&mut state, &confirm());
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.player.lives, STARTING_LIVES);
}

#[test]
fn test_walking_right_scrolls_camera() {
    let mut state = started(11);
    state.level.enemies.clear();
    let right = TickInput {
        horizontal: Horizontal::Right,
        ..Default::default()
    };
    for _ in 0..120 {
        tick(&mut state, &right);
    }
    assert!(state.camera_x > 0.0);
    assert!(state.camera_x <= state.max_camera_x());
}

fn arb_rect() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn arb_input() -> impl Strategy<Value = TickInput> {
    (0u8..3, any::<bool>(), prop::bool::weighted(0.02)).prop_map(|(dir, jump, restart_level)| {
        TickInput {
            horizontal: match dir {
                0 => Horizontal::Left,
                1 => Horizontal::Right,
                _ => Horizontal::Stop,
            },
            jump,
            restart_level,
            ..Default::default()
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn camera_stays_in_level(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(arb_input(), 1..600)
    ) {
        let mut state = started(seed);
        for input in &inputs {
            tick(&mut state, input);
            prop_assert!(state.camera_x >= 0.0);
            prop_assert!(state.camera_x <= state.max_camera_x());
        }
    }

    #[test]
    fn lives_never_increase(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(arb_input(), 1..600)
    ) {
        let mut state = started(seed);
        let mut lives = state.player.lives;
        for input in &inputs {
            tick(&mut state, input);
            prop_assert!(state.player.lives <= lives);
            lives = state.player.lives;
        }
    }
}
