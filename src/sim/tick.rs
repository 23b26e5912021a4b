//! Per-frame simulation step
//!
//! Advances obstacles, resolves collisions, checks the round timer and moves
//! the player, in that order. Rendering happens outside, before the step.

use serde::{Deserialize, Serialize};

use super::collision::hitboxes_overlap;
use super::schedule::Command;
use super::spawn::Spawner;
use super::state::{EndReason, GameState, ObstacleKind};

/// Horizontal steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction, if any
    pub direction: Option<Direction>,
}

/// Things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: ObstacleKind },
    SpeedRamped { fall_speed: f32 },
    /// Obstacle fell out of view without being touched
    Passed { id: u32, kind: ObstacleKind },
    Scored { id: u32, score: u32 },
    HazardHit { id: u32 },
    TimeUp,
}

/// Apply one queued command (no-op once the round has ended)
pub fn apply_command(
    state: &mut GameState,
    spawner: &mut Spawner,
    command: Command,
) -> Option<GameEvent> {
    if !state.is_running() {
        return None;
    }
    match command {
        Command::SpawnObstacle => {
            let id = spawner.spawn(state);
            let kind = state.obstacles.last().map(|o| o.kind)?;
            Some(GameEvent::Spawned { id, kind })
        }
        Command::RampSpeed => {
            state.fall_speed += state.ramp_amount;
            Some(GameEvent::SpeedRamped {
                fall_speed: state.fall_speed,
            })
        }
    }
}

/// Advance the game state by one frame
///
/// `elapsed_ms` is the time since the round started. Does nothing once the
/// round has ended.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    state.frame_count += 1;
    state.elapsed_ms = elapsed_ms;

    // Advance obstacles, then drop the ones below the bottom edge
    let fall = state.fall_speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos.y += fall;
    }
    let height = state.arena.height;
    state.obstacles.retain(|o| {
        let keep = o.pos.y <= height;
        if !keep {
            events.push(GameEvent::Passed {
                id: o.id,
                kind: o.kind,
            });
        }
        keep
    });

    // Collisions in spawn order; every touched obstacle is consumed
    let player = state.player.rect();
    let arena = state.arena;
    let scale = state.hitbox_scale;
    let mut hits = Vec::new();
    state.obstacles.retain(|o| {
        let hit = hitboxes_overlap(&player, &o.rect(&arena), scale);
        if hit {
            hits.push((o.id, o.kind));
        }
        !hit
    });
    for (id, kind) in hits {
        match kind {
            ObstacleKind::Scoring => {
                state.score += 1;
                events.push(GameEvent::Scored {
                    id,
                    score: state.score,
                });
            }
            ObstacleKind::Hazard => {
                state.end(EndReason::HazardHit);
                events.push(GameEvent::HazardHit { id });
            }
        }
    }

    // Round timer (a hazard hit this frame takes precedence)
    if elapsed_ms >= state.duration_ms && state.is_running() {
        state.end(EndReason::TimeUp);
        events.push(GameEvent::TimeUp);
    }
    state.remaining_ms = (state.duration_ms - elapsed_ms).max(0.0);

    // Player movement, clamped to the arena
    let max_x = (state.arena.width - state.player.size.x).max(0.0);
    let player = &mut state.player;
    match input.direction {
        Some(Direction::Left) if player.pos.x > 0.0 => {
            player.pos.x = (player.pos.x - player.speed).max(0.0);
        }
        Some(Direction::Right) if player.pos.x < max_x => {
            player.pos.x = (player.pos.x + player.speed).min(max_x);
        }
        _ => {}
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::{Arena, GamePhase};
    use glam::Vec2;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        let config = GameConfig::default();
        GameState::new(Arena::new(1000.0, 800.0, &config), &config)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn steer(direction: Direction) -> TickInput {
        TickInput {
            direction: Some(direction),
        }
    }

    #[test]
    fn test_obstacle_falls_at_fall_speed() {
        let mut state = new_state();
        let mut spawner = Spawner::new(12345);
        apply_command(&mut state, &mut spawner, Command::SpawnObstacle);
        let x = state.obstacles[0].pos.x;
        assert!((0.0..=850.0).contains(&x));
        assert_eq!(state.obstacles[0].pos.y, -80.0);

        // Keep the obstacle out of the player's column
        state.obstacles[0].pos.x = 0.0;
        state.player.pos.x = 800.0;
        for n in 1..=10 {
            tick(&mut state, &idle(), 0.0);
            assert_eq!(state.obstacles[0].pos.y, -80.0 + 4.0 * n as f32);
        }
    }

    #[test]
    fn test_ramp_changes_subsequent_advances() {
        let mut state = new_state();
        let mut spawner = Spawner::new(1);
        state.push_obstacle(0.0, ObstacleKind::Scoring);
        state.player.pos.x = 800.0;

        let event = apply_command(&mut state, &mut spawner, Command::RampSpeed);
        assert_eq!(event, Some(GameEvent::SpeedRamped { fall_speed: 4.5 }));
        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.obstacles[0].pos.y, -80.0 + 4.5);
    }

    #[test]
    fn test_passed_obstacle_has_no_effect() {
        let mut state = new_state();
        state.push_obstacle(0.0, ObstacleKind::Scoring);
        state.player.pos.x = 800.0;
        state.obstacles[0].pos.y = 798.0;

        // 802 > 800: removed, not scored
        let events = tick(&mut state, &idle(), 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(matches!(events[0], GameEvent::Passed { .. }));
    }

    #[test]
    fn test_obstacle_exactly_at_bottom_is_kept() {
        let mut state = new_state();
        state.push_obstacle(0.0, ObstacleKind::Hazard);
        state.player.pos.x = 800.0;
        state.obstacles[0].pos.y = 796.0;
        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_scoring_collision() {
        let mut state = new_state();
        let player_pos = state.player.pos;
        let hit = state.push_obstacle(player_pos.x, ObstacleKind::Scoring);
        let miss = state.push_obstacle(0.0, ObstacleKind::Scoring);
        state.obstacles[0].pos.y = player_pos.y;

        let events = tick(&mut state, &idle(), 0.0);
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, miss);
        assert!(events.contains(&GameEvent::Scored { id: hit, score: 1 }));
    }

    #[test]
    fn test_hazard_collision_ends_round() {
        let mut state = new_state();
        let y = state.player.pos.y;
        let x = state.player.pos.x;
        state.push_obstacle(x, ObstacleKind::Scoring);
        let hazard = state.push_obstacle(x + 10.0, ObstacleKind::Hazard);
        state.push_obstacle(x - 10.0, ObstacleKind::Scoring);
        for o in &mut state.obstacles {
            o.pos.y = y;
        }

        let events = tick(&mut state, &idle(), 0.0);
        // Scoring hits before and after the hazard both count
        assert_eq!(state.score, 2);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.end_reason, Some(EndReason::HazardHit));
        assert!(state.obstacles.is_empty());
        assert!(events.contains(&GameEvent::HazardHit { id: hazard }));
    }

    #[test]
    fn test_time_up_at_exact_duration() {
        let mut state = new_state();
        tick(&mut state, &idle(), 29_999.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert!((state.remaining_secs() - 0.001).abs() < 1e-9);

        let events = tick(&mut state, &idle(), 30_000.0);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.end_reason, Some(EndReason::TimeUp));
        assert_eq!(state.remaining_ms, 0.0);
        assert!(events.contains(&GameEvent::TimeUp));
    }

    #[test]
    fn test_hazard_on_last_frame_is_not_time_up() {
        let mut state = new_state();
        let pos = state.player.pos;
        let hazard = state.push_obstacle(pos.x, ObstacleKind::Hazard);
        state.obstacles[0].pos.y = pos.y;

        let events = tick(&mut state, &idle(), 30_000.0);
        assert_eq!(events, vec![GameEvent::HazardHit { id: hazard }]);
        assert_eq!(state.end_reason, Some(EndReason::HazardHit));
        assert_eq!(state.remaining_ms, 0.0);
    }

    #[test]
    fn test_remaining_never_negative() {
        let mut state = new_state();
        tick(&mut state, &idle(), 45_000.0);
        assert_eq!(state.remaining_ms, 0.0);
    }

    #[test]
    fn test_ended_state_is_frozen() {
        let mut state = new_state();
        state.push_obstacle(0.0, ObstacleKind::Scoring);
        let mut spawner = Spawner::new(3);
        state.end(EndReason::HazardHit);

        let before = serde_json::to_string(&state).unwrap();
        for _ in 0..5 {
            assert!(tick(&mut state, &steer(Direction::Left), 40_000.0).is_empty());
            assert!(apply_command(&mut state, &mut spawner, Command::SpawnObstacle).is_none());
            assert!(apply_command(&mut state, &mut spawner, Command::RampSpeed).is_none());
        }
        assert_eq!(serde_json::to_string(&state).unwrap(), before);
    }

    #[test]
    fn test_movement_clamps_at_edges() {
        let mut state = new_state();
        state.player.pos.x = 0.0;
        tick(&mut state, &steer(Direction::Left), 0.0);
        assert_eq!(state.player.pos.x, 0.0);

        state.player.pos.x = 850.0;
        tick(&mut state, &steer(Direction::Right), 0.0);
        assert_eq!(state.player.pos.x, 850.0);

        // Partial step near an edge stops at the edge
        state.player.pos.x = 3.0;
        tick(&mut state, &steer(Direction::Left), 0.0);
        assert_eq!(state.player.pos.x, 0.0);
        state.player.pos.x = 846.0;
        tick(&mut state, &steer(Direction::Right), 0.0);
        assert_eq!(state.player.pos.x, 850.0);
    }

    #[test]
    fn test_movement_is_horizontal_only() {
        let mut state = new_state();
        let start = state.player.pos;
        tick(&mut state, &steer(Direction::Right), 0.0);
        assert_eq!(state.player.pos, start + Vec2::new(8.0, 0.0));
        tick(&mut state, &steer(Direction::Left), 0.0);
        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.player.pos, start);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state();
        let mut state2 = new_state();
        let mut spawner1 = Spawner::new(99999);
        let mut spawner2 = Spawner::new(99999);

        for frame in 0..300 {
            if frame % 20 == 0 {
                apply_command(&mut state1, &mut spawner1, Command::SpawnObstacle);
                apply_command(&mut state2, &mut spawner2, Command::SpawnObstacle);
            }
            let input = if frame % 50 < 25 {
                steer(Direction::Left)
            } else {
                steer(Direction::Right)
            };
            let elapsed = frame as f64 * 16.0;
            tick(&mut state1, &input, elapsed);
            tick(&mut state2, &input, elapsed);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Frame(Option<Direction>),
        Spawn,
        Ramp,
    }

    fn step_strategy() -> impl Strategy<Value = Step> {
        prop_oneof![
            4 => prop_oneof![
                Just(None),
                Just(Some(Direction::Left)),
                Just(Some(Direction::Right)),
            ]
            .prop_map(Step::Frame),
            1 => Just(Step::Spawn),
            1 => Just(Step::Ramp),
        ]
    }

    proptest! {
        #[test]
        fn prop_monotonic_while_running(seed in any::<u64>(), steps in prop::collection::vec(step_strategy(), 1..400)) {
            let mut state = new_state();
            let mut spawner = Spawner::new(seed);
            let mut elapsed = 0.0;
            for step in steps {
                let speed_before = state.fall_speed;
                let score_before = state.score;
                let was_running = state.is_running();
                match step {
                    Step::Frame(direction) => {
                        elapsed += 16.0;
                        tick(&mut state, &TickInput { direction }, elapsed);
                    }
                    Step::Spawn => {
                        apply_command(&mut state, &mut spawner, Command::SpawnObstacle);
                    }
                    Step::Ramp => {
                        apply_command(&mut state, &mut spawner, Command::RampSpeed);
                    }
                }
                prop_assert!(state.fall_speed >= speed_before);
                prop_assert!(state.score >= score_before);
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= 850.0);
                if !was_running {
                    prop_assert_eq!(state.score, score_before);
                    prop_assert_eq!(state.fall_speed, speed_before);
                }
                if state.end_reason.is_none() {
                    prop_assert_eq!(state.phase, GamePhase::Running);
                }
            }
        }
    }
}
