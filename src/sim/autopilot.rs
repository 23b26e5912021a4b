//! Idle/demo mode steering
//!
//! Dodges the nearest hazard heading into the player's column, otherwise
//! chases the lowest scoring obstacle still above the player.

use super::state::{GameState, ObstacleKind};
use super::tick::Direction;

/// Extra horizontal clearance kept from hazards (fraction of player width)
const HAZARD_MARGIN: f32 = 0.25;
/// Dead zone around the target to avoid jitter (pixels)
const DEAD_ZONE: f32 = 4.0;

/// Pick a direction for this frame, or None to stand still
pub fn steer(state: &GameState) -> Option<Direction> {
    if !state.is_running() {
        return None;
    }

    let player = state.player.rect();
    let obstacle_w = state.arena.obstacle_size.x;
    let margin = player.size.x * HAZARD_MARGIN;

    // Most urgent hazard: lowest one overlapping our column that hasn't passed us
    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.kind == ObstacleKind::Hazard)
        .filter(|o| o.pos.y < player.bottom())
        .filter(|o| {
            o.pos.x < player.right() + margin && o.pos.x + obstacle_w > player.left() - margin
        })
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(hazard) = threat {
        let hazard_center = hazard.pos.x + obstacle_w / 2.0;
        let room_left = player.left() > 0.0;
        let room_right = player.right() < state.arena.width;
        let prefer_left = player.center().x < hazard_center;
        return match (prefer_left, room_left, room_right) {
            (true, true, _) | (false, true, false) => Some(Direction::Left),
            _ => Some(Direction::Right),
        };
    }

    let target = state
        .obstacles
        .iter()
        .filter(|o| o.kind == ObstacleKind::Scoring)
        .filter(|o| o.pos.y < player.bottom())
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    let dx = (target.pos.x + obstacle_w / 2.0) - player.center().x;
    if dx < -DEAD_ZONE {
        Some(Direction::Left)
    } else if dx > DEAD_ZONE {
        Some(Direction::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::{Arena, EndReason};

    fn new_state() -> GameState {
        let config = GameConfig::default();
        GameState::new(Arena::new(1000.0, 800.0, &config), &config)
    }

    #[test]
    fn test_idle_without_obstacles() {
        assert_eq!(steer(&new_state()), None);
    }

    #[test]
    fn test_chases_scoring() {
        let mut state = new_state();
        state.push_obstacle(0.0, ObstacleKind::Scoring);
        assert_eq!(steer(&state), Some(Direction::Left));

        let mut state = new_state();
        state.push_obstacle(850.0, ObstacleKind::Scoring);
        assert_eq!(steer(&state), Some(Direction::Right));
    }

    #[test]
    fn test_dodges_hazard_overhead() {
        let mut state = new_state();
        // Hazard slightly right of centre: move left
        state.push_obstacle(450.0, ObstacleKind::Hazard);
        state.push_obstacle(850.0, ObstacleKind::Scoring);
        assert_eq!(steer(&state), Some(Direction::Left));
    }

    #[test]
    fn test_dodges_away_from_wall() {
        let mut state = new_state();
        state.player.pos.x = 0.0;
        // Hazard centred right of the player would normally push left; no room
        state.push_obstacle(50.0, ObstacleKind::Hazard);
        assert_eq!(steer(&state), Some(Direction::Right));
    }

    #[test]
    fn test_nothing_after_end() {
        let mut state = new_state();
        state.push_obstacle(0.0, ObstacleKind::Scoring);
        state.end(EndReason::TimeUp);
        assert_eq!(steer(&state), None);
    }
}
