//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Obstacles falling, player moving
    Running,
    /// Round over (terminal)
    Ended,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Player touched a hazard obstacle
    HazardHit,
    /// Round timer ran out
    TimeUp,
    /// Loop was halted from outside
    Stopped,
}

/// Surface dimensions and derived sprite sizes, fixed for a whole round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub player_size: Vec2,
    pub obstacle_size: Vec2,
    pub player_bottom_margin: f32,
}

impl Arena {
    /// Derive sprite sizes from the surface once at startup
    pub fn new(width: f32, height: f32, config: &GameConfig) -> Self {
        Self {
            width,
            height,
            player_size: Vec2::new(
                width * config.player_width_frac,
                height * config.player_height_frac,
            ),
            obstacle_size: Vec2::new(
                width * config.obstacle_width_frac,
                height * config.obstacle_height_frac,
            ),
            player_bottom_margin: config.player_bottom_margin,
        }
    }

    /// Rightmost x an obstacle may spawn at (0 when obstacles are wider than the arena)
    pub fn max_obstacle_x(&self) -> f32 {
        (self.width - self.obstacle_size.x).max(0.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels moved per frame while a direction is held
    pub speed: f32,
}

impl Player {
    /// Centered horizontally, resting just above the bottom edge
    pub fn new(arena: &Arena, speed: f32) -> Self {
        let size = arena.player_size;
        Self {
            pos: Vec2::new(
                arena.width / 2.0 - size.x / 2.0,
                arena.height - size.y - arena.player_bottom_margin,
            ),
            size,
            speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Worth one point when caught
    Scoring,
    /// Ends the round when touched
    Hazard,
}

/// A falling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
}

impl Obstacle {
    pub fn rect(&self, arena: &Arena) -> Rect {
        Rect {
            pos: self.pos,
            size: arena.obstacle_size,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Surface layout
    pub arena: Arena,
    /// Current phase
    pub phase: GamePhase,
    /// Set once the phase becomes Ended
    pub end_reason: Option<EndReason>,
    /// Score
    pub score: u32,
    /// Current obstacle fall speed (pixels per frame)
    pub fall_speed: f32,
    /// Fall speed added per ramp command
    pub ramp_amount: f32,
    /// Round length
    pub duration_ms: f64,
    /// Milliseconds since the round started (as of the last frame)
    pub elapsed_ms: f64,
    /// Time left for the HUD
    pub remaining_ms: f64,
    /// Hitbox scale used for collisions
    pub hitbox_scale: f32,
    /// Frames simulated so far
    pub frame_count: u64,
    /// Player avatar
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh running round on the given arena
    pub fn new(arena: Arena, config: &GameConfig) -> Self {
        Self {
            arena,
            phase: GamePhase::Running,
            end_reason: None,
            score: 0,
            fall_speed: config.initial_fall_speed,
            ramp_amount: config.ramp_amount,
            duration_ms: config.duration_ms,
            elapsed_ms: 0.0,
            remaining_ms: config.duration_ms,
            hitbox_scale: config.hitbox_scale,
            frame_count: 0,
            player: Player::new(&arena, config.player_speed),
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an obstacle at the top of the arena, just out of view
    pub fn push_obstacle(&mut self, x: f32, kind: ObstacleKind) -> u32 {
        let id = self.next_entity_id();
        let y = -self.arena.obstacle_size.y;
        self.obstacles.push(Obstacle {
            id,
            kind,
            pos: Vec2::new(x, y),
        });
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Enter the terminal phase; the first reason recorded wins
    pub fn end(&mut self, reason: EndReason) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Ended;
            self.end_reason = Some(reason);
        }
    }

    /// Remaining time in seconds, as shown on the HUD
    pub fn remaining_secs(&self) -> f64 {
        self.remaining_ms / 1000.0
    }
}
