//! Rendering module
//!
//! The game only needs three drawing primitives, so rendering goes through the
//! small `Surface` trait. `canvas` draws into a browser Canvas 2D context,
//! `recording` captures draw calls for tests and headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, SpriteSheet};
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::sim::{GameState, ObstacleKind, Rect};

/// Logical sprite names; surfaces map them to real images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Player,
    HazardObstacle,
    ScoringObstacle,
    GameOver,
}

impl Sprite {
    pub const ALL: [Sprite; 5] = [
        Sprite::Background,
        Sprite::Player,
        Sprite::HazardObstacle,
        Sprite::ScoringObstacle,
        Sprite::GameOver,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Sprite::Background => "background",
            Sprite::Player => "player",
            Sprite::HazardObstacle => "obstacle",
            Sprite::ScoringObstacle => "scoreObstacle",
            Sprite::GameOver => "gameover",
        }
    }

    /// Image path relative to the page
    pub fn path(&self) -> String {
        format!("images/{}.png", self.name())
    }

    pub fn for_obstacle(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Hazard => Sprite::HazardObstacle,
            ObstacleKind::Scoring => Sprite::ScoringObstacle,
        }
    }
}

/// Font and fill colour for text
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand, e.g. `"40px Arial"`
    pub font: String,
    /// CSS colour
    pub color: String,
}

/// Something the game can draw onto
pub trait Surface {
    /// Surface size in pixels (width, height)
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}

/// Score and timer readouts for the surrounding display layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub remaining_secs: f64,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            remaining_secs: state.remaining_secs(),
        }
    }

    pub fn score_text(&self) -> String {
        format!("score: {}", self.score)
    }

    /// One decimal place, never negative
    pub fn timer_text(&self) -> String {
        format!("time: {:.1}s", self.remaining_secs.max(0.0))
    }
}

/// Background, player and obstacles at their current positions
pub fn draw_scene<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.draw_sprite(Sprite::Background, state.arena.bounds());
    surface.draw_sprite(Sprite::Player, state.player.rect());
    for obstacle in &state.obstacles {
        surface.draw_sprite(
            Sprite::for_obstacle(obstacle.kind),
            obstacle.rect(&state.arena),
        );
    }
}

/// Final screen: game-over art plus the final score
pub fn draw_game_over<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let (w, h) = (state.arena.width, state.arena.height);
    surface.clear();
    surface.draw_sprite(Sprite::GameOver, state.arena.bounds());

    let style = TextStyle {
        font: format!("{}px Arial", w * 0.05),
        color: "#000".to_string(),
    };
    let pos = Vec2::new(w / 2.0 - w * 0.2, h / 2.0 + h * 0.15);
    surface.draw_text(&format!("final score: {}", state.score), pos, &style);
}
