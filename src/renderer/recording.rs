//! Draw-call recorder for tests and headless runs

use glam::Vec2;

use super::{Sprite, Surface, TextStyle};
use crate::sim::Rect;

/// One captured draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Sprite { sprite: Sprite, rect: Rect },
    Text { text: String, pos: Vec2, style: TextStyle },
}

/// A surface that remembers what was drawn on it
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Sprites drawn, in order
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { sprite, .. } => Some(*sprite),
            _ => None,
        })
    }

    /// Text drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        self.commands.push(DrawCommand::Sprite { sprite, rect });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style: style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new(10.0, 20.0);
        assert_eq!(surface.size(), (10.0, 20.0));
        surface.clear();
        surface.draw_sprite(Sprite::Player, Rect::new(1.0, 2.0, 3.0, 4.0));
        surface.draw_text(
            "hi",
            Vec2::ZERO,
            &TextStyle {
                font: "10px Arial".into(),
                color: "#fff".into(),
            },
        );
        assert_eq!(surface.commands.len(), 3);
        assert_eq!(surface.sprites().collect::<Vec<_>>(), vec![Sprite::Player]);
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["hi"]);

        surface.reset();
        assert!(surface.commands.is_empty());
    }
}
