//! Backend-neutral draw commands

use glam::Vec2;

/// Images the scene draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Cake,
    Flame,
}

impl Sprite {
    /// Asset path relative to the page
    pub fn src(&self) -> &'static str {
        match self {
            Sprite::Cake => "assets/cake.png",
            Sprite::Flame => "assets/flame.png",
        }
    }
}

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// One drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Rect),
    Image { sprite: Sprite, dest: Rect },
    FillRect { rect: Rect, color: &'static str },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: String,
    },
}

/// Colors for scene elements
pub mod colors {
    pub const CANDLE_BODY: &str = "white";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_assets_ship_with_page() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        for sprite in [Sprite::Cake, Sprite::Flame] {
            let bytes = std::fs::read(root.join(sprite.src()))
                .unwrap_or_else(|e| panic!("{}: {e}", sprite.src()));
            assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{} is not a PNG", sprite.src());
        }
    }
}
