//! Draw-list generation for the cake and the confetti layers
//!
//! Both functions are pure: same input, same commands. The canvas backend
//! only replays them.

use glam::Vec2;

use super::draw::{DrawCmd, Rect, Sprite, colors};
use crate::CanvasSize;
use crate::consts::{CAKE_RECT, CANDLE_HEIGHT, CANDLE_WIDTH, FLAME_OFFSET, FLAME_SIZE};
use crate::scene::{Candle, Particle};

fn full_canvas(size: CanvasSize) -> Rect {
    Rect::new(0.0, 0.0, size.width, size.height)
}

/// Body rectangle of a candle
pub fn candle_body(candle: &Candle) -> Rect {
    Rect::new(candle.x, candle.y, CANDLE_WIDTH, CANDLE_HEIGHT)
}

/// Flame image placement, anchored above the body
pub fn flame_rect(candle: &Candle) -> Rect {
    let origin = candle.pos() + Vec2::from(FLAME_OFFSET);
    Rect::new(origin.x, origin.y, FLAME_SIZE.0, FLAME_SIZE.1)
}

/// Cake layer: clear, cake, then each candle body with its flame if lit
pub fn render_scene(candles: &[Candle], size: CanvasSize) -> Vec<DrawCmd> {
    let (x, y, w, h) = CAKE_RECT;
    let mut cmds = Vec::with_capacity(2 + candles.len() * 2);
    cmds.push(DrawCmd::Clear(full_canvas(size)));
    cmds.push(DrawCmd::Image {
        sprite: Sprite::Cake,
        dest: Rect::new(x, y, w, h),
    });

    for candle in candles {
        cmds.push(DrawCmd::FillRect {
            rect: candle_body(candle),
            color: colors::CANDLE_BODY,
        });
        if candle.lit {
            cmds.push(DrawCmd::Image {
                sprite: Sprite::Flame,
                dest: flame_rect(candle),
            });
        }
    }

    cmds
}

/// Confetti layer: clear, then one tilted streamer per particle
pub fn render_confetti(particles: &[Particle], size: CanvasSize) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(1 + particles.len());
    cmds.push(DrawCmd::Clear(full_canvas(size)));
    cmds.extend(particles.iter().map(|p| {
        let (from, to) = p.segment();
        DrawCmd::Line {
            from,
            to,
            width: p.radius,
            color: p.color.css(),
        }
    }));
    cmds
}
