//! Canvas 2D backend: replays `DrawCmd`s on a `<canvas>`

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::draw::{DrawCmd, Sprite};

/// Scene images, shared by every layer that needs them
pub struct Sprites {
    cake: HtmlImageElement,
    flame: HtmlImageElement,
}

impl Sprites {
    /// Start loading both images. Drawing skips them until they are ready.
    pub fn load() -> Option<Self> {
        let image = |sprite: Sprite| -> Option<HtmlImageElement> {
            let img = HtmlImageElement::new().ok()?;
            img.set_src(sprite.src());
            Some(img)
        };
        Some(Self {
            cake: image(Sprite::Cake)?,
            flame: image(Sprite::Flame)?,
        })
    }

    pub fn get(&self, sprite: Sprite) -> &HtmlImageElement {
        match sprite {
            Sprite::Cake => &self.cake,
            Sprite::Flame => &self.flame,
        }
    }

    fn ready(&self, sprite: Sprite) -> bool {
        let img = self.get(sprite);
        img.complete() && img.natural_width() > 0
    }
}

pub struct CanvasBackend {
    ctx: CanvasRenderingContext2d,
    sprites: Rc<Sprites>,
}

impl CanvasBackend {
    pub fn new(canvas: &HtmlCanvasElement, sprites: Rc<Sprites>) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx, sprites })
    }

    pub fn execute(&self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            self.draw(cmd);
        }
    }

    fn draw(&self, cmd: &DrawCmd) {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear(r) => ctx.clear_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64),
            DrawCmd::Image { sprite, dest } => {
                if !self.sprites.ready(*sprite) {
                    return;
                }
                if let Err(e) = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    self.sprites.get(*sprite),
                    dest.x as f64,
                    dest.y as f64,
                    dest.w as f64,
                    dest.h as f64,
                ) {
                    log::warn!("drawImage {:?} failed: {:?}", sprite, e);
                }
            }
            DrawCmd::FillRect { rect, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => {
                ctx.begin_path();
                ctx.set_line_width(*width as f64);
                ctx.set_stroke_style_str(color);
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
        }
    }
}
