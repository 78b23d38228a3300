//! Rendering
//!
//! The scene is turned into a list of `DrawCmd`s by pure functions; the
//! Canvas 2D backend replays them in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasBackend, Sprites};
pub use draw::{DrawCmd, Rect, Sprite};
pub use shapes::{render_confetti, render_scene};
