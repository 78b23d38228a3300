//! Cake Party - a virtual birthday cake you blow out through the microphone
//!
//! Core modules:
//! - `scene`: Candle state, hit testing, blow detection, confetti (pure, deterministic)
//! - `renderer`: Draw-command generation and the Canvas 2D backend
//! - `codec`: Shareable-link encoding of the candle layout
//! - `audio`: Microphone capture via Web Audio (wasm only)
//! - `platform`: Frame loops and DOM glue (wasm only)
//! - `settings`: Tunables with URL-query overrides

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod codec;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use error::{CodecError, MicError, ShareError};
pub use settings::Settings;

/// Scene configuration constants
pub mod consts {
    /// Canvas dimensions (both layers share them)
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Hit window around a candle anchor (strict bounds)
    pub const HIT_HALF_WIDTH: f32 = 15.0;
    pub const HIT_HALF_HEIGHT: f32 = 40.0;
    /// Vertical correction applied to pointer input (candle anchor convention)
    pub const POINTER_Y_OFFSET: f32 = -30.0;

    /// Mean frequency magnitude (0-255) above which a blow is detected
    pub const BLOW_THRESHOLD: f32 = 20.0;

    /// Particles per confetti run
    pub const CONFETTI_COUNT: usize = 100;
    /// Horizontal tilt amplitude of a streamer
    pub const CONFETTI_TILT_AMPLITUDE: f32 = 15.0;

    /// Cake image placement (x, y, w, h)
    pub const CAKE_RECT: (f32, f32, f32, f32) = (100.0, 180.0, 400.0, 200.0);
    /// Candle body size
    pub const CANDLE_WIDTH: f32 = 10.0;
    pub const CANDLE_HEIGHT: f32 = 30.0;
    /// Flame image offset from the candle anchor and its size
    pub const FLAME_OFFSET: (f32, f32) = (-5.0, -25.0);
    pub const FLAME_SIZE: (f32, f32) = (20.0, 25.0);

    /// Query parameter carrying the shared candle layout
    pub const CANDLES_PARAM: &str = "candles";
}

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(consts::CANVAS_WIDTH, consts::CANVAS_HEIGHT)
    }
}
