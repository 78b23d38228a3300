//! Candle entities and the store that owns them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hit::{HitWindow, find_nearest};

/// A candle on the cake. Position is fixed at creation, only `lit` changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub x: f32,
    pub y: f32,
    pub lit: bool,
}

impl Candle {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, lit: true }
    }

    /// Anchor position (top-left of the body)
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Index of a candle in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandleId(pub usize);

/// What a pointer click did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Added(CandleId),
    Relit(CandleId),
}

/// Owns the candle collection. Candles are never removed.
#[derive(Debug, Clone, Default)]
pub struct CandleStore {
    candles: Vec<Candle>,
    window: HitWindow,
}

impl CandleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(window: HitWindow) -> Self {
        Self {
            candles: Vec::new(),
            window,
        }
    }

    /// Append a new lit candle
    pub fn add_candle(&mut self, x: f32, y: f32) -> CandleId {
        self.candles.push(Candle::new(x, y));
        CandleId(self.candles.len() - 1)
    }

    /// Light an existing candle (no-op if already lit or unknown)
    pub fn relight(&mut self, id: CandleId) {
        if let Some(candle) = self.candles.get_mut(id.0) {
            candle.lit = true;
        }
    }

    /// Blow out every candle. Idempotent.
    pub fn extinguish_all(&mut self) {
        for candle in &mut self.candles {
            candle.lit = false;
        }
    }

    /// Pointer rule: relight the first candle inside the hit window, else add one.
    /// Coordinates are canvas-local with the pointer offset already applied.
    pub fn click(&mut self, x: f32, y: f32) -> ClickOutcome {
        match find_nearest(&self.candles, x, y, &self.window) {
            Some(id) => {
                self.relight(id);
                ClickOutcome::Relit(id)
            }
            None => ClickOutcome::Added(self.add_candle(x, y)),
        }
    }

    /// Install a decoded layout (startup only)
    pub fn replace_all(&mut self, candles: Vec<Candle>) {
        self.candles = candles;
    }

    pub fn lit_count(&self) -> usize {
        self.candles.iter().filter(|c| c.lit).count()
    }

    pub fn total_count(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Non-empty and nothing lit
    pub fn all_extinguished(&self) -> bool {
        !self.candles.is_empty() && self.lit_count() == 0
    }

    pub fn get(&self, id: CandleId) -> Option<&Candle> {
        self.candles.get(id.0)
    }

    /// Read-only snapshot for rendering and encoding
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Text for the counter display
    pub fn counter_label(&self) -> String {
        format!("Candles lit: {} / {}", self.lit_count(), self.total_count())
    }
}
