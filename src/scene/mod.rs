//! Interactive scene state
//!
//! Everything that changes over time lives here. This module must stay pure:
//! - No DOM, canvas or Web Audio calls
//! - Seeded RNG only
//! - Frames are driven from outside (`schedule`)

pub mod blow;
pub mod candles;
pub mod confetti;
pub mod hit;
pub mod party;
pub mod schedule;

pub use blow::{BlowMonitor, FrequencySource, MonitorState, ReleaseGuard, Sample, mean_volume};
pub use candles::{Candle, CandleId, CandleStore, ClickOutcome};
pub use confetti::{ConfettiPhase, ConfettiSystem, Hue, Particle};
pub use hit::{HitWindow, find_nearest, to_canvas, to_canvas_with_offset};
pub use party::{Party, PartyEvent};
pub use schedule::{CancelToken, Frame, FrameTask, ManualScheduler};
