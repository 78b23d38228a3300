//! Platform abstraction layer
//!
//! Browser-only glue:
//! - Frame loops on `requestAnimationFrame`
//! - DOM updates (counter, celebration message)
//! - Clipboard share

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub use frame::spawn_frame_loop;
