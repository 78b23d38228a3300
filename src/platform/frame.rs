//! `requestAnimationFrame` driver for `FrameTask`s

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::scene::{CancelToken, Frame, FrameTask};

/// Run `task` once per display frame until it returns `Frame::Done` or the
/// returned token is cancelled.
pub fn spawn_frame_loop(name: &'static str, task: impl FrameTask + 'static) -> CancelToken {
    let token = CancelToken::new();
    let task: Rc<RefCell<dyn FrameTask>> = Rc::new(RefCell::new(task));
    log::debug!("frame loop '{name}' scheduled");
    request_frame(name, task, token.clone());
    token
}

fn request_frame(name: &'static str, task: Rc<RefCell<dyn FrameTask>>, token: CancelToken) {
    let Some(window) = web_sys::window() else {
        log::error!("frame loop '{name}': no window");
        return;
    };
    let callback = Closure::once_into_js(move |time: f64| {
        if token.is_cancelled() {
            log::debug!("frame loop '{name}' cancelled");
            return;
        }
        let frame = task.borrow_mut().on_frame(time);
        match frame {
            Frame::Continue => request_frame(name, task, token),
            Frame::Done => log::debug!("frame loop '{name}' done"),
        }
    });
    if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {e:?}");
    }
}
