//! Frame-callback scheduling
//!
//! Every animated loop (blow monitor, confetti) is a `FrameTask`. In the
//! browser a task is driven by `requestAnimationFrame`; in tests the
//! `ManualScheduler` drives it with synthetic timestamps.

use std::cell::Cell;
use std::rc::Rc;

/// Whether a task wants another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Continue,
    Done,
}

/// A self-rescheduling per-frame callback
pub trait FrameTask {
    /// Run one frame. `time_ms` is the host's frame timestamp.
    fn on_frame(&mut self, time_ms: f64) -> Frame;
}

impl<F: FnMut(f64) -> Frame> FrameTask for F {
    fn on_frame(&mut self, time_ms: f64) -> Frame {
        self(time_ms)
    }
}

/// Shared stop flag for a scheduled task
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

struct Scheduled {
    name: &'static str,
    token: CancelToken,
    task: Box<dyn FrameTask>,
}

/// Deterministic scheduler: one `tick` = one display frame for every task
#[derive(Default)]
pub struct ManualScheduler {
    tasks: Vec<Scheduled>,
    time_ms: f64,
    frame_ms: f64,
}

impl ManualScheduler {
    /// Scheduler advancing `frame_ms` per tick
    pub fn new(frame_ms: f64) -> Self {
        Self {
            tasks: Vec::new(),
            time_ms: 0.0,
            frame_ms,
        }
    }

    /// Schedule a task; the returned token stops it
    pub fn spawn(&mut self, name: &'static str, task: impl FrameTask + 'static) -> CancelToken {
        let token = CancelToken::new();
        self.tasks.push(Scheduled {
            name,
            token: token.clone(),
            task: Box::new(task),
        });
        token
    }

    /// Run one frame of every live task, in spawn order
    pub fn tick(&mut self) {
        self.time_ms += self.frame_ms;
        let time = self.time_ms;
        self.tasks.retain_mut(|s| {
            if s.token.is_cancelled() {
                log::trace!("frame task '{}' cancelled", s.name);
                return false;
            }
            match s.task.on_frame(time) {
                Frame::Continue => true,
                Frame::Done => {
                    log::trace!("frame task '{}' finished", s.name);
                    false
                }
            }
        });
    }

    /// Tick until no task is left or `max_frames` have run. Returns frames run.
    pub fn run_until_idle(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while !self.tasks.is_empty() && frames < max_frames {
            self.tick();
            frames += 1;
        }
        frames
    }

    pub fn active_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|s| !s.token.is_cancelled())
            .count()
    }

    pub fn is_scheduled(&self, name: &str) -> bool {
        self.tasks
            .iter()
            .any(|s| s.name == name && !s.token.is_cancelled())
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_task_removed() {
        let mut sched = ManualScheduler::new(16.0);
        let mut left = 3;
        sched.spawn("countdown", move |_t: f64| {
            left -= 1;
            if left == 0 { Frame::Done } else { Frame::Continue }
        });
        assert_eq!(sched.run_until_idle(100), 3);
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn test_cancelled_task_stops() {
        let mut sched = ManualScheduler::new(16.0);
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let token = sched.spawn("forever", move |_t: f64| {
            c.set(c.get() + 1);
            Frame::Continue
        });
        sched.tick();
        sched.tick();
        token.cancel();
        assert!(!sched.is_scheduled("forever"));
        sched.tick();
        assert_eq!(calls.get(), 2);
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn test_timestamps_advance() {
        let mut sched = ManualScheduler::new(10.0);
        let seen = Rc::new(Cell::new(0.0));
        let s = seen.clone();
        sched.spawn("clock", move |t: f64| {
            s.set(t);
            Frame::Continue
        });
        sched.tick();
        sched.tick();
        assert_eq!(seen.get(), 20.0);
        assert_eq!(sched.time_ms(), 20.0);
    }
}
