//! The party: candles, blow monitor and confetti wired together
//!
//! The host forwards pointer clicks and frame ticks here and reacts to the
//! drained `PartyEvent`s (redraw, counter refresh, message, confetti loop).

use super::blow::{BlowMonitor, FrequencySource, MonitorState, Sample};
use super::candles::{Candle, CandleStore, ClickOutcome};
use super::confetti::{ConfettiSystem, Particle};
use super::hit::HitWindow;
use super::schedule::Frame;
use crate::error::MicError;
use crate::settings::Settings;

/// Something the host has to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyEvent {
    /// Candle state changed: redraw the cake and refresh the counter
    Redraw,
    /// Every candle is out (fires on every blow frame while true)
    AllExtinguished,
    /// A confetti batch was seeded; schedule the confetti loop
    ConfettiStarted,
    /// Confetti loop ended on its own
    ConfettiFinished,
}

pub struct Party {
    candles: CandleStore,
    monitor: BlowMonitor,
    confetti: ConfettiSystem,
    confetti_enabled: bool,
    events: Vec<PartyEvent>,
}

impl Party {
    pub fn new(settings: &Settings) -> Self {
        let window = HitWindow {
            half_width: settings.hit_half_width,
            half_height: settings.hit_half_height,
        };
        Self {
            candles: CandleStore::with_window(window),
            monitor: BlowMonitor::new(settings.blow_threshold),
            confetti: ConfettiSystem::with_count(
                settings.canvas_size(),
                settings.confetti_count,
                settings.seed,
            ),
            confetti_enabled: settings.confetti,
            events: Vec::new(),
        }
    }

    pub fn candles(&self) -> &CandleStore {
        &self.candles
    }

    pub fn confetti(&self) -> &ConfettiSystem {
        &self.confetti
    }

    pub fn monitor_state(&self) -> MonitorState {
        self.monitor.state()
    }

    /// Install a shared layout at startup
    pub fn load(&mut self, candles: Vec<Candle>) {
        log::info!("Loaded {} candles from link", candles.len());
        self.candles.replace_all(candles);
        self.events.push(PartyEvent::Redraw);
    }

    /// Pointer click in canvas coordinates (offset already applied)
    pub fn click(&mut self, x: f32, y: f32) -> ClickOutcome {
        let outcome = self.candles.click(x, y);
        log::debug!("click ({x:.0}, {y:.0}) -> {outcome:?}");
        self.events.push(PartyEvent::Redraw);
        outcome
    }

    /// Microphone granted
    pub fn attach_microphone(&mut self, source: Box<dyn FrequencySource>) -> bool {
        self.monitor.attach(source)
    }

    /// Microphone refused or unavailable
    pub fn microphone_failed(&mut self, err: MicError) {
        self.monitor.fail(err);
    }

    pub fn release_microphone(&mut self) {
        self.monitor.release();
    }

    /// The blow action: put everything out, redraw, celebrate if the cake is dark
    pub fn blow(&mut self) {
        self.candles.extinguish_all();
        self.events.push(PartyEvent::Redraw);

        if self.candles.all_extinguished() {
            self.events.push(PartyEvent::AllExtinguished);
            if self.confetti_enabled && self.confetti.start() {
                self.events.push(PartyEvent::ConfettiStarted);
            }
        }
    }

    /// One frame of the sampling loop. Keeps going for as long as the stream is held.
    pub fn monitor_frame(&mut self) -> Frame {
        match self.monitor.sample() {
            Sample::Idle => Frame::Done,
            Sample::Quiet(_) => Frame::Continue,
            Sample::Blow(volume) => {
                log::debug!("blow detected (volume {volume:.1})");
                self.blow();
                Frame::Continue
            }
        }
    }

    /// One frame of the confetti loop; `draw` receives the moved particles
    pub fn confetti_frame(&mut self, draw: impl FnOnce(&[Particle])) -> Frame {
        let was_active = self.confetti.is_active();
        let frame = self.confetti.step(draw);
        if was_active && frame == Frame::Done {
            self.events.push(PartyEvent::ConfettiFinished);
        }
        frame
    }

    pub fn drain_events(&mut self) -> Vec<PartyEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::blow::tests::FakeMic;
    use crate::scene::confetti::ConfettiPhase;
    use crate::scene::schedule::ManualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn party() -> Party {
        Party::new(&Settings::default())
    }

    fn count(events: &[PartyEvent], kind: PartyEvent) -> usize {
        events.iter().filter(|e| **e == kind).count()
    }

    #[test]
    fn test_click_twice_same_spot() {
        let mut p = party();
        p.click(120.0, 50.0);
        p.click(120.0, 50.0);
        assert_eq!(p.candles().total_count(), 1);
        assert_eq!(p.candles().lit_count(), 1);
        assert_eq!(count(&p.drain_events(), PartyEvent::Redraw), 2);
    }

    #[test]
    fn test_blow_three_candles() {
        let mut p = party();
        p.click(100.0, 50.0);
        p.click(200.0, 50.0);
        p.click(300.0, 50.0);
        p.drain_events();

        p.blow();
        assert_eq!(p.candles().lit_count(), 0);
        assert_eq!(p.candles().total_count(), 3);
        let events = p.drain_events();
        assert_eq!(count(&events, PartyEvent::AllExtinguished), 1);
        assert_eq!(count(&events, PartyEvent::ConfettiStarted), 1);
    }

    #[test]
    fn test_blow_on_empty_cake_does_not_celebrate() {
        let mut p = party();
        p.blow();
        let events = p.drain_events();
        assert_eq!(events, vec![PartyEvent::Redraw]);
        assert!(!p.confetti().is_active());
    }

    #[test]
    fn test_repeated_blows_single_confetti_batch() {
        let mut p = party();
        p.click(100.0, 50.0);
        p.blow();
        p.blow();
        p.blow();
        let events = p.drain_events();
        // Level-triggered: the signal repeats, the confetti guard holds
        assert_eq!(count(&events, PartyEvent::AllExtinguished), 3);
        assert_eq!(count(&events, PartyEvent::ConfettiStarted), 1);
        assert_eq!(p.confetti().runs(), 1);
    }

    #[test]
    fn test_confetti_disabled() {
        let settings = Settings {
            confetti: false,
            ..Default::default()
        };
        let mut p = Party::new(&settings);
        p.click(100.0, 50.0);
        p.blow();
        let events = p.drain_events();
        assert_eq!(count(&events, PartyEvent::AllExtinguished), 1);
        assert_eq!(count(&events, PartyEvent::ConfettiStarted), 0);
    }

    #[test]
    fn test_monitor_frame_idle_is_done() {
        let mut p = party();
        assert_eq!(p.monitor_frame(), Frame::Done);
    }

    #[test]
    fn test_scheduled_blow_and_confetti() {
        let party = Rc::new(RefCell::new(party()));
        let (mic, levels, released) = FakeMic::new(16);
        {
            let mut p = party.borrow_mut();
            p.click(120.0, 50.0);
            p.click(300.0, 60.0);
            assert!(p.attach_microphone(Box::new(mic)));
            p.drain_events();
        }
        // Two quiet frames, then a sustained blow
        levels.borrow_mut().extend([3, 10, 90]);

        let mut sched = ManualScheduler::new(16.0);
        let p = party.clone();
        let monitor = sched.spawn("monitor", move |_t: f64| p.borrow_mut().monitor_frame());

        sched.tick();
        sched.tick();
        assert_eq!(party.borrow().candles().lit_count(), 2);
        assert!(party.borrow_mut().drain_events().is_empty());

        sched.tick();
        assert_eq!(party.borrow().candles().lit_count(), 0);
        let events = party.borrow_mut().drain_events();
        assert!(events.contains(&PartyEvent::ConfettiStarted));

        let p = party.clone();
        sched.spawn("confetti", move |_t: f64| p.borrow_mut().confetti_frame(|_| {}));

        // Monitor keeps firing every frame while the confetti falls
        for _ in 0..10 {
            sched.tick();
        }
        assert!(sched.is_scheduled("monitor"));
        assert!(sched.is_scheduled("confetti"));
        let events = party.borrow_mut().drain_events();
        assert_eq!(count(&events, PartyEvent::AllExtinguished), 10);
        assert_eq!(count(&events, PartyEvent::ConfettiStarted), 0);

        // Stop the mic so only the confetti loop remains
        monitor.cancel();
        party.borrow_mut().release_microphone();
        assert!(released.get());
        sched.run_until_idle(10_000);
        assert_eq!(sched.active_count(), 0);
        assert_eq!(party.borrow().confetti().phase(), ConfettiPhase::Inactive);
        let events = party.borrow_mut().drain_events();
        assert_eq!(count(&events, PartyEvent::ConfettiFinished), 1);
    }
}
