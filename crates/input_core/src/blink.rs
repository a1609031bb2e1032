//! Tick-driven caret blinking.
//!
//! The host owns the clock. It calls [`Blinker::tick`] with the current time
//! and paints the caret at the returned opacity; [`Blinker::next_deadline`]
//! says when the next phase change is due so hosts can sleep until then.

use core_types::Millis;

use crate::config::BlinkConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkPhase {
    /// Not blinking; the caret is drawn solid.
    Stopped,
    /// Solid, waiting out the start delay.
    Waiting,
    Visible,
    FadingOut,
    Hidden,
    FadingIn,
}

#[derive(Clone, Debug)]
pub struct Blinker {
    config: BlinkConfig,
    /// When the first visible phase begins. `None` while stopped.
    cycle_start: Option<Millis>,
    last_phase: BlinkPhase,
}

impl Blinker {
    pub fn new(config: BlinkConfig) -> Self {
        Self {
            config,
            cycle_start: None,
            last_phase: BlinkPhase::Stopped,
        }
    }

    /// (Re)start blinking. The caret stays solid for the start delay, so
    /// typing or moving keeps it visible.
    pub fn start(&mut self, now: Millis) {
        self.cycle_start = Some(now + self.config.start_delay_ms);
        self.last_phase = BlinkPhase::Waiting;
    }

    pub fn stop(&mut self) {
        self.cycle_start = None;
        self.last_phase = BlinkPhase::Stopped;
    }

    pub fn is_running(&self) -> bool {
        self.cycle_start.is_some()
    }

    pub fn phase(&self, now: Millis) -> BlinkPhase {
        let Some(start) = self.cycle_start else {
            return BlinkPhase::Stopped;
        };
        if now < start {
            return BlinkPhase::Waiting;
        }
        let c = &self.config;
        let t = (now - start) % c.cycle_ms().max(1);
        if t < c.visible_ms {
            BlinkPhase::Visible
        } else if t < c.visible_ms + c.fade_ms {
            BlinkPhase::FadingOut
        } else if t < c.visible_ms + c.fade_ms + c.hidden_ms {
            BlinkPhase::Hidden
        } else {
            BlinkPhase::FadingIn
        }
    }

    /// Caret opacity at `now`, from 0.0 (hidden) to 1.0 (solid).
    pub fn opacity(&self, now: Millis) -> f32 {
        let Some(start) = self.cycle_start else {
            return 1.0;
        };
        let c = &self.config;
        let fade = c.fade_ms.max(1) as f32;
        let t = now.saturating_sub(start) % c.cycle_ms().max(1);
        match self.phase(now) {
            BlinkPhase::Stopped | BlinkPhase::Waiting | BlinkPhase::Visible => 1.0,
            BlinkPhase::FadingOut => 1.0 - (t - c.visible_ms) as f32 / fade,
            BlinkPhase::Hidden => 0.0,
            BlinkPhase::FadingIn => (t - c.visible_ms - c.fade_ms - c.hidden_ms) as f32 / fade,
        }
    }

    /// Advance to `now` and return the opacity to paint.
    pub fn tick(&mut self, now: Millis) -> f32 {
        let phase = self.phase(now);
        if phase != self.last_phase {
            let from = self.last_phase;
            log::trace!(target: "input_core.blink", "{from:?} -> {phase:?} at {now}");
            self.last_phase = phase;
        }
        self.opacity(now)
    }

    /// When the next phase change is due, `None` while stopped.
    pub fn next_deadline(&self, now: Millis) -> Option<Millis> {
        let start = self.cycle_start?;
        if now < start {
            return Some(start);
        }
        let c = &self.config;
        let cycle = c.cycle_ms().max(1);
        let base = now - (now - start) % cycle;
        let t = now - base;
        let edges = [
            c.visible_ms,
            c.visible_ms + c.fade_ms,
            c.visible_ms + c.fade_ms + c.hidden_ms,
            cycle,
        ];
        edges.into_iter().find(|&edge| edge > t).map(|edge| base + edge)
    }
}
