//! Tunables for navigation and caret blinking.

use core_types::Millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkConfig {
    /// Delay between a (re)start and the first visible phase.
    pub start_delay_ms: Millis,
    pub visible_ms: Millis,
    pub hidden_ms: Millis,
    /// Duration of each fade, out and in.
    pub fade_ms: Millis,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 50,
            visible_ms: 500,
            hidden_ms: 300,
            fade_ms: 100,
        }
    }
}

impl BlinkConfig {
    /// Length of one visible, fade, hidden, fade cycle.
    pub fn cycle_ms(&self) -> Millis {
        self.visible_ms + self.fade_ms + self.hidden_ms + self.fade_ms
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Presses closer together than this, at the same point, form a
    /// double or triple click.
    pub multi_click_window_ms: Millis,
    /// Upper bound on quarter-line probes when climbing without a
    /// neighbouring paragraph.
    pub climb_probe_limit: usize,
    pub blink: BlinkConfig,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            multi_click_window_ms: 500,
            climb_probe_limit: 64,
            blink: BlinkConfig::default(),
        }
    }
}
