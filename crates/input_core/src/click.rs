//! Single, double and triple click detection.

use core_types::Millis;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClickKind {
    #[default]
    Single,
    Double,
    Triple,
}

/// Tracks presses to classify each one as a single, double or triple click.
///
/// A press continues a multi-click only when it lands where the previous
/// press or release did, less than the window after the previous press.
/// Past a triple, further presses keep reporting triple.
#[derive(Clone, Debug)]
pub struct ClickCycle {
    window_ms: Millis,
    last_press: Option<Millis>,
    last_position: Option<(f32, f32)>,
    multiclick: Option<ClickKind>,
}

impl ClickCycle {
    pub fn new(window_ms: Millis) -> Self {
        Self {
            window_ms,
            last_press: None,
            last_position: None,
            multiclick: None,
        }
    }

    /// Classify a press at `at`. Call before [`ClickCycle::observe`] for the
    /// same event.
    pub fn press(&mut self, at: (f32, f32), now: Millis) -> ClickKind {
        let multiclick = self.multiclick.take();
        let elapsed = self.last_press.map(|last| now.saturating_sub(last));
        self.last_press = Some(now);

        let in_window = elapsed.is_some_and(|e| e < self.window_ms);
        if !in_window || self.last_position != Some(at) {
            return ClickKind::Single;
        }
        let kind = match multiclick {
            Some(ClickKind::Double | ClickKind::Triple) => ClickKind::Triple,
            _ => ClickKind::Double,
        };
        self.multiclick = Some(kind);
        kind
    }

    /// Record the position of a press or release. Pointer travel in
    /// between is not recorded.
    pub fn observe(&mut self, at: (f32, f32)) {
        self.last_position = Some(at);
    }

    pub fn reset(&mut self) {
        self.last_press = None;
        self.last_position = None;
        self.multiclick = None;
    }
}
