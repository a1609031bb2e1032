//! # input_core
//!
//! Caret navigation for editable documents, independent of any windowing
//! or painting layer.
//!
//! - [`navigation`]: pure transitions from one [`Selection`] to the next
//!   (horizontal steps, line climbing, jumps, line ends, pointer merges)
//! - [`SelectionContext`]: per-editor state. It turns [`InputEvent`]s into
//!   transitions and answers with a [`RenderRequest`] describing the caret,
//!   its style and the selection highlight
//! - [`Blinker`]: the tick-driven blink schedule
//! - [`ClickCycle`]: single, double and triple click detection
//!
//! ## Design Principles
//!
//! Everything reads the document through [`visual::Geometry`] and never
//! mutates it. Edits go through an [`EditingOperations`] collaborator,
//! which hands back the boundaries the selection should take.
//!
//! The host owns the clock: every time-dependent call takes the current
//! [`core_types::Millis`], so tests drive time explicitly.

mod blink;
mod click;
mod climb;
mod config;
mod context;
mod editing;
mod error;
mod events;
mod keys;
mod overrides;
mod selection;
mod viewport;

pub mod navigation;

pub use blink::{BlinkPhase, Blinker};
pub use click::{ClickCycle, ClickKind};
pub use config::{BlinkConfig, NavigationConfig};
pub use context::{Outcome, RenderRequest, SelectionContext};
pub use editing::EditingOperations;
pub use error::NavError;
pub use events::InputEvent;
pub use keys::{Key, Movement, movement};
pub use navigation::Change;
pub use overrides::{CaretStyle, Override, Overrides, Rgba};
pub use selection::{Selection, merge_ranges};
pub use viewport::{Viewport, ensure_visible};

pub use climb::climb;
