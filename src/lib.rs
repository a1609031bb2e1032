//! # caretaker
//!
//! Visual caret navigation for editable documents.
//!
//! The workspace is split by concern; this crate re-exports it:
//!
//! - [`html`]: the document snapshot, tag categories and structural boundaries
//! - [`css`]: computed styles
//! - [`layout`]: the measurement trait and a reference flow layout
//! - [`visual`]: rendering classification, visual stepping and caret geometry
//! - [`input_core`]: navigation transitions and the per-editor selection
//!   context
//!
//! A minimal embedding builds a [`visual::Geometry`] over its document,
//! styles and layout, and feeds events to a [`SelectionContext`]:
//!
//! ```ignore
//! let geometry = Geometry::new(View::new(&doc, &styles), &layout);
//! let mut ctx = SelectionContext::default();
//! if let Outcome::Render(request) = ctx.handle(&geometry, &event, now) {
//!     paint(request);
//! }
//! ```

pub use core_types;
pub use css;
pub use html;
pub use input_core;
pub use layout;
pub use visual;

pub use core_types::{Direction, Focus, Millis, Modifiers, Stride};
pub use html::{Boundary, Document, Id, Range};
pub use input_core::{
    InputEvent, Key, NavError, NavigationConfig, Outcome, RenderRequest, Selection,
    SelectionContext,
};
pub use layout::LayoutQuery;
pub use visual::{CaretBox, Geometry, View};
