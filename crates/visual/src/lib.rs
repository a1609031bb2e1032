//! Rendering-aware positions over a document snapshot.
//!
//! - [`classifier`]: which nodes and whitespace runs are rendered
//! - [`boundaries`]: visual start/end tests and expansion over unrendered
//!   content
//! - [`traversing`]: stepping by character, word, visual position or raw
//!   boundary, and word/block expansion
//! - [`geometry`]: caret boxes, hit testing and selection boxes
//!
//! Everything reads through a [`View`] and never mutates the document.

pub mod boundaries;
pub mod classifier;
pub mod geometry;
pub mod traversing;

mod view;

pub use boundaries::{expand_backward, expand_forward, is_at_end, is_at_start};
pub use classifier::{
    Cursor, collapsed_whitespace_runs, has_linebreaking_style, is_rendered, is_rendered_br,
    is_unrendered, is_unrendered_whitespace, is_void_type,
};
pub use geometry::{CaretBox, FontSizeWidthPolicy, Geometry, MeasurementPolicy, TrustMeasurements};
pub use traversing::{StepError, Unit, envelope_invisible_characters, expand, host_of};
pub use view::View;
