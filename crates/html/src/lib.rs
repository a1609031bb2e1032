//! Document snapshot model for caret navigation.
//!
//! - [`Document`]: an arena of typed nodes with a revision counter
//! - [`Tag`]: the closed set of element categories
//! - [`DocumentBuilder`]: incremental construction
//! - [`traverse`]: iterative, bounded tree walks
//! - [`boundaries`]: structural `(container, offset)` positions

pub mod boundaries;
pub mod dom_utils;
pub mod traverse;

mod dom_builder;
mod tags;
mod types;

pub use boundaries::{Boundary, BoundaryError, Range};
pub use dom_builder::DocumentBuilder;
pub use dom_utils::{editing_host, editing_hosts, is_editable, is_editing_host, text_content};
pub use tags::Tag;
pub use types::{Document, ElementData, Id, Node, NodeId, NodeKind};
