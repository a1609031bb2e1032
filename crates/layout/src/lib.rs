//! Layout-side primitives for caret navigation.
//!
//! - [`LayoutQuery`]: the measurement interface navigation consumes
//! - [`TextMeasurer`]: text metrics, with [`MonospaceMeasurer`] as a
//!   deterministic implementation
//! - [`FlowLayout`]: block and inline flow over a document snapshot that
//!   implements [`LayoutQuery`]

mod flow;
mod geometry;
mod query;
mod text;

pub use flow::{FlowLayout, FlowOptions};
pub use geometry::{Rectangle, union_all};
pub use query::LayoutQuery;
pub use text::{MonospaceMeasurer, TextMeasurer};
