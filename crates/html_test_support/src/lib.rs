//! Test fixtures shared by the navigation crates.
//!
//! - [`markup`]: marked markup parsed into a styled, laid-out [`Fixture`]
//! - [`cases`]: TOML case tables driving keyboard scenarios

pub mod cases;
pub mod markup;

pub use cases::{CASES_FORMAT_V1, Case, CaseFocus, Chord, load_cases, parse_cases};
pub use markup::{Fixture, render};
