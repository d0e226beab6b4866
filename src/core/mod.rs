//! Core invoice types, totals, validation, and numbering.
//!
//! This module is pure: no I/O, no global state. Everything here operates
//! on values passed in by the caller.

mod builder;
mod calculator;
mod error;
mod ids;
mod numbering;
mod types;
mod validation;

pub use builder::*;
pub use calculator::*;
pub use error::*;
pub use ids::*;
pub use numbering::*;
pub use types::*;
pub use validation::*;
