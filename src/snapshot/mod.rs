//! Snapshot contracts consumed by the console.
//!
//! `types` mirrors the wire JSON with every field optional; `model` holds the
//! filled records the rule engines read. Conversion happens once, at load.

pub mod load;
pub mod model;
pub mod types;

pub use model::*;
