//! Shared defaults for the product viewer.
//!
//! Everything here is a fallback for values the JSON manifest may override.

pub mod camera;
pub mod lighting;
pub mod model;
pub mod parts;
