//! Scene lighting, the spinning disk and named-object lookups.

/// Ambient and key light setup plus intensity syncing.
pub mod lighting;

/// Manual vinyl disk rotation.
pub mod disk_spin;

/// Named-object resolution and the base surface material.
pub mod model;
