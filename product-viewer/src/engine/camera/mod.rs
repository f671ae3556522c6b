//! Orbit camera for inspecting the product.
//!
//! Spherical coordinates around a fixed target with damped rotation,
//! clamped zoom and named presets. Panning is not supported.

/// Orbit controller resource, camera presets and the input system.
pub mod orbit_camera;
