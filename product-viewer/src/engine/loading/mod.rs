//! Asset loading pipeline for the product model.
//!
//! Runs in order: viewer manifest, glTF file, scene instance. Each stage
//! flips a flag on `LoadingProgress` that drives the `AppState` transitions.

/// Viewer manifest loading with a built-in fallback.
pub mod manifest_loader;

/// glTF loading, animation graph construction and scene spawning.
pub mod model_loader;

/// Loading progress flags reported to the host page.
pub mod progress;

/// Post-spawn binding of the animation player, disk and base material.
pub mod scene_setup;
