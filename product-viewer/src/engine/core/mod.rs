//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with asset loading, camera, lighting, picking,
/// UI and RPC systems.
pub mod app_setup;

/// Application state machine and loading transitions.
///
/// Moves from manifest loading through scene spawning to runtime interaction.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
