//! Viewer configuration loaded from `assets/viewer.json`.
//!
//! Describes the model file, which named objects the viewer drives, the
//! clip names, texture presets, camera presets and the default lighting.
//! Missing fields fall back to the values in the `constants` crate.

/// Manifest asset and its lookups (textures, parts, clips, camera presets).
pub mod viewer_manifest;
