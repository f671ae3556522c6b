//! User-facing viewer operations.
//!
//! Every input path (panel, keyboard, pointer, RPC) is reduced to a
//! `ViewerCommandEvent`; the systems here apply those commands to the scene.
//!
//! ## Command Flow
//!
//! ```text
//! Panel button / Keyboard / RPC ──> ViewerCommandEvent ──> handle_*_commands
//! Pointer click ──> track_scene_clicks ──> SceneClick ──> pick_part_on_click ──> ActivatePart ──> clip toggle / disk spin
//! ApplyTexture ──> PendingTexture ──> apply_pending_texture (once the image loads)
//! ```

/// Command event, its sources, and the camera/light/animation handlers.
pub mod commands;

/// Click detection and mesh raycasting into the model.
pub mod picking;

/// Deferred texture swaps on the base object's material.
pub mod texture_swap;
