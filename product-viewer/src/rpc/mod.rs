//! JSON-RPC 2.0 bridge to the page hosting the viewer.
//!
//! On WASM builds the viewer runs inside an iframe. The host page posts
//! requests with `postMessage`; the viewer answers on the parent window and
//! pushes notifications when its state changes.
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Viewer (iframe)
//!        │                                          │
//!        ├─ Request (with ID) ────────────────────> │
//!        │                                          ├─ ViewerCommandEvent
//!        │ <─────────────────── Response (with ID) ─┤
//!        │ <──────────── Notification (no ID) ──────┤
//! ```
//!
//! Requests are validated against a snapshot of the viewer and turned into
//! `ViewerCommandEvent`s with `CommandSource::Rpc`, so the host page drives
//! exactly the same systems as the native side panel. Requests without an id
//! are executed but never answered.
//!
//! ## Methods
//!
//! - `reset_scene`
//! - `set_camera_view { view: "front" | "top" | "left" | "right" }`
//! - `move_camera { x, y, z }`
//! - `set_light_intensity { intensity }`: clamped to 0..=1
//! - `set_light { on }`
//! - `set_texture { texture }`: a texture preset name from the manifest
//! - `toggle_animation { clip }`
//! - `get_viewer_state`
//! - `get_fps`
//!
//! ## Notifications
//!
//! `loading_progress`, `model_loaded`, `object_clicked`, `animation_toggled`,
//! `texture_applied`, `light_intensity_changed`, `viewer_reset`,
//! `fps_update`, `debug_message`.
//!
//! ## Error Handling
//!
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (bad view, texture, clip or intensity)
//! - `-32603`: Internal error (model not loaded yet)

pub mod web_rpc;
