//! Runtime systems that act on the viewer as a whole.

/// Reset command: camera, light, texture, animations and disk back to defaults.
pub mod reset;

/// Frame rate reporting to the host page and the native overlay.
pub mod fps_tracking;
