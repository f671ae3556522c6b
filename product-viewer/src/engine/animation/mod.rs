//! Part animation toggling on top of Bevy's animation graph.

/// Toggle flags, clip bindings and playback helpers for the model's parts.
pub mod part_animations;
