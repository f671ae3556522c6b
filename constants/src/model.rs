/// Manifest describing the model, textures and part bindings.
pub const MANIFEST_PATH: &str = "viewer.json";

/// Binary glTF holding the scene and its animation clips.
pub const MODEL_PATH: &str = "models/RecordPlayer.glb";

/// Uniform scale applied to the spawned scene root.
pub const MODEL_SCALE: f32 = 4.0;

/// Object whose material receives texture swaps.
pub const BASE_OBJECT: &str = "Base";

/// Substring identifying the vinyl disk node.
pub const DISK_KEYWORD: &str = "VinylDisk";

/// Radians per second the disk turns while spinning (negative around local Y).
pub const DISK_SPIN_RATE: f32 = 3.0;

pub struct TexturePreset {
    pub name: &'static str,
    pub path: &'static str,
}

/// Surface textures selectable from the panel, in button order.
pub const TEXTURE_PRESETS: &[TexturePreset] = &[
    TexturePreset {
        name: "plastic",
        path: "models/materials/plastic.png",
    },
    TexturePreset {
        name: "carbon",
        path: "models/materials/carbon.png",
    },
];
