use bevy::prelude::*;
use constants::camera::{FRONT_VIEW, LEFT_VIEW, RIGHT_VIEW, TOP_VIEW};
use constants::lighting::DEFAULT_AMBIENT_INTENSITY;
use constants::model::{BASE_OBJECT, DISK_KEYWORD, MODEL_PATH, MODEL_SCALE, TEXTURE_PRESETS};
use constants::parts::{CLIP_MAP, ClipPlayback, PART_MAP};
use serde::{Deserialize, Serialize};

use crate::engine::camera::orbit_camera::CameraPreset;

/// Model file and the named objects the viewer drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelData {
    pub path: String,
    pub scale: f32,
    pub base_object: String,
    pub disk_keyword: String,
}

impl Default for ModelData {
    fn default() -> Self {
        Self {
            path: MODEL_PATH.to_string(),
            scale: MODEL_SCALE,
            base_object: BASE_OBJECT.to_string(),
            disk_keyword: DISK_KEYWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDefinition {
    pub name: String,
    pub path: String,
}

/// Maps a clicked object name fragment to the clip it toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartBinding {
    pub keyword: String,
    pub clip: String,
    #[serde(default)]
    pub toggles_disk_spin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    Toggle,
    Manual,
}

impl From<ClipPlayback> for PlaybackMode {
    fn from(playback: ClipPlayback) -> Self {
        match playback {
            ClipPlayback::Toggle => Self::Toggle,
            ClipPlayback::Manual => Self::Manual,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipDefinition {
    pub name: String,
    pub playback: PlaybackMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraViews {
    pub front: [f32; 3],
    pub top: [f32; 3],
    pub left: [f32; 3],
    pub right: [f32; 3],
}

impl Default for CameraViews {
    fn default() -> Self {
        Self {
            front: FRONT_VIEW.to_array(),
            top: TOP_VIEW.to_array(),
            left: LEFT_VIEW.to_array(),
            right: RIGHT_VIEW.to_array(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingData {
    pub ambient_intensity: f32,
}

impl Default for LightingData {
    fn default() -> Self {
        Self {
            ambient_intensity: DEFAULT_AMBIENT_INTENSITY,
        }
    }
}

/// Viewer configuration as a Bevy asset. Any field missing from the JSON
/// falls back to the shared constants.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource)]
#[serde(default)]
pub struct ViewerManifest {
    pub model: ModelData,
    pub textures: Vec<TextureDefinition>,
    pub parts: Vec<PartBinding>,
    pub clips: Vec<ClipDefinition>,
    pub camera_views: CameraViews,
    pub lighting: LightingData,
}

impl Default for ViewerManifest {
    fn default() -> Self {
        Self {
            model: ModelData::default(),
            textures: TEXTURE_PRESETS
                .iter()
                .map(|t| TextureDefinition {
                    name: t.name.to_string(),
                    path: t.path.to_string(),
                })
                .collect(),
            parts: PART_MAP
                .iter()
                .map(|p| PartBinding {
                    keyword: p.keyword.to_string(),
                    clip: p.clip.to_string(),
                    toggles_disk_spin: p.toggles_disk_spin,
                })
                .collect(),
            clips: CLIP_MAP
                .iter()
                .map(|c| ClipDefinition {
                    name: c.name.to_string(),
                    playback: c.playback.into(),
                })
                .collect(),
            camera_views: CameraViews::default(),
            lighting: LightingData::default(),
        }
    }
}

impl ViewerManifest {
    /// Resolve a texture preset name to its asset path.
    pub fn texture_path(&self, name: &str) -> Option<&str> {
        self.textures
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.path.as_str())
    }

    /// Texture preset by button position (0-based).
    pub fn texture_at(&self, index: usize) -> Option<&TextureDefinition> {
        self.textures.get(index)
    }

    /// First part whose keyword is contained in `object_name`.
    pub fn part_for_object(&self, object_name: &str) -> Option<&PartBinding> {
        self.parts
            .iter()
            .find(|p| object_name.contains(p.keyword.as_str()))
    }

    pub fn clip(&self, name: &str) -> Option<&ClipDefinition> {
        self.clips.iter().find(|c| c.name == name)
    }

    pub fn camera_preset(&self, preset: CameraPreset) -> Vec3 {
        let views = &self.camera_views;
        let position = match preset {
            CameraPreset::Front => views.front,
            CameraPreset::Top => views.top,
            CameraPreset::Left => views.left,
            CameraPreset::Right => views.right,
        };
        Vec3::from_array(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_record_player() {
        let manifest = ViewerManifest::default();
        assert_eq!(manifest.model.path, "models/RecordPlayer.glb");
        assert_eq!(manifest.model.scale, 4.0);
        assert_eq!(
            manifest.texture_path("carbon"),
            Some("models/materials/carbon.png")
        );
        assert_eq!(
            manifest.camera_preset(CameraPreset::Top),
            Vec3::new(0.0, 10.0, 0.0)
        );
        assert_eq!(
            manifest.clip("DiskSpin").map(|c| c.playback),
            Some(PlaybackMode::Manual)
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "model": { "scale": 2.5 }, "lighting": { "ambient_intensity": 0.2 } }"#;
        let manifest: ViewerManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.model.scale, 2.5);
        assert_eq!(manifest.model.base_object, "Base");
        assert_eq!(manifest.lighting.ambient_intensity, 0.2);
        assert_eq!(manifest.parts.len(), 3);
    }

    #[test]
    fn part_lookup_uses_first_matching_keyword() {
        let manifest = ViewerManifest::default();
        let part = manifest.part_for_object("DustCover_Hinge").unwrap();
        assert_eq!(part.clip, "DustCover_Close");

        let part = manifest.part_for_object("VolumeControl.001").unwrap();
        assert_eq!(part.clip, "ButtonPush");
        assert!(part.toggles_disk_spin);

        let part = manifest.part_for_object("PickupArm").unwrap();
        assert_eq!(part.clip, "PickupPlace");

        assert!(manifest.part_for_object("Base").is_none());
    }

    #[test]
    fn custom_part_order_is_respected() {
        let json = r#"{
            "parts": [
                { "keyword": "Pickup", "clip": "PickupPlace" },
                { "keyword": "DustCover", "clip": "DustCover_Close" }
            ]
        }"#;
        let manifest: ViewerManifest = serde_json::from_str(json).unwrap();
        let part = manifest.part_for_object("DustCoverPickup").unwrap();
        assert_eq!(part.clip, "PickupPlace");
        assert!(!part.toggles_disk_spin);
    }
}
