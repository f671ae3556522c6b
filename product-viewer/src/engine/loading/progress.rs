use bevy::prelude::*;
use serde::Serialize;

#[derive(Resource, Default, Debug, Clone, Serialize)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub model_requested: bool,
    pub scene_spawned: bool,
    pub scene_ready: bool,
    pub model_failed: bool,
}

impl LoadingProgress {
    /// The model is in the world and its parts are bound.
    pub fn model_ready(&self) -> bool {
        self.scene_ready
    }

    /// Nothing more will load, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.scene_ready || self.model_failed
    }
}
