use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::model::MANIFEST_PATH;

use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::loading::model_loader::ModelLoader;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::lighting::AmbientIntensity;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<ViewerManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading viewer manifest from {}", MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Install the manifest (or the built-in defaults if it cannot be read) and request the model.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut model_loader: ResMut<ModelLoader>,
    mut ambient: ResMut<AmbientIntensity>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<ViewerManifest>>,
) {
    if loading_progress.manifest_loaded {
        return;
    }
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    let manifest = if let Some(manifest) = manifests.get(handle) {
        info!("✓ Viewer manifest loaded");
        manifest.clone()
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!(
            "Viewer manifest unavailable ({}), using built-in defaults",
            err
        );
        ViewerManifest::default()
    } else {
        return;
    };

    match AmbientIntensity::checked(manifest.lighting.ambient_intensity) {
        Ok(intensity) => *ambient = intensity,
        Err(err) => warn!("Ignoring manifest lighting: {}", err),
    }

    info!("Loading model from {}", manifest.model.path);
    model_loader.gltf = Some(asset_server.load(manifest.model.path.clone()));
    loading_progress.model_requested = true;
    loading_progress.manifest_loaded = true;
    commands.insert_resource(manifest);
}
