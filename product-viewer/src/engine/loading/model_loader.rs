use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::animation::part_animations::{ClipBinding, PartAnimations};
use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_setup::on_scene_ready;
use crate::engine::scene::model::ProductModel;

#[derive(Resource, Default)]
pub struct ModelLoader {
    pub gltf: Option<Handle<Gltf>>,
}

/// Spawn the model's scene once the glTF and its sub-assets are available.
pub fn spawn_model_when_ready(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    model_loader: Res<ModelLoader>,
    manifest: Option<Res<ViewerManifest>>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    clips: Res<Assets<AnimationClip>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut animations: ResMut<PartAnimations>,
) {
    if loading_progress.scene_spawned || loading_progress.model_failed {
        return;
    }
    let (Some(manifest), Some(handle)) = (manifest, model_loader.gltf.as_ref()) else {
        return;
    };

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        error!("Failed to load model {}: {}", manifest.model.path, err);
        loading_progress.model_failed = true;
        return;
    }
    if !asset_server.is_loaded_with_dependencies(handle) {
        return;
    }
    let Some(gltf) = gltfs.get(handle) else {
        return;
    };

    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        error!("Model {} contains no scenes", manifest.model.path);
        loading_progress.model_failed = true;
        return;
    };

    let graph = build_animation_graph(gltf, &manifest, &clips, &mut animations);
    animations.graph = Some(graphs.add(graph));

    commands
        .spawn((
            ProductModel,
            Name::new("ProductModel"),
            SceneRoot(scene),
            Transform::from_scale(Vec3::splat(manifest.model.scale)),
        ))
        .observe(on_scene_ready);

    info!("✓ Model scene spawned");
    loading_progress.scene_spawned = true;
}

/// One graph node per configured clip found in the file; missing clips are skipped.
fn build_animation_graph(
    gltf: &Gltf,
    manifest: &ViewerManifest,
    clips: &Assets<AnimationClip>,
    animations: &mut PartAnimations,
) -> AnimationGraph {
    let mut graph = AnimationGraph::new();

    for definition in &manifest.clips {
        let Some(clip_handle) = gltf.named_animations.get(definition.name.as_str()) else {
            warn!("Animation clip '{}' not found in model", definition.name);
            continue;
        };
        let duration = clips.get(clip_handle).map_or(0.0, |clip| clip.duration());
        let node = graph.add_clip(clip_handle.clone(), 1.0, graph.root);
        animations.register_clip(
            &definition.name,
            ClipBinding {
                node,
                duration,
                playback: definition.playback,
            },
        );
        debug!(
            "Bound clip '{}' ({:.2}s, {:?})",
            definition.name, duration, definition.playback
        );
    }

    graph
}
