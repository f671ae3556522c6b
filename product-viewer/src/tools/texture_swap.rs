use bevy::asset::LoadState;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::error::ViewerError;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::model::{ProductModel, find_named_descendant, find_object_material};
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::commands::{ViewerCommand, ViewerCommandEvent};

/// Texture load that will be applied to a material once the image arrives.
#[derive(Debug, Clone)]
pub struct TextureRequest {
    pub object: String,
    pub path: String,
    pub material: Handle<StandardMaterial>,
    pub image: Handle<Image>,
}

/// At most one texture swap in flight; a newer request replaces the older one.
#[derive(Resource, Default)]
pub struct PendingTexture {
    pub request: Option<TextureRequest>,
}

impl PendingTexture {
    pub fn replace(&mut self, request: TextureRequest) -> Option<TextureRequest> {
        self.request.replace(request)
    }

    pub fn clear(&mut self) {
        self.request = None;
    }
}

/// Locate `object_name` in the model and return the material its texture should go to.
pub fn resolve_texture_target(
    model_root: Entity,
    object_name: &str,
    children: &Query<&Children>,
    names: &Query<&Name>,
    mesh_materials: &Query<&MeshMaterial3d<StandardMaterial>>,
) -> Result<Handle<StandardMaterial>, ViewerError> {
    let object = find_named_descendant(model_root, object_name, children, names)
        .ok_or_else(|| ViewerError::ObjectNotFound(object_name.to_string()))?;
    find_object_material(object, object_name, children, mesh_materials)
}

/// Named objects of the spawned model and their materials.
#[derive(SystemParam)]
pub struct ModelObjects<'w, 's> {
    models: Query<'w, 's, Entity, With<ProductModel>>,
    children: Query<'w, 's, &'static Children>,
    names: Query<'w, 's, &'static Name>,
    mesh_materials: Query<'w, 's, &'static MeshMaterial3d<StandardMaterial>>,
}

impl ModelObjects<'_, '_> {
    pub fn material_of(&self, object_name: &str) -> Result<Handle<StandardMaterial>, ViewerError> {
        let model_root = self
            .models
            .single()
            .map_err(|_| ViewerError::ModelNotLoaded)?;
        resolve_texture_target(
            model_root,
            object_name,
            &self.children,
            &self.names,
            &self.mesh_materials,
        )
    }
}

/// Start loading `path` and queue it as the base colour texture of `object_name`.
pub fn change_object_texture(
    object_name: &str,
    path: &str,
    objects: &ModelObjects,
    asset_server: &AssetServer,
    pending: &mut PendingTexture,
) -> Result<(), ViewerError> {
    let material = objects.material_of(object_name)?;
    let request = TextureRequest {
        object: object_name.to_string(),
        path: path.to_string(),
        material,
        image: asset_server.load(path.to_string()),
    };
    if let Some(previous) = pending.replace(request) {
        debug!("Superseded texture load {}", previous.path);
    }
    Ok(())
}

/// Apply texture presets to the base object.
pub fn handle_texture_commands(
    mut events: EventReader<ViewerCommandEvent>,
    loading_progress: Res<LoadingProgress>,
    manifest: Option<Res<ViewerManifest>>,
    objects: ModelObjects,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingTexture>,
) {
    for event in events.read() {
        let ViewerCommand::ApplyTexture(preset) = &event.command else {
            continue;
        };

        // Nothing to texture until the model is in.
        if !loading_progress.model_ready() {
            continue;
        }
        let Some(manifest) = manifest.as_deref() else {
            continue;
        };

        let Some(path) = manifest.texture_path(preset) else {
            warn!("{}", ViewerError::UnknownTexture(preset.clone()));
            continue;
        };

        if let Err(err) = change_object_texture(
            &manifest.model.base_object,
            path,
            &objects,
            &asset_server,
            &mut pending,
        ) {
            error!("Error loading texture: {}", err);
        }
    }
}

/// Swap the queued image into its material once it has loaded.
pub fn apply_pending_texture(
    mut pending: ResMut<PendingTexture>,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(request) = pending.request.as_ref() else {
        return;
    };

    match asset_server.get_load_state(&request.image) {
        Some(LoadState::Loaded) => {
            match materials.get_mut(&request.material) {
                Some(material) => {
                    material.base_color_texture = Some(request.image.clone());
                    info!("Texture Applied to {}", request.object);
                    rpc_interface.send_notification(
                        "texture_applied",
                        serde_json::json!({
                            "object": request.object,
                            "path": request.path,
                        }),
                    );
                }
                None => error!("{}", ViewerError::MaterialMissing(request.object.clone())),
            }
            pending.clear();
        }
        Some(LoadState::Failed(err)) => {
            error!("Error loading texture {}: {}", request.path, err);
            pending.clear();
        }
        _ => {}
    }
}
