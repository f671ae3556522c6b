use bevy::animation::AnimationTarget;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::engine::animation::part_animations::{PartAnimations, RestPose};
use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::disk_spin::DiskSpin;
use crate::engine::scene::model::{
    BaseSurface, find_descendant_containing, find_named_descendant, find_object_material,
};
use crate::rpc::web_rpc::WebRpcInterface;

/// Everything touched when a spawned model scene is wired into the viewer.
#[derive(SystemParam)]
pub struct SceneBinder<'w, 's> {
    commands: Commands<'w, 's>,
    children: Query<'w, 's, &'static Children>,
    names: Query<'w, 's, &'static Name>,
    players: Query<'w, 's, Entity, With<AnimationPlayer>>,
    animated: Query<'w, 's, (Entity, &'static Transform), With<AnimationTarget>>,
    mesh_materials: Query<'w, 's, &'static MeshMaterial3d<StandardMaterial>>,
    materials: Res<'w, Assets<StandardMaterial>>,
    manifest: Res<'w, ViewerManifest>,
    animations: ResMut<'w, PartAnimations>,
    disk_spin: ResMut<'w, DiskSpin>,
    base_surface: ResMut<'w, BaseSurface>,
    loading_progress: ResMut<'w, LoadingProgress>,
    rpc_interface: ResMut<'w, WebRpcInterface>,
}

impl SceneBinder<'_, '_> {
    /// Bind animation players, rest poses, the disk and the base material below `root`.
    pub fn bind(&mut self, root: Entity) {
        self.bind_players(root);

        for entity in self.children.iter_descendants(root) {
            if let Ok((entity, transform)) = self.animated.get(entity) {
                self.commands.entity(entity).insert(RestPose(*transform));
            }
        }

        let disk_keyword = self.manifest.model.disk_keyword.as_str();
        self.disk_spin.disk =
            find_descendant_containing(root, disk_keyword, &self.children, &self.names);
        if self.disk_spin.disk.is_none() {
            warn!(
                "No object containing '{}' found, disk spin disabled",
                disk_keyword
            );
        }

        self.bind_base_surface(root);

        self.loading_progress.scene_ready = true;
        info!("✓ Model ready");

        let clips = self.animations.clip_names();
        let textures: Vec<String> = self.manifest.textures.iter().map(|t| t.name.clone()).collect();
        let disk_found = self.disk_spin.disk.is_some();
        let base_found = self.base_surface.is_bound();
        self.rpc_interface.send_notification(
            "model_loaded",
            serde_json::json!({
                "clips": clips,
                "textures": textures,
                "disk_found": disk_found,
                "base_found": base_found,
            }),
        );
    }

    fn bind_players(&mut self, root: Entity) {
        let players: Vec<Entity> = self
            .children
            .iter_descendants(root)
            .filter(|e| self.players.contains(*e))
            .collect();

        let Some(graph) = self.animations.graph.clone() else {
            warn!("Model has no animation graph, part animations disabled");
            return;
        };
        if players.is_empty() {
            warn!("Model has no animation player, part animations disabled");
            return;
        }

        for &player in &players {
            self.commands
                .entity(player)
                .insert(AnimationGraphHandle(graph.clone()));
        }
        debug!("Bound animation graph to {} player(s)", players.len());
        self.animations.players = players;
    }

    fn bind_base_surface(&mut self, root: Entity) {
        let base_name = self.manifest.model.base_object.as_str();
        let Some(object) = find_named_descendant(root, base_name, &self.children, &self.names)
        else {
            error!("Base object '{}' not found in model", base_name);
            return;
        };

        match find_object_material(object, base_name, &self.children, &self.mesh_materials) {
            Ok(material) => {
                let original_texture = self
                    .materials
                    .get(&material)
                    .and_then(|m| m.base_color_texture.clone());
                *self.base_surface = BaseSurface {
                    object: Some(object),
                    material: Some(material),
                    original_texture,
                };
            }
            Err(err) => error!("{}", err),
        }
    }
}

/// Observer fired once the model's scene instance is in the world.
pub fn on_scene_ready(trigger: Trigger<SceneInstanceReady>, mut binder: SceneBinder) {
    binder.bind(trigger.target());
}
