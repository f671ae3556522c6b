use bevy::prelude::*;
use constants::camera::FRONT_VIEW;

use crate::engine::animation::part_animations::{PartAnimations, RestPose, stop_all_animations};
use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::camera::orbit_camera::{CameraPreset, OrbitCamera};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::disk_spin::DiskSpin;
use crate::engine::scene::lighting::AmbientIntensity;
use crate::engine::scene::model::BaseSurface;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::commands::{ViewerCommand, ViewerCommandEvent};
use crate::tools::texture_swap::PendingTexture;

/// Put the viewer back the way it started: original texture, front camera,
/// default light, all clips stopped and the disk at rest.
pub fn reset_scene(
    mut events: EventReader<ViewerCommandEvent>,
    mut orbit: ResMut<OrbitCamera>,
    mut intensity: ResMut<AmbientIntensity>,
    manifest: Option<Res<ViewerManifest>>,
    mut animations: ResMut<PartAnimations>,
    mut players: Query<&mut AnimationPlayer>,
    mut rest_poses: Query<(&RestPose, &mut Transform)>,
    mut disk_spin: ResMut<DiskSpin>,
    base_surface: Res<BaseSurface>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut pending_texture: ResMut<PendingTexture>,
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let mut requested = None;
    for event in events.read() {
        if event.command == ViewerCommand::Reset {
            requested = Some(event.source);
        }
    }
    let Some(source) = requested else {
        return;
    };
    info!("Resetting viewer via {:?}", source);

    let (front, default_intensity) = match manifest.as_deref() {
        Some(manifest) => (
            manifest.camera_preset(CameraPreset::Front),
            manifest.lighting.ambient_intensity,
        ),
        None => (FRONT_VIEW, AmbientIntensity::default().0),
    };
    orbit.move_to(front);
    *intensity = AmbientIntensity::checked(default_intensity).unwrap_or_default();
    pending_texture.clear();

    if loading_progress.model_ready() {
        if let Some(material) = base_surface
            .material
            .as_ref()
            .and_then(|handle| materials.get_mut(handle))
        {
            material.base_color_texture = base_surface.original_texture.clone();
        }
        stop_all_animations(&mut animations, &mut players, &mut rest_poses);
        disk_spin.spinning = false;
    } else {
        debug!("Model not loaded, reset only touches camera and light");
    }

    rpc_interface.send_notification(
        "viewer_reset",
        serde_json::json!({ "model_loaded": loading_progress.model_ready() }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::part_animations::ClipBinding;
    use crate::engine::assets::viewer_manifest::PlaybackMode;
    use crate::engine::scene::model::ProductModel;
    use crate::tools::commands::{CommandSource, command_handlers};

    fn reset_app(model_ready: bool) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<StandardMaterial>()
            .init_asset::<Image>()
            .add_event::<ViewerCommandEvent>()
            .init_resource::<OrbitCamera>()
            .insert_resource(AmbientIntensity(1.0))
            .insert_resource(ViewerManifest::default())
            .init_resource::<PartAnimations>()
            .init_resource::<BaseSurface>()
            .init_resource::<PendingTexture>()
            .init_resource::<WebRpcInterface>()
            .insert_resource(DiskSpin {
                spinning: true,
                disk: None,
            })
            .insert_resource(LoadingProgress {
                scene_ready: model_ready,
                ..default()
            })
            .add_systems(Update, command_handlers());
        app
    }

    fn send_reset(app: &mut App) {
        app.world_mut().send_event(ViewerCommandEvent::new(
            ViewerCommand::Reset,
            CommandSource::Panel,
        ));
        app.update();
    }

    #[test]
    fn reset_restores_camera_light_and_parts() {
        let mut app = reset_app(true);
        {
            let mut animations = app.world_mut().resource_mut::<PartAnimations>();
            animations.register_clip(
                "DustCover_Close",
                ClipBinding {
                    node: AnimationNodeIndex::new(1),
                    duration: 1.0,
                    playback: PlaybackMode::Toggle,
                },
            );
            animations.toggle("DustCover_Close");
        }
        app.world_mut()
            .resource_mut::<OrbitCamera>()
            .move_to(Vec3::new(5.0, 3.0, 0.0));
        let rest = Transform::from_xyz(0.0, 1.0, 0.0);
        let node = app
            .world_mut()
            .spawn((RestPose(rest), Transform::from_xyz(2.0, 2.0, 2.0)))
            .id();

        send_reset(&mut app);

        let world = app.world();
        assert!(world.resource::<OrbitCamera>().position().distance(FRONT_VIEW) < 1.0e-3);
        assert_eq!(world.resource::<AmbientIntensity>().0, 0.5);
        assert!(!world.resource::<PartAnimations>().is_on("DustCover_Close"));
        assert!(!world.resource::<DiskSpin>().spinning);
        assert_eq!(world.get::<Transform>(node).copied(), Some(rest));
        assert_eq!(
            world.resource::<WebRpcInterface>().notification_methods(),
            vec!["viewer_reset"]
        );
    }

    #[test]
    fn reset_restores_original_texture() {
        let mut app = reset_app(true);
        let original = Handle::<Image>::default();
        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        *app.world_mut().resource_mut::<BaseSurface>() = BaseSurface {
            object: None,
            material: Some(material.clone()),
            original_texture: Some(original.clone()),
        };

        send_reset(&mut app);

        let materials = app.world().resource::<Assets<StandardMaterial>>();
        let texture = materials
            .get(&material)
            .and_then(|m| m.base_color_texture.clone());
        assert_eq!(texture, Some(original));
    }

    #[test]
    fn reset_before_load_skips_model_parts() {
        let mut app = reset_app(false);
        send_reset(&mut app);

        let world = app.world();
        assert_eq!(world.resource::<AmbientIntensity>().0, 0.5);
        assert!(world.resource::<DiskSpin>().spinning);
    }

    #[test]
    fn reset_wins_over_commands_in_the_same_frame() {
        let mut app = reset_app(true);
        app.world_mut()
            .resource_mut::<PartAnimations>()
            .register_clip(
                "DustCover_Close",
                ClipBinding {
                    node: AnimationNodeIndex::new(1),
                    duration: 1.0,
                    playback: PlaybackMode::Toggle,
                },
            );
        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let root = app.world_mut().spawn(ProductModel).id();
        app.world_mut()
            .spawn((Name::new("Base"), MeshMaterial3d(material), ChildOf(root)));

        for command in [
            ViewerCommand::ToggleAnimation("DustCover_Close".into()),
            ViewerCommand::ApplyTexture("carbon".into()),
        ] {
            app.world_mut()
                .send_event(ViewerCommandEvent::new(command, CommandSource::Rpc));
        }
        send_reset(&mut app);

        let world = app.world();
        assert!(!world.resource::<PartAnimations>().is_on("DustCover_Close"));
        assert!(world.resource::<PendingTexture>().request.is_none());
        assert_eq!(
            world.resource::<WebRpcInterface>().notification_methods(),
            vec!["animation_toggled", "viewer_reset"]
        );
    }
}
