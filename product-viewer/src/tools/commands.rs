use bevy::ecs::schedule::ScheduleConfigs;
use bevy::ecs::system::ScheduleSystem;
use bevy::prelude::*;
use serde::Serialize;

use crate::engine::animation::part_animations::{
    PartAnimations, ToggleOutcome, start_clip_on_players,
};
use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::camera::orbit_camera::{CameraPreset, OrbitCamera};
use crate::engine::scene::disk_spin::DiskSpin;
use crate::engine::scene::lighting::AmbientIntensity;
use crate::engine::systems::reset::reset_scene;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::texture_swap::handle_texture_commands;

/// Everything a user can ask the viewer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    Reset,
    CameraView(CameraPreset),
    MoveCamera(Vec3),
    SetAmbientIntensity(f32),
    /// Apply a texture preset, by name, to the base object.
    ApplyTexture(String),
    ToggleAnimation(String),
    /// A part was clicked; carries the object name that matched a part keyword.
    ActivatePart(String),
}

/// Source of a command for debugging and conditional logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandSource {
    Panel,
    Keyboard,
    Pointer,
    Rpc,
}

/// Event fired by the panel, keyboard, pointer picking and RPC.
#[derive(Event, Debug, Clone)]
pub struct ViewerCommandEvent {
    pub command: ViewerCommand,
    pub source: CommandSource,
}

impl ViewerCommandEvent {
    pub fn new(command: ViewerCommand, source: CommandSource) -> Self {
        Self { command, source }
    }
}

/// Camera presets and explicit camera moves.
pub fn handle_camera_commands(
    mut events: EventReader<ViewerCommandEvent>,
    mut orbit: ResMut<OrbitCamera>,
    manifest: Option<Res<ViewerManifest>>,
) {
    for event in events.read() {
        match &event.command {
            ViewerCommand::CameraView(preset) => {
                let position = match manifest.as_deref() {
                    Some(manifest) => manifest.camera_preset(*preset),
                    None => ViewerManifest::default().camera_preset(*preset),
                };
                info!("Camera view {:?} via {:?}", preset, event.source);
                orbit.move_to(position);
            }
            ViewerCommand::MoveCamera(position) => {
                debug!("Camera moved to {} via {:?}", position, event.source);
                orbit.move_to(*position);
            }
            _ => {}
        }
    }
}

/// Ambient light slider and on/off buttons.
pub fn handle_light_commands(
    mut events: EventReader<ViewerCommandEvent>,
    mut intensity: ResMut<AmbientIntensity>,
) {
    for event in events.read() {
        if let ViewerCommand::SetAmbientIntensity(value) = event.command {
            match AmbientIntensity::checked(value) {
                Ok(checked) => {
                    if *intensity != checked {
                        *intensity = checked;
                    }
                }
                Err(err) => warn!("{} (via {:?})", err, event.source),
            }
        }
    }
}

/// Clip toggles, including those triggered by clicking a part.
pub fn handle_animation_commands(
    mut events: EventReader<ViewerCommandEvent>,
    mut animations: ResMut<PartAnimations>,
    mut players: Query<&mut AnimationPlayer>,
    mut disk_spin: ResMut<DiskSpin>,
    manifest: Option<Res<ViewerManifest>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let clip = match &event.command {
            ViewerCommand::ToggleAnimation(clip) => clip.clone(),
            ViewerCommand::ActivatePart(object_name) => {
                let Some(part) = manifest
                    .as_deref()
                    .and_then(|m| m.part_for_object(object_name))
                else {
                    continue;
                };
                if part.toggles_disk_spin {
                    let spinning = disk_spin.toggle();
                    info!("Disk spinning: {}", spinning);
                }
                part.clip.clone()
            }
            _ => continue,
        };

        toggle_animation(&clip, &mut animations, &mut players, &mut rpc_interface);
    }
}

/// Flip a clip's toggle and restart it in the matching direction.
pub fn toggle_animation(
    clip: &str,
    animations: &mut PartAnimations,
    players: &mut Query<&mut AnimationPlayer>,
    rpc_interface: &mut WebRpcInterface,
) {
    let on = match animations.toggle(clip) {
        ToggleOutcome::Unknown => {
            debug!("No animation clip named '{}'", clip);
            return;
        }
        ToggleOutcome::FlagOnly { on } => on,
        ToggleOutcome::Play { on, start } => {
            if animations.players.is_empty() {
                warn!("No animation player bound, '{}' will not move", clip);
            }
            start_clip_on_players(animations, players, start);
            on
        }
    };

    info!("Animation '{}' toggled {}", clip, if on { "on" } else { "off" });
    rpc_interface.send_notification(
        "animation_toggled",
        serde_json::json!({ "clip": clip, "active": on }),
    );
}

/// Every command handler. Reset runs after the others so a reset arriving in
/// the same frame as a toggle or texture swap always wins.
pub fn command_handlers() -> ScheduleConfigs<ScheduleSystem> {
    (
        (
            handle_camera_commands,
            handle_light_commands,
            handle_texture_commands,
            handle_animation_commands,
        ),
        reset_scene,
    )
        .chain()
        .into_configs()
}

/// Map keyboard shortcuts to viewer commands (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    manifest: Option<Res<ViewerManifest>>,
    mut command_events: EventWriter<ViewerCommandEvent>,
) {
    let mut send = |command: ViewerCommand| {
        command_events.write(ViewerCommandEvent::new(command, CommandSource::Keyboard));
    };

    if keyboard.just_pressed(KeyCode::KeyR) {
        send(ViewerCommand::Reset);
    }

    let views = [
        (KeyCode::Digit1, CameraPreset::Front),
        (KeyCode::Digit2, CameraPreset::Top),
        (KeyCode::Digit3, CameraPreset::Left),
        (KeyCode::Digit4, CameraPreset::Right),
    ];
    for (key, preset) in views {
        if keyboard.just_pressed(key) {
            send(ViewerCommand::CameraView(preset));
        }
    }

    if keyboard.just_pressed(KeyCode::KeyL) {
        send(ViewerCommand::SetAmbientIntensity(1.0));
    }
    if keyboard.just_pressed(KeyCode::KeyK) {
        send(ViewerCommand::SetAmbientIntensity(0.0));
    }

    for (index, key) in [KeyCode::KeyT, KeyCode::KeyY].into_iter().enumerate() {
        if !keyboard.just_pressed(key) {
            continue;
        }
        let name = manifest
            .as_deref()
            .and_then(|m| m.texture_at(index))
            .map(|t| t.name.clone());
        if let Some(name) = name {
            send(ViewerCommand::ApplyTexture(name));
        }
    }
}

/// Placeholder system for WASM builds where keyboard shortcuts are disabled.
#[cfg(target_arch = "wasm32")]
pub fn handle_keyboard_shortcuts() {
    // Viewer controlled through RPC from the host page.
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::part_animations::ClipBinding;
    use crate::engine::assets::viewer_manifest::PlaybackMode;

    fn command_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ViewerCommandEvent>()
            .init_resource::<OrbitCamera>()
            .init_resource::<AmbientIntensity>()
            .init_resource::<PartAnimations>()
            .init_resource::<DiskSpin>()
            .init_resource::<WebRpcInterface>()
            .insert_resource(ViewerManifest::default())
            .add_systems(
                Update,
                (
                    handle_camera_commands,
                    handle_light_commands,
                    handle_animation_commands,
                ),
            );
        app
    }

    fn send(app: &mut App, command: ViewerCommand) {
        app.world_mut()
            .send_event(ViewerCommandEvent::new(command, CommandSource::Panel));
        app.update();
    }

    fn register(app: &mut App, name: &str, playback: PlaybackMode) {
        app.world_mut()
            .resource_mut::<PartAnimations>()
            .register_clip(
                name,
                ClipBinding {
                    node: AnimationNodeIndex::new(1),
                    duration: 1.0,
                    playback,
                },
            );
    }

    #[test]
    fn camera_view_moves_orbit() {
        let mut app = command_app();
        send(&mut app, ViewerCommand::CameraView(CameraPreset::Left));
        let position = app.world().resource::<OrbitCamera>().position();
        assert!(position.distance(Vec3::new(-5.0, 3.0, 0.0)) < 1.0e-3);
    }

    #[test]
    fn light_commands_clamp_and_reject() {
        let mut app = command_app();
        send(&mut app, ViewerCommand::SetAmbientIntensity(1.0));
        assert_eq!(app.world().resource::<AmbientIntensity>().0, 1.0);

        send(&mut app, ViewerCommand::SetAmbientIntensity(f32::NAN));
        assert_eq!(app.world().resource::<AmbientIntensity>().0, 1.0);

        send(&mut app, ViewerCommand::SetAmbientIntensity(0.0));
        assert_eq!(app.world().resource::<AmbientIntensity>().0, 0.0);
    }

    #[test]
    fn clicking_volume_control_spins_disk_and_pushes_button() {
        let mut app = command_app();
        register(&mut app, "ButtonPush", PlaybackMode::Toggle);

        send(&mut app, ViewerCommand::ActivatePart("VolumeControl".into()));
        assert!(app.world().resource::<DiskSpin>().spinning);
        assert!(app.world().resource::<PartAnimations>().is_on("ButtonPush"));

        send(&mut app, ViewerCommand::ActivatePart("VolumeControl".into()));
        assert!(!app.world().resource::<DiskSpin>().spinning);
        assert!(!app.world().resource::<PartAnimations>().is_on("ButtonPush"));
    }

    #[test]
    fn disk_spins_even_without_button_clip() {
        let mut app = command_app();
        send(&mut app, ViewerCommand::ActivatePart("VolumeControl".into()));
        assert!(app.world().resource::<DiskSpin>().spinning);
    }

    #[test]
    fn clicking_unrelated_object_does_nothing() {
        let mut app = command_app();
        register(&mut app, "DustCover_Close", PlaybackMode::Toggle);
        send(&mut app, ViewerCommand::ActivatePart("Base".into()));
        assert!(!app.world().resource::<PartAnimations>().is_on("DustCover_Close"));
        assert!(!app.world().resource::<DiskSpin>().spinning);
    }

    #[test]
    fn dust_cover_toggle_notifies_host() {
        let mut app = command_app();
        register(&mut app, "DustCover_Close", PlaybackMode::Toggle);
        send(&mut app, ViewerCommand::ActivatePart("DustCover".into()));
        assert!(app.world().resource::<PartAnimations>().is_on("DustCover_Close"));
        assert_eq!(
            app.world().resource::<WebRpcInterface>().pending_notifications(),
            1
        );
    }
}
