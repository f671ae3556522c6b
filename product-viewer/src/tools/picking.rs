use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::camera::CLICK_DRAG_TOLERANCE;

use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::camera::orbit_camera::ProductCamera;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::model::names_from_hit;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::commands::{CommandSource, ViewerCommand, ViewerCommandEvent};
use crate::ui::state::UiPointerState;

/// Where the current left press started, if it started over the scene.
#[derive(Resource, Default)]
pub struct ClickTracker {
    press_position: Option<Vec2>,
}

/// A press/release pair counts as a click when the pointer barely moved.
pub fn is_click(press: Vec2, release: Vec2) -> bool {
    press.distance(release) < CLICK_DRAG_TOLERANCE
}

/// First name in the hit chain (nearest first) that matches a part keyword.
pub fn resolve_part_name<'a>(names: &'a [String], manifest: &ViewerManifest) -> Option<&'a str> {
    names
        .iter()
        .find(|name| manifest.part_for_object(name).is_some())
        .map(String::as_str)
}

/// A left click on the scene, in window coordinates, after the model is in.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SceneClick {
    pub position: Vec2,
}

/// Turn left press/release pairs into `SceneClick`s. Drags, presses that
/// started over the panel and clicks before the model loads are dropped.
pub fn track_scene_clicks(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    ui_pointer: Res<UiPointerState>,
    loading_progress: Res<LoadingProgress>,
    mut tracker: ResMut<ClickTracker>,
    mut clicks: EventWriter<SceneClick>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        tracker.press_position = if ui_pointer.hovered {
            None
        } else {
            window.cursor_position()
        };
    }

    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }
    let Some(press) = tracker.press_position.take() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    if !is_click(press, cursor_pos) {
        return;
    }

    // Clicks before the model exists are ignored.
    if !loading_progress.model_ready() {
        return;
    }
    clicks.write(SceneClick {
        position: cursor_pos,
    });
}

/// Raycast into the model for each click and activate the part that was hit.
pub fn pick_part_on_click(
    mut clicks: EventReader<SceneClick>,
    cameras: Query<(&Camera, &GlobalTransform), With<ProductCamera>>,
    manifest: Option<Res<ViewerManifest>>,
    mut ray_cast: MeshRayCast,
    parents: Query<&ChildOf>,
    names: Query<&Name>,
    mut command_events: EventWriter<ViewerCommandEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(cursor_pos) = clicks.read().last().map(|click| click.position) else {
        return;
    };
    let Some(manifest) = manifest else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };

    let Some(hit) = ray_cast
        .cast_ray(ray, &MeshRayCastSettings::default())
        .first()
        .map(|(entity, _)| *entity)
    else {
        return;
    };

    let hit_names = names_from_hit(hit, &parents, &names);
    let Some(object_name) = hit_names.first() else {
        return;
    };
    info!("Clicked object: {}", object_name);

    let part_name = resolve_part_name(&hit_names, &manifest);
    rpc_interface.send_notification(
        "object_clicked",
        serde_json::json!({
            "object": object_name,
            "part": part_name,
        }),
    );

    if let Some(part_name) = part_name {
        command_events.write(ViewerCommandEvent::new(
            ViewerCommand::ActivatePart(part_name.to_string()),
            CommandSource::Pointer,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::event::Events;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn small_pointer_travel_is_a_click() {
        assert!(is_click(Vec2::new(100.0, 100.0), Vec2::new(102.0, 101.0)));
        assert!(!is_click(Vec2::new(100.0, 100.0), Vec2::new(140.0, 100.0)));
    }

    #[test]
    fn primitive_hit_resolves_to_part_node() {
        let manifest = ViewerManifest::default();
        let chain = names(&["Cylinder.012.Metal", "PickupArm", "ProductModel"]);
        assert_eq!(resolve_part_name(&chain, &manifest), Some("PickupArm"));
    }

    #[test]
    fn nearest_matching_name_wins() {
        let manifest = ViewerManifest::default();
        let chain = names(&["VolumeControl_Knob", "DustCover_Group"]);
        assert_eq!(
            resolve_part_name(&chain, &manifest),
            Some("VolumeControl_Knob")
        );
    }

    #[test]
    fn base_hit_has_no_part() {
        let manifest = ViewerManifest::default();
        let chain = names(&["Base", "ProductModel"]);
        assert_eq!(resolve_part_name(&chain, &manifest), None);
    }

    fn click_app(model_ready: bool) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<SceneClick>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<UiPointerState>()
            .init_resource::<ClickTracker>()
            .insert_resource(LoadingProgress {
                scene_ready: model_ready,
                ..default()
            })
            .add_systems(Update, track_scene_clicks);
        app.world_mut().spawn((Window::default(), PrimaryWindow));
        app
    }

    fn move_cursor(app: &mut App, position: Vec2) {
        let world = app.world_mut();
        let mut windows = world.query_filtered::<&mut Window, With<PrimaryWindow>>();
        for mut window in windows.iter_mut(world) {
            window.set_cursor_position(Some(position));
        }
    }

    fn press_and_release(app: &mut App, press: Vec2, release: Vec2) {
        move_cursor(app, press);
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();

        move_cursor(app, release);
        let mut input = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        input.clear();
        input.release(MouseButton::Left);
        app.update();
    }

    fn clicks(app: &App) -> Vec<SceneClick> {
        let events = app.world().resource::<Events<SceneClick>>();
        events.get_cursor().read(events).copied().collect()
    }

    #[test]
    fn still_pointer_produces_click() {
        let mut app = click_app(true);
        press_and_release(&mut app, Vec2::new(300.0, 200.0), Vec2::new(302.0, 201.0));
        assert_eq!(
            clicks(&app),
            vec![SceneClick {
                position: Vec2::new(302.0, 201.0)
            }]
        );
    }

    #[test]
    fn drag_of_tolerance_or_more_is_not_a_click() {
        let mut app = click_app(true);
        press_and_release(&mut app, Vec2::new(300.0, 200.0), Vec2::new(304.0, 200.0));
        assert!(clicks(&app).is_empty());
    }

    #[test]
    fn clicks_before_model_load_are_ignored() {
        let mut app = click_app(false);
        press_and_release(&mut app, Vec2::new(300.0, 200.0), Vec2::new(300.0, 200.0));
        assert!(clicks(&app).is_empty());
    }

    #[test]
    fn press_over_panel_is_not_a_scene_click() {
        let mut app = click_app(true);
        app.world_mut().resource_mut::<UiPointerState>().hovered = true;
        press_and_release(&mut app, Vec2::new(20.0, 20.0), Vec2::new(20.0, 20.0));
        assert!(clicks(&app).is_empty());
    }
}
