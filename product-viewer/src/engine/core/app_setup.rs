use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::camera::{FAR_PLANE, FOV_DEGREES, NEAR_PLANE};

// Crate engine modules
use crate::engine::animation::part_animations::PartAnimations;
use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::camera::orbit_camera::{OrbitCamera, ProductCamera, orbit_camera_controller};
use crate::engine::core::app_state::{
    AppState, FpsText, transition_to_running, transition_to_spawning_scene,
    update_loading_frontend,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::model_loader::{ModelLoader, spawn_model_when_ready};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::disk_spin::{DiskSpin, spin_disk};
use crate::engine::scene::lighting::{AmbientIntensity, spawn_lighting, sync_ambient_light};
use crate::engine::scene::model::BaseSurface;
use crate::engine::systems::fps_tracking::fps_notification_system;
// Crate tools modules
use crate::tools::{
    commands::{ViewerCommandEvent, command_handlers, handle_keyboard_shortcuts},
    picking::{ClickTracker, SceneClick, pick_part_on_click, track_scene_clicks},
    texture_swap::{PendingTexture, apply_pending_texture},
};
// Web RPC and panel
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::ui::ControlPanelPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

const LOG_FILTER: &str = "wgpu=error,naga=warn,bevy_render=info,product_viewer=debug";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers ViewerManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ViewerManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(ControlPanelPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<ModelLoader>()
        .init_resource::<OrbitCamera>()
        .init_resource::<AmbientIntensity>()
        .init_resource::<PartAnimations>()
        .init_resource::<DiskSpin>()
        .init_resource::<BaseSurface>()
        .init_resource::<PendingTexture>()
        .init_resource::<ClickTracker>()
        .add_event::<ViewerCommandEvent>()
        .add_event::<SceneClick>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_manifest_system,
                spawn_model_when_ready,
                transition_to_spawning_scene,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            transition_to_running.run_if(in_state(AppState::SpawningScene)),
        )
        .add_systems(Update, update_loading_frontend);

    // Input and commands run in every state; model-dependent handlers
    // check LoadingProgress themselves.
    app.add_systems(
        Update,
        (
            handle_keyboard_shortcuts, // Native shortcuts or no-op for WASM
            track_scene_clicks,
            pick_part_on_click,
            command_handlers(),
            orbit_camera_controller,
            sync_ambient_light,
            apply_pending_texture,
        )
            .chain(),
    );

    // Runtime systems - only run once loading has settled
    app.add_systems(
        Update,
        (spin_disk, fps_notification_system).run_if(in_state(AppState::Running)),
    );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn spawn_camera(commands: &mut Commands, orbit: &OrbitCamera) {
    commands.spawn((
        ProductCamera,
        Name::new("ProductCamera"),
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        orbit.transform(),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, orbit: Res<OrbitCamera>, intensity: Res<AmbientIntensity>) {
    spawn_camera(&mut commands, &orbit);
    spawn_lighting(&mut commands, *intensity);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands.spawn((
        Text::new("FPS: "),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.1, 0.1)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        FpsText,
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
