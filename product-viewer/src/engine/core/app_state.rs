use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    SpawningScene,
    Running,
}

#[derive(Component)]
pub struct FpsText;

// Transition to SpawningScene once the scene root exists
pub fn transition_to_spawning_scene(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.scene_spawned {
        info!("→ Transitioning to SpawningScene state");
        next_state.set(AppState::SpawningScene);
    } else if loading_progress.model_failed {
        warn!("→ Model failed to load, running without it");
        next_state.set(AppState::Running);
    }
}

// Final transition to running state
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.is_settled() {
        info!("→ All systems ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

/// Report loading stages to the host page whenever they change.
pub fn update_loading_frontend(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !loading_progress.is_changed() {
        return;
    }
    match serde_json::to_value(&*loading_progress) {
        Ok(params) => rpc_interface.send_notification("loading_progress", params),
        Err(e) => error!("Failed to serialise loading progress: {}", e),
    }
}
