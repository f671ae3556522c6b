use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;

use crate::engine::core::app_state::FpsText;
use crate::rpc::web_rpc::{WebRpcInterface, current_fps};

const FPS_NOTIFY_INTERVAL_SECS: f32 = 0.5;

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();
    if current_time - *last_send_time < FPS_NOTIFY_INTERVAL_SECS {
        return;
    }

    let fps = current_fps(&diagnostics);
    if fps > 0.0 {
        rpc_interface.send_notification("fps_update", serde_json::json!({ "fps": fps }));
        *last_send_time = current_time;
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    let fps = current_fps(&diagnostics);
    if fps <= 0.0 {
        return;
    }
    for mut text in &mut query {
        text.0 = format!("FPS: {fps:.1}");
    }
}
