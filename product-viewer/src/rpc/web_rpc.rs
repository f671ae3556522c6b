use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::animation::part_animations::PartAnimations;
use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::camera::orbit_camera::{CameraPreset, OrbitCamera};
use crate::engine::error::ViewerError;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::disk_spin::DiskSpin;
use crate::engine::scene::lighting::AmbientIntensity;
use crate::tools::commands::{CommandSource, ViewerCommand, ViewerCommandEvent};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing queue for the host page: notifications and request responses.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Number of notifications waiting to be posted.
    pub fn pending_notifications(&self) -> usize {
        self.outgoing_notifications.len()
    }

    /// Methods of the queued notifications, oldest first.
    pub fn notification_methods(&self) -> Vec<&str> {
        self.outgoing_notifications
            .iter()
            .map(|n| n.method.as_str())
            .collect()
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the postMessage RPC layer for iframe deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Cheap filter before the JSON parse in the ECS.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Ownership moves to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Messages captured by the browser listener, drained once per frame.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw message text from the host page.
#[derive(Event)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Read-only view of the viewer used to answer queries and validate params.
#[derive(Debug, Clone, Default)]
pub struct ViewerSnapshot {
    pub model_ready: bool,
    pub clips: Vec<String>,
    pub toggles: Vec<(String, bool)>,
    pub textures: Vec<String>,
    pub ambient_intensity: f32,
    pub camera_position: Vec3,
    pub disk_spinning: bool,
    pub fps: f32,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Option<Res<DiagnosticsStore>>,
    loading_progress: Res<LoadingProgress>,
    animations: Res<PartAnimations>,
    intensity: Res<AmbientIntensity>,
    orbit: Res<OrbitCamera>,
    disk_spin: Res<DiskSpin>,
    manifest: Option<Res<ViewerManifest>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut command_events: EventWriter<ViewerCommandEvent>,
) {
    if events.is_empty() {
        return;
    }

    let snapshot = ViewerSnapshot {
        model_ready: loading_progress.model_ready(),
        clips: animations.clip_names(),
        toggles: animations.toggle_states(),
        textures: manifest
            .as_deref()
            .map(|m| m.textures.iter().map(|t| t.name.clone()).collect())
            .unwrap_or_default(),
        ambient_intensity: intensity.0,
        camera_position: orbit.position(),
        disk_spinning: disk_spin.spinning,
        fps: diagnostics.as_deref().map(current_fps).unwrap_or(0.0),
    };

    for event in events.read() {
        rpc_interface.send_notification(
            "debug_message",
            serde_json::json!({
                "message": format!("Received RPC: {}", event.content)
            }),
        );

        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let mut commands = Vec::new();
                let response = handle_rpc_request(&request, &snapshot, &mut commands);

                for command in commands {
                    command_events.write(ViewerCommandEvent::new(command, CommandSource::Rpc));
                }
                if let Some(response) = response {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

/// Handle one request, pushing any resulting commands. Requests without an id
/// are executed but get no response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    snapshot: &ViewerSnapshot,
    commands: &mut Vec<ViewerCommand>,
) -> Option<RpcResponse> {
    let id = request.id.clone();

    if request.jsonrpc != "2.0" {
        return id.map(|id| create_error_response(id, -32600, "Invalid request", None));
    }

    let result = match request.method.as_str() {
        "reset_scene" => {
            commands.push(ViewerCommand::Reset);
            Ok(serde_json::json!({ "success": true }))
        }
        "set_camera_view" => handle_set_camera_view(&request.params, commands),
        "move_camera" => handle_move_camera(&request.params, commands),
        "set_light_intensity" => handle_set_light_intensity(&request.params, commands),
        "set_light" => handle_set_light(&request.params, commands),
        "set_texture" => handle_set_texture(&request.params, snapshot, commands),
        "toggle_animation" => handle_toggle_animation(&request.params, snapshot, commands),
        "get_viewer_state" => Ok(viewer_state(snapshot)),
        "get_fps" => Ok(serde_json::json!({ "fps": snapshot.fps })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return id.map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    let id = id?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_set_camera_view(
    params: &serde_json::Value,
    commands: &mut Vec<ViewerCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ViewParams {
        view: String,
    }

    let parsed = serde_json::from_value::<ViewParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'view' parameter"))?;
    let preset = CameraPreset::from_string(&parsed.view)
        .ok_or_else(|| RpcError::from(ViewerError::UnknownView(parsed.view.clone())))?;

    commands.push(ViewerCommand::CameraView(preset));
    Ok(serde_json::json!({
        "success": true,
        "view": preset
    }))
}

fn handle_move_camera(
    params: &serde_json::Value,
    commands: &mut Vec<ViewerCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct PositionParams {
        x: f32,
        y: f32,
        z: f32,
    }

    let parsed = serde_json::from_value::<PositionParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'x', 'y' and 'z' parameters"))?;
    let position = Vec3::new(parsed.x, parsed.y, parsed.z);
    if !position.is_finite() {
        return Err(RpcError::invalid_params("Camera position must be finite"));
    }

    commands.push(ViewerCommand::MoveCamera(position));
    Ok(serde_json::json!({ "success": true }))
}

fn handle_set_light_intensity(
    params: &serde_json::Value,
    commands: &mut Vec<ViewerCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct IntensityParams {
        intensity: f32,
    }

    let parsed = serde_json::from_value::<IntensityParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected numeric 'intensity' parameter"))?;
    let checked = AmbientIntensity::checked(parsed.intensity).map_err(RpcError::from)?;

    commands.push(ViewerCommand::SetAmbientIntensity(checked.0));
    Ok(serde_json::json!({
        "success": true,
        "intensity": checked.0
    }))
}

fn handle_set_light(
    params: &serde_json::Value,
    commands: &mut Vec<ViewerCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct LightParams {
        on: bool,
    }

    let parsed = serde_json::from_value::<LightParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected boolean 'on' parameter"))?;
    let intensity = if parsed.on { 1.0 } else { 0.0 };

    commands.push(ViewerCommand::SetAmbientIntensity(intensity));
    Ok(serde_json::json!({
        "success": true,
        "intensity": intensity
    }))
}

fn handle_set_texture(
    params: &serde_json::Value,
    snapshot: &ViewerSnapshot,
    commands: &mut Vec<ViewerCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct TextureParams {
        texture: String,
    }

    let parsed = serde_json::from_value::<TextureParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'texture' parameter"))?;
    if !snapshot.textures.contains(&parsed.texture) {
        return Err(ViewerError::UnknownTexture(parsed.texture).into());
    }
    if !snapshot.model_ready {
        return Err(ViewerError::ModelNotLoaded.into());
    }

    commands.push(ViewerCommand::ApplyTexture(parsed.texture.clone()));
    Ok(serde_json::json!({
        "success": true,
        "texture": parsed.texture
    }))
}

fn handle_toggle_animation(
    params: &serde_json::Value,
    snapshot: &ViewerSnapshot,
    commands: &mut Vec<ViewerCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ClipParams {
        clip: String,
    }

    let parsed = serde_json::from_value::<ClipParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'clip' parameter"))?;
    if !snapshot.model_ready {
        return Err(ViewerError::ModelNotLoaded.into());
    }
    if !snapshot.clips.contains(&parsed.clip) {
        return Err(ViewerError::UnknownClip(parsed.clip).into());
    }

    commands.push(ViewerCommand::ToggleAnimation(parsed.clip.clone()));
    Ok(serde_json::json!({
        "success": true,
        "clip": parsed.clip
    }))
}

fn viewer_state(snapshot: &ViewerSnapshot) -> serde_json::Value {
    let animations: serde_json::Map<String, serde_json::Value> = snapshot
        .toggles
        .iter()
        .map(|(name, on)| (name.clone(), serde_json::Value::Bool(*on)))
        .collect();

    serde_json::json!({
        "model_loaded": snapshot.model_ready,
        "animations": animations,
        "disk_spinning": snapshot.disk_spinning,
        "ambient_intensity": snapshot.ambient_intensity,
        "camera_position": snapshot.camera_position.to_array(),
        "textures": snapshot.textures,
    })
}

/// Smoothed frame rate from the diagnostics store, 0 when not yet measured.
pub fn current_fps(diagnostics: &DiagnosticsStore) -> f32 {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

impl From<ViewerError> for RpcError {
    fn from(err: ViewerError) -> Self {
        if err.is_invalid_input() {
            Self::invalid_params(&err.to_string())
        } else {
            Self::internal_error(&err.to_string())
        }
    }
}
