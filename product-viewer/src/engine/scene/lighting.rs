use bevy::prelude::*;
use constants::lighting::{
    AMBIENT_BRIGHTNESS_SCALE, AMBIENT_INTENSITY_MAX, AMBIENT_INTENSITY_MIN,
    DEFAULT_AMBIENT_INTENSITY, DIRECTIONAL_ILLUMINANCE, DIRECTIONAL_LIGHT_POSITION,
};

use crate::engine::error::ViewerError;
use crate::rpc::web_rpc::WebRpcInterface;

/// User-facing ambient light intensity, 0.0 (off) to 1.0 (full).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct AmbientIntensity(pub f32);

impl Default for AmbientIntensity {
    fn default() -> Self {
        Self(DEFAULT_AMBIENT_INTENSITY)
    }
}

impl AmbientIntensity {
    /// Validate and clamp a requested intensity.
    pub fn checked(value: f32) -> Result<Self, ViewerError> {
        if !value.is_finite() {
            return Err(ViewerError::InvalidIntensity(value));
        }
        Ok(Self(value.clamp(AMBIENT_INTENSITY_MIN, AMBIENT_INTENSITY_MAX)))
    }

    pub fn brightness(&self) -> f32 {
        self.0 * AMBIENT_BRIGHTNESS_SCALE
    }
}

pub fn spawn_lighting(commands: &mut Commands, intensity: AmbientIntensity) {
    commands.insert_resource(ClearColor(Color::WHITE));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: intensity.brightness(),
        ..default()
    });

    commands.spawn((
        Name::new("KeyLight"),
        DirectionalLight {
            illuminance: DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(DIRECTIONAL_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Push intensity changes into the renderer's ambient light and tell the host page.
pub fn sync_ambient_light(
    intensity: Res<AmbientIntensity>,
    mut ambient: ResMut<AmbientLight>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !intensity.is_changed() {
        return;
    }

    ambient.brightness = intensity.brightness();

    if !intensity.is_added() {
        debug!("Ambient intensity set to {:.2}", intensity.0);
        rpc_interface.send_notification(
            "light_intensity_changed",
            serde_json::json!({ "intensity": intensity.0 }),
        );
    }
}
