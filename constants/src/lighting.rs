use bevy::math::Vec3;

pub const DEFAULT_AMBIENT_INTENSITY: f32 = 0.5;
pub const AMBIENT_INTENSITY_MIN: f32 = 0.0;
pub const AMBIENT_INTENSITY_MAX: f32 = 1.0;

/// Bevy ambient brightness (cd/m²) produced by an intensity of 1.0.
pub const AMBIENT_BRIGHTNESS_SCALE: f32 = 600.0;

pub const DIRECTIONAL_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 10.0, 5.0);

/// Illuminance (lux) of the key light.
pub const DIRECTIONAL_ILLUMINANCE: f32 = 4000.0;
