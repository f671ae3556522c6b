use bevy::math::Vec3;

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Point the camera orbits around and looks at.
pub const ORBIT_TARGET: Vec3 = Vec3::ZERO;

pub const FRONT_VIEW: Vec3 = Vec3::new(0.0, 3.0, 4.0);
pub const TOP_VIEW: Vec3 = Vec3::new(0.0, 10.0, 0.0);
pub const LEFT_VIEW: Vec3 = Vec3::new(-5.0, 3.0, 0.0);
pub const RIGHT_VIEW: Vec3 = Vec3::new(5.0, 3.0, 0.0);

pub const MIN_DISTANCE: f32 = 2.0;
pub const MAX_DISTANCE: f32 = 10.0;

/// Fraction of the pending rotation applied per frame.
pub const DAMPING_FACTOR: f32 = 0.05;
pub const ROTATE_SPEED: f32 = 1.0;

/// Radius multiplier per wheel line when zooming in.
pub const ZOOM_STEP: f32 = 0.95;

/// Keeps the polar angle away from the poles.
pub const POLAR_EPSILON: f32 = 1.0e-3;

/// Pointer travel (logical pixels) above which a press is a drag, not a click.
pub const CLICK_DRAG_TOLERANCE: f32 = 4.0;
