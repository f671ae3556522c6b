use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::camera::{
    DAMPING_FACTOR, FRONT_VIEW, MAX_DISTANCE, MIN_DISTANCE, ORBIT_TARGET, POLAR_EPSILON,
    ROTATE_SPEED, ZOOM_STEP,
};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::ui::state::UiPointerState;

/// Marker for the single scene camera.
#[derive(Component)]
pub struct ProductCamera;

/// Named camera angles available from the panel and RPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraPreset {
    Front,
    Top,
    Left,
    Right,
}

impl CameraPreset {
    pub const ALL: [CameraPreset; 4] = [Self::Front, Self::Top, Self::Left, Self::Right];

    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "front" => Some(Self::Front),
            "top" => Some(Self::Top),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Top => "Top",
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// Orbit controller state: spherical coordinates around a fixed target.
///
/// Azimuth is measured from +Z towards +X, polar from +Y. Rotation input is
/// accumulated into pending deltas that are bled off with damping each frame.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping: f32,
    pub rotate_speed: f32,
    pending_azimuth: f32,
    pending_polar: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let mut camera = Self {
            target: ORBIT_TARGET,
            radius: 1.0,
            polar: FRAC_PI_2,
            azimuth: 0.0,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            damping: DAMPING_FACTOR,
            rotate_speed: ROTATE_SPEED,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
        };
        camera.move_to(FRONT_VIEW);
        camera
    }
}

impl OrbitCamera {
    /// Place the camera at `position`, looking at the target, and drop any pending rotation.
    pub fn move_to(&mut self, position: Vec3) {
        let offset = position - self.target;
        let radius = offset.length();
        if radius > f32::EPSILON {
            self.azimuth = offset.x.atan2(offset.z);
            self.polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        }
        self.radius = radius;
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.clamp();
    }

    /// Queue a drag of `delta` pixels in a viewport `viewport_height` pixels tall.
    pub fn rotate_by_pixels(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let scale = TAU * self.rotate_speed / viewport_height;
        self.pending_azimuth -= delta.x * scale;
        self.pending_polar -= delta.y * scale;
    }

    /// Zoom by wheel lines; positive lines move closer.
    pub fn zoom_by_lines(&mut self, lines: f32) {
        self.radius *= ZOOM_STEP.powf(lines);
        self.clamp();
    }

    /// Apply one damped step of the pending rotation.
    pub fn step(&mut self) {
        self.azimuth += self.pending_azimuth * self.damping;
        self.polar += self.pending_polar * self.damping;
        self.pending_azimuth *= 1.0 - self.damping;
        self.pending_polar *= 1.0 - self.damping;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        self.polar = self.polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.azimuth = self.azimuth.rem_euclid(TAU);
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }

    /// Rotation that points the camera's forward (-Z) at the target.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.azimuth, self.polar - FRAC_PI_2, 0.0)
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position(),
            rotation: self.rotation(),
            ..default()
        }
    }

    pub fn has_pending_motion(&self) -> bool {
        self.pending_azimuth.abs() > 1.0e-5 || self.pending_polar.abs() > 1.0e-5
    }
}

/// Left-drag orbits, wheel zooms. Panning is intentionally absent.
pub fn orbit_camera_controller(
    mut camera_query: Query<&mut Transform, With<ProductCamera>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    ui_pointer: Res<UiPointerState>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if !ui_pointer.drag_started_over_ui {
        if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
            let viewport_height = windows.single().map(|w| w.height()).unwrap_or(0.0);
            orbit.rotate_by_pixels(mouse_delta, viewport_height);
        }
    }

    let mut scroll_lines = 0.0;
    for ev in scroll_events.read() {
        scroll_lines += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.01,
        };
    }
    if scroll_lines.abs() > f32::EPSILON && !ui_pointer.hovered {
        orbit.zoom_by_lines(scroll_lines);
    }

    orbit.step();
    *camera_transform = orbit.transform();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!(a.distance(b) < 1.0e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn starts_at_front_view() {
        let orbit = OrbitCamera::default();
        assert_vec_near(orbit.position(), Vec3::new(0.0, 3.0, 4.0));
        assert!((orbit.radius - 5.0).abs() < 1.0e-5);
    }

    #[test]
    fn presets_round_trip_through_spherical() {
        let mut orbit = OrbitCamera::default();
        for position in [Vec3::new(-5.0, 3.0, 0.0), Vec3::new(5.0, 3.0, 0.0)] {
            orbit.move_to(position);
            assert_vec_near(orbit.position(), position);
        }
    }

    #[test]
    fn top_view_stays_off_the_pole() {
        let mut orbit = OrbitCamera::default();
        orbit.move_to(Vec3::new(0.0, 10.0, 0.0));
        assert!(orbit.polar >= POLAR_EPSILON);
        assert!((orbit.radius - 10.0).abs() < 1.0e-5);
        assert!(orbit.position().y > 9.99);
        assert!(orbit.rotation().is_finite());
    }

    #[test]
    fn camera_looks_at_target() {
        let mut orbit = OrbitCamera::default();
        orbit.move_to(Vec3::new(-5.0, 3.0, 0.0));
        let transform = orbit.transform();
        let forward = transform.forward().as_vec3();
        let expected = (orbit.target - transform.translation).normalize();
        assert_vec_near(forward, expected);
    }

    #[test]
    fn distance_is_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.move_to(Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(orbit.radius, MAX_DISTANCE);

        orbit.zoom_by_lines(200.0);
        assert_eq!(orbit.radius, MIN_DISTANCE);
    }

    #[test]
    fn zoom_in_shrinks_radius() {
        let mut orbit = OrbitCamera::default();
        orbit.zoom_by_lines(1.0);
        assert!((orbit.radius - 5.0 * 0.95).abs() < 1.0e-4);
        orbit.zoom_by_lines(-1.0);
        assert!((orbit.radius - 5.0).abs() < 1.0e-4);
    }

    #[test]
    fn damping_spreads_rotation_over_frames() {
        let mut orbit = OrbitCamera::default();
        let start = orbit.azimuth;
        orbit.rotate_by_pixels(Vec2::new(-100.0, 0.0), 600.0);

        orbit.step();
        let first = orbit.azimuth - start;
        let total = TAU * 100.0 / 600.0;
        assert!((first - total * DAMPING_FACTOR).abs() < 1.0e-4);

        for _ in 0..400 {
            orbit.step();
        }
        assert!(!orbit.has_pending_motion());
        assert!((orbit.azimuth - start - total).abs() < 1.0e-3);
    }

    #[test]
    fn move_to_cancels_pending_rotation() {
        let mut orbit = OrbitCamera::default();
        orbit.rotate_by_pixels(Vec2::new(300.0, 120.0), 600.0);
        orbit.move_to(Vec3::new(5.0, 3.0, 0.0));
        assert!(!orbit.has_pending_motion());
        orbit.step();
        assert_vec_near(orbit.position(), Vec3::new(5.0, 3.0, 0.0));
    }

    #[test]
    fn preset_names_parse_case_insensitively() {
        assert_eq!(CameraPreset::from_string("TOP"), Some(CameraPreset::Top));
        assert_eq!(CameraPreset::from_string("back"), None);
    }

    fn controller_app(pointer: UiPointerState) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<OrbitCamera>()
            .insert_resource(pointer)
            .add_systems(Update, orbit_camera_controller);
        app.world_mut().spawn((Window::default(), PrimaryWindow));
        app.world_mut()
            .spawn((ProductCamera, Transform::default()));
        app
    }

    fn drag(app: &mut App, delta: Vec2) {
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.world_mut().send_event(MouseMotion { delta });
        app.update();
    }

    fn scroll(app: &mut App, lines: f32) {
        app.world_mut().send_event(MouseWheel {
            unit: MouseScrollUnit::Line,
            x: 0.0,
            y: lines,
            window: Entity::PLACEHOLDER,
        });
        app.update();
    }

    fn camera_position(app: &mut App) -> Vec3 {
        let world = app.world_mut();
        let mut cameras = world.query_filtered::<&Transform, With<ProductCamera>>();
        cameras.single(world).map(|t| t.translation).unwrap()
    }

    #[test]
    fn drag_over_scene_orbits_camera() {
        let mut app = controller_app(UiPointerState::default());
        let start = app.world().resource::<OrbitCamera>().azimuth;
        drag(&mut app, Vec2::new(-120.0, 0.0));

        assert!((app.world().resource::<OrbitCamera>().azimuth - start).abs() > 1.0e-3);
        let position = camera_position(&mut app);
        assert!(position.distance(FRONT_VIEW) > 1.0e-3);
    }

    #[test]
    fn drag_started_over_panel_does_not_orbit() {
        let mut app = controller_app(UiPointerState {
            hovered: false,
            drag_started_over_ui: true,
        });
        drag(&mut app, Vec2::new(-120.0, 40.0));

        let orbit = app.world().resource::<OrbitCamera>();
        assert!(!orbit.has_pending_motion());
        assert!(camera_position(&mut app).distance(FRONT_VIEW) < 1.0e-3);
    }

    #[test]
    fn wheel_zooms_unless_over_panel() {
        let mut app = controller_app(UiPointerState::default());
        scroll(&mut app, 2.0);
        assert!(app.world().resource::<OrbitCamera>().radius < 5.0);

        let mut app = controller_app(UiPointerState {
            hovered: true,
            drag_started_over_ui: false,
        });
        scroll(&mut app, 2.0);
        assert!((app.world().resource::<OrbitCamera>().radius - 5.0).abs() < 1.0e-5);
    }
}
