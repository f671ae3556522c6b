use bevy::prelude::*;

use crate::engine::camera::orbit_camera::CameraPreset;

/// Whether the pointer is over the panel, so scene input can stand down.
#[derive(Resource, Default, Debug)]
pub struct UiPointerState {
    pub hovered: bool,
    /// The current left-button press began over the panel.
    pub drag_started_over_ui: bool,
}

/// What a panel button asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    Reset,
    View(CameraPreset),
    LightOn,
    LightOff,
    /// Texture preset by position in the manifest.
    Texture(usize),
}

impl PanelAction {
    pub fn label(&self) -> String {
        match self {
            Self::Reset => "Reset".to_string(),
            Self::View(preset) => preset.label().to_string(),
            Self::LightOn => "Light On".to_string(),
            Self::LightOff => "Light Off".to_string(),
            Self::Texture(index) => format!("Texture {}", index + 1),
        }
    }
}

// Components
#[derive(Component)]
pub struct PanelRoot;
#[derive(Component)]
pub struct ViewerButton(pub PanelAction);
#[derive(Component)]
pub struct IntensitySlider;
#[derive(Component)]
pub struct SliderFill;
#[derive(Component)]
pub struct IntensityLabel;

pub const BUTTON_IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
pub const BUTTON_HOVER: Color = Color::srgb(0.26, 0.28, 0.32);
pub const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);

/// Recompute pointer-over-panel from the UI focus system's `Interaction`s.
pub fn track_ui_pointer(
    interactions: Query<&Interaction, With<Node>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut ui_pointer: ResMut<UiPointerState>,
) {
    let hovered = interactions.iter().any(|i| *i != Interaction::None);
    if ui_pointer.hovered != hovered {
        ui_pointer.hovered = hovered;
    }

    if mouse_button.just_pressed(MouseButton::Left) {
        ui_pointer.drag_started_over_ui = hovered;
    } else if !mouse_button.pressed(MouseButton::Left) && ui_pointer.drag_started_over_ui {
        ui_pointer.drag_started_over_ui = false;
    }
}
