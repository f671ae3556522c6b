use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;

use super::state::*;
use crate::engine::assets::viewer_manifest::ViewerManifest;
use crate::engine::scene::lighting::AmbientIntensity;
use crate::tools::commands::{CommandSource, ViewerCommand, ViewerCommandEvent};

/// Translate a panel button into the command it stands for.
pub fn command_for_action(
    action: PanelAction,
    manifest: Option<&ViewerManifest>,
) -> Option<ViewerCommand> {
    match action {
        PanelAction::Reset => Some(ViewerCommand::Reset),
        PanelAction::View(preset) => Some(ViewerCommand::CameraView(preset)),
        PanelAction::LightOn => Some(ViewerCommand::SetAmbientIntensity(1.0)),
        PanelAction::LightOff => Some(ViewerCommand::SetAmbientIntensity(0.0)),
        PanelAction::Texture(index) => manifest
            .and_then(|m| m.texture_at(index))
            .map(|t| ViewerCommand::ApplyTexture(t.name.clone())),
    }
}

// Panel buttons fire viewer commands and shade on hover/press
pub fn viewer_button_interaction(
    mut q: Query<
        (&Interaction, &ViewerButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    manifest: Option<Res<ViewerManifest>>,
    mut command_events: EventWriter<ViewerCommandEvent>,
) {
    for (interaction, button, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                *bg = BackgroundColor(BUTTON_PRESSED);
                match command_for_action(button.0, manifest.as_deref()) {
                    Some(command) => {
                        command_events.write(ViewerCommandEvent::new(command, CommandSource::Panel));
                    }
                    None => warn!("No texture preset for {}", button.0.label()),
                }
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVER),
            Interaction::None => *bg = BackgroundColor(BUTTON_IDLE),
        }
    }
}

/// Slider value under the cursor; `normalized` is centred on the node.
pub fn slider_value(normalized_x: f32) -> f32 {
    (normalized_x + 0.5).clamp(0.0, 1.0)
}

// Dragging on the slider track sets the ambient intensity
pub fn intensity_slider_interaction(
    q: Query<(&Interaction, &RelativeCursorPosition), With<IntensitySlider>>,
    intensity: Res<AmbientIntensity>,
    mut command_events: EventWriter<ViewerCommandEvent>,
) {
    for (interaction, cursor) in &q {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(normalized) = cursor.normalized else {
            continue;
        };
        let value = slider_value(normalized.x);
        if (value - intensity.0).abs() > f32::EPSILON {
            command_events.write(ViewerCommandEvent::new(
                ViewerCommand::SetAmbientIntensity(value),
                CommandSource::Panel,
            ));
        }
    }
}
