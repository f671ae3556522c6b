use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;

use super::state::*;
use crate::engine::camera::orbit_camera::CameraPreset;
use crate::engine::scene::lighting::AmbientIntensity;

const PANEL_WIDTH: f32 = 220.0;

// Spawns the control panel on the left edge of the window
pub fn spawn_control_panel(mut commands: Commands, intensity: Res<AmbientIntensity>) {
    commands
        .spawn((
            PanelRoot,
            Name::new("ControlPanel"),
            Interaction::default(),
            BackgroundColor(Color::srgba(0.10, 0.11, 0.13, 0.92)),
            Node {
                width: Val::Px(PANEL_WIDTH),
                position_type: PositionType::Absolute,
                left: Val::Px(12.0),
                top: Val::Px(12.0),
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(8.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                ..default()
            },
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Product Viewer"),
                TextFont { font_size: 18.0, ..default() },
                TextColor(Color::WHITE),
            ));

            spawn_button(panel, PanelAction::Reset);

            section_label(panel, "Camera");
            button_row(panel, |row| {
                for preset in CameraPreset::ALL {
                    spawn_button(row, PanelAction::View(preset));
                }
            });

            section_label(panel, "Lighting");
            button_row(panel, |row| {
                spawn_button(row, PanelAction::LightOn);
                spawn_button(row, PanelAction::LightOff);
            });
            spawn_intensity_slider(panel, intensity.0);

            section_label(panel, "Texture");
            button_row(panel, |row| {
                spawn_button(row, PanelAction::Texture(0));
                spawn_button(row, PanelAction::Texture(1));
            });
        });
}

fn section_label(parent: &mut ChildSpawnerCommands, label: &str) {
    parent.spawn((
        Text::new(label),
        TextFont { font_size: 14.0, ..default() },
        TextColor(Color::srgb(0.7, 0.72, 0.76)),
    ));
}

fn button_row(parent: &mut ChildSpawnerCommands, build: impl FnOnce(&mut ChildSpawnerCommands)) {
    parent
        .spawn(Node {
            width: Val::Percent(100.0),
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            column_gap: Val::Px(6.0),
            row_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(build);
}

fn spawn_button(parent: &mut ChildSpawnerCommands, action: PanelAction) {
    parent
        .spawn((
            ViewerButton(action),
            Button,
            Name::new(format!("{}Button", action.label().replace(' ', ""))),
            BackgroundColor(BUTTON_IDLE),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                flex_grow: 1.0,
                height: Val::Px(30.0),
                padding: UiRect::horizontal(Val::Px(8.0)),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(action.label()),
                TextFont { font_size: 14.0, ..default() },
                TextColor(Color::WHITE),
            ));
        });
}

fn spawn_intensity_slider(parent: &mut ChildSpawnerCommands, value: f32) {
    parent.spawn((
        IntensityLabel,
        Text::new(intensity_label(value)),
        TextFont { font_size: 14.0, ..default() },
        TextColor(Color::WHITE),
    ));

    parent
        .spawn((
            IntensitySlider,
            Name::new("IntensitySlider"),
            Interaction::default(),
            RelativeCursorPosition::default(),
            BackgroundColor(BUTTON_IDLE),
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(14.0),
                ..default()
            },
        ))
        .with_children(|track| {
            track.spawn((
                SliderFill,
                BackgroundColor(Color::srgb(0.85, 0.65, 0.25)),
                Node {
                    width: Val::Percent(value * 100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
            ));
        });
}

pub fn intensity_label(value: f32) -> String {
    format!("Ambient Light: {value:.2}")
}

/// Keep the slider in step with the intensity, whoever changed it.
pub fn reflect_intensity_slider(
    intensity: Res<AmbientIntensity>,
    mut fills: Query<&mut Node, With<SliderFill>>,
    mut labels: Query<&mut Text, With<IntensityLabel>>,
) {
    if !intensity.is_changed() {
        return;
    }
    for mut node in &mut fills {
        node.width = Val::Percent(intensity.0 * 100.0);
    }
    for mut text in &mut labels {
        text.0 = intensity_label(intensity.0);
    }
}
