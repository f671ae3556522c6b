//! Native control panel built with `bevy_ui`.
//!
//! Mirrors what the host page offers over RPC on WASM: reset, the four camera
//! presets, light on/off with an ambient slider, and the two texture presets.
//! Every control emits a `ViewerCommandEvent` with `CommandSource::Panel`.
//!
//! `UiPointerState` is maintained on every platform so the orbit controller
//! and click picking can ignore input that lands on the panel.

/// Button and slider handlers that turn UI input into viewer commands.
pub mod interactions;

/// Panel layout and the slider reflection system.
pub mod sidebar;

/// Pointer-over-UI tracking, panel actions and marker components.
pub mod state;

use bevy::prelude::*;
use bevy::ui::UiSystem;

use state::{UiPointerState, track_ui_pointer};

#[cfg(not(target_arch = "wasm32"))]
use interactions::{intensity_slider_interaction, viewer_button_interaction};
#[cfg(not(target_arch = "wasm32"))]
use sidebar::{reflect_intensity_slider, spawn_control_panel};

pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiPointerState>().add_systems(
            PreUpdate,
            track_ui_pointer.after(UiSystem::Focus),
        );

        // Panel only for native builds.
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(Startup, spawn_control_panel);
            app.add_systems(
                Update,
                (
                    viewer_button_interaction,
                    intensity_slider_interaction,
                    reflect_intensity_slider,
                ),
            );
        }
    }
}
