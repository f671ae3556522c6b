use bevy::prelude::*;
use constants::model::DISK_SPIN_RATE;

/// Vinyl disk rotation driven outside the animation graph.
#[derive(Resource, Default, Debug)]
pub struct DiskSpin {
    pub spinning: bool,
    pub disk: Option<Entity>,
}

impl DiskSpin {
    pub fn toggle(&mut self) -> bool {
        self.spinning = !self.spinning;
        self.spinning
    }
}

/// Angle (radians, around local Y) to add for a frame of `delta_secs`.
pub fn spin_step(delta_secs: f32) -> f32 {
    -delta_secs * DISK_SPIN_RATE
}

pub fn spin_disk(
    disk_spin: Res<DiskSpin>,
    time: Res<Time>,
    mut transforms: Query<&mut Transform>,
) {
    if !disk_spin.spinning {
        return;
    }
    let Some(disk) = disk_spin.disk else {
        return;
    };
    if let Ok(mut transform) = transforms.get_mut(disk) {
        transform.rotate_local_y(spin_step(time.delta_secs()));
    }
}
