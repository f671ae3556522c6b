/// How a clip reacts to a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPlayback {
    /// Play once forwards when toggled on, backwards when toggled off, hold the end frame.
    Toggle,
    /// Flag flips but the clip never plays; motion is driven by a system.
    Manual,
}

pub struct ClipInfo {
    pub name: &'static str,
    pub playback: ClipPlayback,
}

pub const CLIP_MAP: &[ClipInfo] = &[
    ClipInfo {
        name: "DustCover_Close",
        playback: ClipPlayback::Toggle,
    },
    ClipInfo {
        name: "DiskSpin",
        playback: ClipPlayback::Manual,
    },
    ClipInfo {
        name: "ButtonPush",
        playback: ClipPlayback::Toggle,
    },
    ClipInfo {
        name: "PickupPlace",
        playback: ClipPlayback::Toggle,
    },
];

pub struct PartInfo {
    /// Substring matched against clicked object names.
    pub keyword: &'static str,
    pub clip: &'static str,
    pub toggles_disk_spin: bool,
}

/// Checked in order; the first keyword contained in the name wins.
pub const PART_MAP: &[PartInfo] = &[
    PartInfo {
        keyword: "DustCover",
        clip: "DustCover_Close",
        toggles_disk_spin: false,
    },
    PartInfo {
        keyword: "VolumeControl",
        clip: "ButtonPush",
        toggles_disk_spin: true,
    },
    PartInfo {
        keyword: "Pickup",
        clip: "PickupPlace",
        toggles_disk_spin: false,
    },
];
