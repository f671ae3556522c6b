use bevy::animation::RepeatAnimation;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::engine::assets::viewer_manifest::PlaybackMode;

/// A clip bound into the model's animation graph.
#[derive(Debug, Clone)]
pub struct ClipBinding {
    pub node: AnimationNodeIndex,
    pub duration: f32,
    pub playback: PlaybackMode,
}

/// How a toggled clip should be restarted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackStart {
    pub node: AnimationNodeIndex,
    pub seek_time: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToggleOutcome {
    /// No clip with that name was bound.
    Unknown,
    /// Flag flipped; the clip is driven elsewhere.
    FlagOnly { on: bool },
    /// Flag flipped and the clip must be restarted.
    Play { on: bool, start: PlaybackStart },
}

/// Per-clip toggle flags and graph bindings for the loaded model.
#[derive(Resource, Default)]
pub struct PartAnimations {
    pub graph: Option<Handle<AnimationGraph>>,
    /// glTF puts one player on each animated top-level node; all share the graph.
    pub players: Vec<Entity>,
    clips: HashMap<String, ClipBinding>,
    toggles: HashMap<String, bool>,
}

impl PartAnimations {
    pub fn register_clip(&mut self, name: &str, binding: ClipBinding) {
        self.clips.insert(name.to_string(), binding);
        self.toggles.insert(name.to_string(), false);
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn clip_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.clips.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_on(&self, name: &str) -> bool {
        self.toggles.get(name).copied().unwrap_or(false)
    }

    /// Sorted snapshot of every toggle flag.
    pub fn toggle_states(&self) -> Vec<(String, bool)> {
        let mut states: Vec<(String, bool)> =
            self.toggles.iter().map(|(k, v)| (k.clone(), *v)).collect();
        states.sort_by(|a, b| a.0.cmp(&b.0));
        states
    }

    /// Flip the flag for `name`. When on, the clip plays forwards from the start;
    /// when off it plays backwards from its end.
    pub fn toggle(&mut self, name: &str) -> ToggleOutcome {
        let Some(binding) = self.clips.get(name) else {
            return ToggleOutcome::Unknown;
        };
        let Some(flag) = self.toggles.get_mut(name) else {
            return ToggleOutcome::Unknown;
        };
        *flag = !*flag;
        let on = *flag;

        match binding.playback {
            PlaybackMode::Manual => ToggleOutcome::FlagOnly { on },
            PlaybackMode::Toggle => ToggleOutcome::Play {
                on,
                start: PlaybackStart {
                    node: binding.node,
                    seek_time: if on { 0.0 } else { binding.duration },
                    speed: if on { 1.0 } else { -1.0 },
                },
            },
        }
    }

    pub fn clear_toggles(&mut self) {
        for flag in self.toggles.values_mut() {
            *flag = false;
        }
    }
}

/// Restart a clip on the player so it plays once and holds its final frame.
pub fn start_clip(player: &mut AnimationPlayer, start: PlaybackStart) {
    let active = player.play(start.node);
    active.replay();
    active
        .set_repeat(RepeatAnimation::Never)
        .seek_to(start.seek_time)
        .set_speed(start.speed)
        .resume();
}

/// Restart the clip on every bound player. Players whose targets the clip
/// does not touch are left with an active but inert entry.
pub fn start_clip_on_players(
    animations: &PartAnimations,
    players: &mut Query<&mut AnimationPlayer>,
    start: PlaybackStart,
) {
    for &entity in &animations.players {
        if let Ok(mut player) = players.get_mut(entity) {
            start_clip(&mut player, start);
        }
    }
}

/// Local transform captured right after the scene spawned, restored on reset.
#[derive(Component, Debug, Clone, Copy)]
pub struct RestPose(pub Transform);

/// Stop every clip and put animated nodes back to their rest pose.
pub fn stop_all_animations(
    animations: &mut PartAnimations,
    players: &mut Query<&mut AnimationPlayer>,
    rest_poses: &mut Query<(&RestPose, &mut Transform)>,
) {
    for &entity in &animations.players {
        if let Ok(mut player) = players.get_mut(entity) {
            player.stop_all();
        }
    }
    for (rest, mut transform) in rest_poses.iter_mut() {
        *transform = rest.0;
    }
    animations.clear_toggles();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn bound(playback: PlaybackMode, duration: f32) -> ClipBinding {
        ClipBinding {
            node: AnimationNodeIndex::new(1),
            duration,
            playback,
        }
    }

    #[test]
    fn toggle_alternates_direction() {
        let mut animations = PartAnimations::default();
        animations.register_clip("DustCover_Close", bound(PlaybackMode::Toggle, 2.0));

        let ToggleOutcome::Play { on, start } = animations.toggle("DustCover_Close") else {
            panic!("expected playback");
        };
        assert!(on);
        assert_eq!(start.seek_time, 0.0);
        assert_eq!(start.speed, 1.0);

        let ToggleOutcome::Play { on, start } = animations.toggle("DustCover_Close") else {
            panic!("expected playback");
        };
        assert!(!on);
        assert_eq!(start.seek_time, 2.0);
        assert_eq!(start.speed, -1.0);
    }

    #[test]
    fn manual_clips_only_flip_the_flag() {
        let mut animations = PartAnimations::default();
        animations.register_clip("DiskSpin", bound(PlaybackMode::Manual, 1.0));

        assert_eq!(
            animations.toggle("DiskSpin"),
            ToggleOutcome::FlagOnly { on: true }
        );
        assert!(animations.is_on("DiskSpin"));
    }

    #[test]
    fn unknown_clip_is_ignored() {
        let mut animations = PartAnimations::default();
        assert_eq!(animations.toggle("Missing"), ToggleOutcome::Unknown);
        assert!(!animations.is_on("Missing"));
        assert!(animations.toggle_states().is_empty());
    }

    #[test]
    fn clear_resets_every_flag() {
        let mut animations = PartAnimations::default();
        animations.register_clip("ButtonPush", bound(PlaybackMode::Toggle, 0.5));
        animations.register_clip("PickupPlace", bound(PlaybackMode::Toggle, 1.5));
        animations.toggle("ButtonPush");
        animations.toggle("PickupPlace");

        animations.clear_toggles();
        assert_eq!(
            animations.toggle_states(),
            vec![
                ("ButtonPush".to_string(), false),
                ("PickupPlace".to_string(), false)
            ]
        );
    }

    #[test]
    fn every_player_starts_and_stops_the_clip() {
        let mut world = World::new();
        let cover = world.spawn(AnimationPlayer::default()).id();
        let pickup = world.spawn(AnimationPlayer::default()).id();
        let node = AnimationNodeIndex::new(1);

        let mut animations = PartAnimations::default();
        animations.players = vec![cover, pickup];
        animations.register_clip("PickupPlace", bound(PlaybackMode::Toggle, 1.5));
        let ToggleOutcome::Play { start, .. } = animations.toggle("PickupPlace") else {
            panic!("expected playback");
        };
        world.insert_resource(animations);

        world
            .run_system_once(
                move |animations: Res<PartAnimations>,
                      mut players: Query<&mut AnimationPlayer>| {
                    start_clip_on_players(&animations, &mut players, start);
                },
            )
            .unwrap();
        for entity in [cover, pickup] {
            let player = world.get::<AnimationPlayer>(entity).unwrap();
            assert!(player.is_playing_animation(node));
        }

        world
            .run_system_once(
                |mut animations: ResMut<PartAnimations>,
                 mut players: Query<&mut AnimationPlayer>,
                 mut rest_poses: Query<(&RestPose, &mut Transform)>| {
                    stop_all_animations(&mut animations, &mut players, &mut rest_poses);
                },
            )
            .unwrap();
        for entity in [cover, pickup] {
            let player = world.get::<AnimationPlayer>(entity).unwrap();
            assert!(!player.is_playing_animation(node));
        }
        assert!(!world.resource::<PartAnimations>().is_on("PickupPlace"));
    }
}
