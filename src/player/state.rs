// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rand::Rng;
use serde::Serialize;

use crate::error::PlayerError;

use super::episode::Episode;

/// A state transition requested by the UI or by the media primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Replace the playlist with a single episode and start playing it
    Play(Episode),
    /// Replace the playlist and start playing at `index`
    PlayList { list: Vec<Episode>, index: usize },
    TogglePlay,
    SetPlayingState(bool),
    ToggleLoop,
    ToggleShuffle,
    /// Empty the playlist, keeping the playing/loop/shuffle flags
    ClearPlayerState,
    PlayNext,
    PlayPrevious,
}

impl PlayerCommand {
    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            PlayerCommand::Play(_) => "play",
            PlayerCommand::PlayList { .. } => "play_list",
            PlayerCommand::TogglePlay => "toggle_play",
            PlayerCommand::SetPlayingState(_) => "set_playing_state",
            PlayerCommand::ToggleLoop => "toggle_loop",
            PlayerCommand::ToggleShuffle => "toggle_shuffle",
            PlayerCommand::ClearPlayerState => "clear_player_state",
            PlayerCommand::PlayNext => "play_next",
            PlayerCommand::PlayPrevious => "play_previous",
        }
    }

    /// Reject a `PlayList` whose start index does not address an episode
    pub fn validate(&self) -> Result<(), PlayerError> {
        if let PlayerCommand::PlayList { list, index } = self {
            // An empty list at index 0 is the one consistent empty state
            if *index >= list.len() && !(list.is_empty() && *index == 0) {
                return Err(PlayerError::IndexOutOfBounds {
                    index: *index,
                    len: list.len(),
                });
            }
        }
        Ok(())
    }
}

/// Snapshot of everything the player knows
///
/// `current_episode_index` is always a valid index into `episode_list`, or 0
/// when the list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    pub episode_list: Vec<Episode>,
    pub current_episode_index: usize,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
}

/// What an external media element should currently be doing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaDirective {
    pub source_url: String,
    pub is_playing: bool,
    pub is_looping: bool,
}

impl PlaybackState {
    pub fn has_previous(&self) -> bool {
        self.current_episode_index > 0
    }

    /// Shuffle mode always reports a next episode, even for empty or
    /// single-episode playlists.
    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_episode_index + 1 < self.episode_list.len()
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_list.get(self.current_episode_index)
    }

    pub fn is_empty(&self) -> bool {
        self.episode_list.is_empty()
    }

    /// Source, play state and loop attribute for the media element, if
    /// there is anything to load
    pub fn media_directive(&self) -> Option<MediaDirective> {
        self.current_episode().map(|episode| MediaDirective {
            source_url: episode.url.clone(),
            is_playing: self.is_playing,
            is_looping: self.is_looping,
        })
    }

    /// Compute the state that results from applying `command`
    ///
    /// The receiver is never modified. Only `PlayList` with an index outside
    /// the new list can fail; every other command is total and degrades to a
    /// no-op where it has nothing to act on.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        command: PlayerCommand,
        rng: &mut R,
    ) -> Result<PlaybackState, PlayerError> {
        command.validate()?;
        Ok(self.reduce(command, rng))
    }

    /// `command` must have passed [`PlayerCommand::validate`]
    pub(super) fn reduce<R: Rng + ?Sized>(
        &self,
        command: PlayerCommand,
        rng: &mut R,
    ) -> PlaybackState {
        let mut next = self.clone();

        match command {
            PlayerCommand::Play(episode) => {
                next.episode_list = vec![episode];
                next.current_episode_index = 0;
                next.is_playing = true;
            }
            PlayerCommand::PlayList { list, index } => {
                next.episode_list = list;
                next.current_episode_index = index;
                next.is_playing = true;
            }
            PlayerCommand::TogglePlay => next.is_playing = !next.is_playing,
            PlayerCommand::SetPlayingState(state) => next.is_playing = state,
            PlayerCommand::ToggleLoop => next.is_looping = !next.is_looping,
            PlayerCommand::ToggleShuffle => next.is_shuffling = !next.is_shuffling,
            PlayerCommand::ClearPlayerState => {
                next.episode_list.clear();
                next.current_episode_index = 0;
            }
            PlayerCommand::PlayNext => {
                if self.is_shuffling {
                    if !self.episode_list.is_empty() {
                        next.current_episode_index = rng.gen_range(0..self.episode_list.len());
                    }
                } else if self.has_next() {
                    next.current_episode_index += 1;
                }
            }
            PlayerCommand::PlayPrevious => {
                if self.has_previous() {
                    next.current_episode_index -= 1;
                }
            }
        }

        next
    }
}
