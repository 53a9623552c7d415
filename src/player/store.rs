// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::error::PlayerError;

use super::episode::Episode;
use super::observer::SharedStateObserver;
use super::state::{PlaybackState, PlayerCommand};

/// Events reported back by the media element that actually plays audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Playback started or resumed
    Played,
    /// Playback was paused
    Paused,
    /// The current source played to its end
    Ended,
}

/// Owner of the playback state for one player session
///
/// Every command replaces the current snapshot with a new one instead of
/// mutating it in place, so holders of an older `Arc<PlaybackState>` keep a
/// consistent view and can detect changes with `Arc::ptr_eq`. Commands that
/// change nothing keep the previous snapshot.
pub struct PlayerStore {
    state: Arc<PlaybackState>,
    observers: Vec<SharedStateObserver>,
    rng: StdRng,
}

impl PlayerStore {
    /// Create an empty store with an entropy-seeded shuffle generator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty store whose shuffle order is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: Arc::new(PlaybackState::default()),
            observers: Vec::new(),
            rng,
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<PlaybackState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.current_episode()
    }

    /// Register an observer for every future snapshot
    pub fn subscribe(&mut self, observer: SharedStateObserver) {
        self.observers.push(observer);
    }

    /// Apply a command and publish the resulting snapshot
    pub fn dispatch(&mut self, command: PlayerCommand) -> Result<(), PlayerError> {
        if let Err(e) = command.validate() {
            warn!(command = command.name(), error = %e, "Rejected player command");
            return Err(e);
        }
        self.commit(command);
        Ok(())
    }

    fn commit(&mut self, command: PlayerCommand) {
        let name = command.name();
        let next = self.state.reduce(command, &mut self.rng);

        if next == *self.state {
            debug!(command = name, "Player command left state unchanged");
            return;
        }

        debug!(
            command = name,
            index = next.current_episode_index,
            episodes = next.episode_list.len(),
            playing = next.is_playing,
            looping = next.is_looping,
            shuffling = next.is_shuffling,
            "Applied player command"
        );

        self.state = Arc::new(next);
        for observer in &self.observers {
            observer.state_changed(&self.state);
        }
    }

    pub fn play(&mut self, episode: Episode) {
        self.commit(PlayerCommand::Play(episode));
    }

    /// Replace the playlist and start at `index`
    ///
    /// Fails with [`PlayerError::IndexOutOfBounds`] when `index` does not
    /// address an episode of `list`; the state is left untouched in that
    /// case.
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) -> Result<(), PlayerError> {
        self.dispatch(PlayerCommand::PlayList { list, index })
    }

    pub fn toggle_play(&mut self) {
        self.commit(PlayerCommand::TogglePlay);
    }

    pub fn set_playing_state(&mut self, state: bool) {
        self.commit(PlayerCommand::SetPlayingState(state));
    }

    pub fn toggle_loop(&mut self) {
        self.commit(PlayerCommand::ToggleLoop);
    }

    pub fn toggle_shuffle(&mut self) {
        self.commit(PlayerCommand::ToggleShuffle);
    }

    /// Empty the playlist; loop and shuffle preferences survive
    pub fn clear_player_state(&mut self) {
        self.commit(PlayerCommand::ClearPlayerState);
    }

    pub fn play_next(&mut self) {
        self.commit(PlayerCommand::PlayNext);
    }

    pub fn play_previous(&mut self) {
        self.commit(PlayerCommand::PlayPrevious);
    }

    /// Feed a media element event back into the store
    ///
    /// A looping source restarts on its own, so `Ended` is ignored while
    /// looping. Otherwise the player advances, or clears itself once the
    /// last episode has finished.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        debug!(?event, "Media event");

        match event {
            MediaEvent::Played => self.set_playing_state(true),
            MediaEvent::Paused => self.set_playing_state(false),
            MediaEvent::Ended => {
                if self.state.is_looping {
                    return;
                }
                if self.state.has_next() {
                    self.play_next();
                } else {
                    self.clear_player_state();
                }
            }
        }
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new()
    }
}
