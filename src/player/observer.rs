// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use super::state::PlaybackState;

/// Trait for consumers that want to hear about every new playback snapshot.
///
/// Implementations typically re-render a view or forward the change to a
/// media element.
pub trait StateObserver: Send + Sync {
    /// Called after a command produced a snapshot that differs from the
    /// previous one
    fn state_changed(&self, snapshot: &Arc<PlaybackState>);
}

/// A shared reference to a state observer
pub type SharedStateObserver = Arc<dyn StateObserver>;

/// An observer that ignores every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StateObserver for NoopObserver {
    fn state_changed(&self, _snapshot: &Arc<PlaybackState>) {}
}

impl NoopObserver {
    /// Create a new NoopObserver wrapped in an Arc
    pub fn shared() -> SharedStateObserver {
        Arc::new(Self)
    }
}

impl<F> StateObserver for F
where
    F: Fn(&Arc<PlaybackState>) + Send + Sync,
{
    fn state_changed(&self, snapshot: &Arc<PlaybackState>) {
        self(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn noop_observer_accepts_snapshots() {
        let observer = NoopObserver::shared();
        observer.state_changed(&Arc::new(PlaybackState::default()));
    }

    #[test]
    fn closures_are_observers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let observer: SharedStateObserver = Arc::new(move |_: &Arc<PlaybackState>| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        observer.state_changed(&Arc::new(PlaybackState::default()));
        observer.state_changed(&Arc::new(PlaybackState::default()));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
