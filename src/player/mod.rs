mod episode;
mod observer;
mod state;
mod store;

pub use episode::{Episode, format_duration};
pub use observer::{NoopObserver, SharedStateObserver, StateObserver};
pub use state::{MediaDirective, PlaybackState, PlayerCommand};
pub use store::{MediaEvent, PlayerStore};
