pub mod error;
pub mod feed;
pub mod http;
pub mod player;
pub mod shell;

// Re-export main types for convenience
pub use error::{FeedError, PlayerError, ShellError};
pub use feed::{EpisodeSource, Podcast, load_episodes, parse_feed};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use player::{
    Episode, MediaDirective, MediaEvent, NoopObserver, PlaybackState, PlayerCommand, PlayerStore,
    SharedStateObserver, StateObserver, format_duration,
};
pub use shell::{ShellAction, ShellCommand, View};
