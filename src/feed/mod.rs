mod fetch;
mod parse;

pub use fetch::{
    EpisodeSource, fetch_feed, fetch_feed_bytes, is_url, load_episodes, parse_episode_list,
    parse_feed_file,
};
pub use parse::{FeedItem, Podcast, parse_duration, parse_feed};
