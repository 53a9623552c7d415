// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use bytes::Bytes;
use tracing::info;
use url::Url;

use crate::error::FeedError;
use crate::http::HttpClient;
use crate::player::Episode;

use super::parse::{Podcast, parse_feed};

/// Where an episode list came from, and what it contains
#[derive(Debug, Clone)]
pub struct EpisodeSource {
    /// Podcast title, or the file name for plain episode lists
    pub title: String,
    pub episodes: Vec<Episode>,
}

/// Fetch raw feed bytes from a URL (without parsing)
pub async fn fetch_feed_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes, FeedError> {
    let response = client.get(url).await.map_err(|e| FeedError::FetchFailed {
        url: url.to_string(),
        source: e,
    })?;

    if !response.is_success() {
        return Err(FeedError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    Ok(response.body)
}

/// Read raw bytes from a local file
pub fn read_feed_file(path: &Path) -> Result<Vec<u8>, FeedError> {
    std::fs::read(path).map_err(|e| FeedError::FileReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Construct a file:// URL for a local file path
pub fn file_path_to_url(path: &Path) -> Result<Url, FeedError> {
    let absolute = std::path::absolute(path).map_err(|e| FeedError::FileReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let url = Url::from_file_path(&absolute)
        .or_else(|_| Url::parse(&format!("file://{}", absolute.display())))?;
    Ok(url)
}

/// Fetch and parse a podcast feed from a URL
pub async fn fetch_feed<C: HttpClient>(client: &C, url: &str) -> Result<Podcast, FeedError> {
    let feed_url = Url::parse(url)?;
    let bytes = fetch_feed_bytes(client, url).await?;
    parse_feed(&bytes, feed_url)
}

/// Parse a podcast feed from a local file
pub fn parse_feed_file(path: &Path) -> Result<Podcast, FeedError> {
    let bytes = read_feed_file(path)?;
    let feed_url = file_path_to_url(path)?;
    parse_feed(&bytes, feed_url)
}

/// Parse a JSON array of episodes
pub fn parse_episode_list(json_bytes: &[u8]) -> Result<Vec<Episode>, FeedError> {
    Ok(serde_json::from_slice(json_bytes)?)
}

/// Determine if a string is a URL or a file path
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load episodes from an RSS feed URL, a local RSS file, or a local `.json`
/// episode list
pub async fn load_episodes<C: HttpClient>(
    client: &C,
    source: &str,
) -> Result<EpisodeSource, FeedError> {
    let loaded = if is_url(source) {
        let podcast = fetch_feed(client, source).await?;
        EpisodeSource {
            episodes: podcast.episodes(),
            title: podcast.title,
        }
    } else {
        let path = Path::new(source);
        if is_json_path(path) {
            EpisodeSource {
                title: path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(source)
                    .to_string(),
                episodes: parse_episode_list(&read_feed_file(path)?)?,
            }
        } else {
            let podcast = parse_feed_file(path)?;
            EpisodeSource {
                episodes: podcast.episodes(),
                title: podcast.title,
            }
        }
    };

    info!(
        source,
        title = %loaded.title,
        episodes = loaded.episodes.len(),
        "Loaded episode list"
    );

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use async_trait::async_trait;
    use tempfile::tempdir;

    const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Remote Show</title>
    <description>Test</description>
    <item>
      <title>Only Episode</title>
      <enclosure url="https://example.com/only.mp3" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#;

    struct StubClient {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl HttpClient for StubClient {
        async fn get(&self, _url: &str) -> Result<HttpResponse, reqwest::Error> {
            Ok(HttpResponse {
                status: self.status,
                body: Bytes::from_static(self.body.as_bytes()),
            })
        }
    }

    #[test]
    fn is_url_detects_http() {
        assert!(is_url("http://example.com/feed.xml"));
        assert!(is_url("https://example.com/feed.xml"));
    }

    #[test]
    fn is_url_rejects_file_paths() {
        assert!(!is_url("/path/to/feed.xml"));
        assert!(!is_url("./feed.xml"));
        assert!(!is_url("feed.xml"));
    }

    #[tokio::test]
    async fn load_episodes_fetches_remote_feed() {
        let client = StubClient {
            status: 200,
            body: FEED,
        };

        let loaded = load_episodes(&client, "https://example.com/feed.xml")
            .await
            .unwrap();

        assert_eq!(loaded.title, "Remote Show");
        assert_eq!(loaded.episodes.len(), 1);
        assert_eq!(loaded.episodes[0].url, "https://example.com/only.mp3");
    }

    #[tokio::test]
    async fn load_episodes_reports_http_errors() {
        let client = StubClient {
            status: 404,
            body: "",
        };

        let result = load_episodes(&client, "https://example.com/missing.xml").await;

        assert!(matches!(
            result,
            Err(FeedError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn load_episodes_reads_local_feed_and_json() {
        let dir = tempdir().unwrap();
        let client = StubClient {
            status: 500,
            body: "",
        };

        let feed_path = dir.path().join("show.xml");
        std::fs::write(&feed_path, FEED).unwrap();
        let loaded = load_episodes(&client, feed_path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(loaded.title, "Remote Show");

        let json_path = dir.path().join("episodes.json");
        std::fs::write(
            &json_path,
            r#"[
                {"title": "A", "members": "X", "thumbnail": "t", "duration": 10, "url": "u"},
                {"title": "B", "members": "Y", "thumbnail": "t", "duration": 20, "url": "v"}
            ]"#,
        )
        .unwrap();
        let loaded = load_episodes(&client, json_path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(loaded.title, "episodes");
        assert_eq!(loaded.episodes.len(), 2);
        assert_eq!(loaded.episodes[1].duration, 20);
    }

    #[test]
    fn parse_episode_list_rejects_malformed_json() {
        let result = parse_episode_list(br#"[{"title": "A"}]"#);
        assert!(matches!(result, Err(FeedError::JsonParseFailed(_))));
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempdir().unwrap();
        let result = parse_feed_file(&dir.path().join("nope.xml"));
        assert!(matches!(result, Err(FeedError::FileReadFailed { .. })));
    }
}
