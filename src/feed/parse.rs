// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset};
use tracing::debug;
use url::Url;

use crate::error::FeedError;
use crate::player::Episode;

/// A parsed podcast feed
#[derive(Debug, Clone)]
pub struct Podcast {
    pub title: String,
    pub author: Option<String>,
    pub image_url: Option<Url>,
    pub feed_url: Url,
    pub items: Vec<FeedItem>,
}

/// A playable episode together with the feed data used to order it
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub episode: Episode,
    pub published_at: Option<DateTime<FixedOffset>>,
}

impl Podcast {
    /// Episodes ordered newest first; undated items keep their feed order
    /// after all dated ones
    pub fn episodes(&self) -> Vec<Episode> {
        let mut items: Vec<&FeedItem> = self.items.iter().collect();
        items.sort_by(|a, b| match (a.published_at, b.published_at) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        items.into_iter().map(|item| item.episode.clone()).collect()
    }
}

/// Parse RSS feed XML bytes into a Podcast
pub fn parse_feed(xml_bytes: &[u8], feed_url: Url) -> Result<Podcast, FeedError> {
    let channel = rss::Channel::read_from(xml_bytes)?;

    let author = channel
        .itunes_ext()
        .and_then(|ext| ext.author().map(String::from))
        .or_else(|| channel.managing_editor().map(String::from));

    let image_url = channel
        .image()
        .and_then(|img| Url::parse(img.url()).ok())
        .or_else(|| {
            channel
                .itunes_ext()
                .and_then(|ext| ext.image())
                .and_then(|url| Url::parse(url).ok())
        });

    let defaults = ChannelDefaults {
        members: author.clone().unwrap_or_default(),
        thumbnail: image_url.as_ref().map(Url::to_string).unwrap_or_default(),
    };

    let items = channel
        .items()
        .iter()
        .filter_map(|item| match parse_item(item, &defaults) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(error = %e, "Skipping feed item");
                None
            }
        })
        .collect();

    Ok(Podcast {
        title: channel.title().to_string(),
        author,
        image_url,
        feed_url,
        items,
    })
}

/// Channel-level values used when an item does not carry its own
struct ChannelDefaults {
    members: String,
    thumbnail: String,
}

fn parse_item(item: &rss::Item, defaults: &ChannelDefaults) -> Result<FeedItem, FeedError> {
    let title = item
        .title()
        .map(String::from)
        .unwrap_or_else(|| "Untitled Episode".to_string());

    let enclosure = item
        .enclosure()
        .ok_or_else(|| FeedError::MissingEnclosure {
            title: title.clone(),
        })?;

    let url = Url::parse(enclosure.url())?;

    let itunes = item.itunes_ext();

    let members = itunes
        .and_then(|ext| ext.author())
        .map(String::from)
        .or_else(|| item.author().map(String::from))
        .unwrap_or_else(|| defaults.members.clone());

    let thumbnail = itunes
        .and_then(|ext| ext.image())
        .map(String::from)
        .unwrap_or_else(|| defaults.thumbnail.clone());

    let duration = itunes
        .and_then(|ext| ext.duration())
        .and_then(parse_duration)
        .unwrap_or(0);

    let published_at = item
        .pub_date()
        .and_then(|date_str| DateTime::parse_from_rfc2822(date_str).ok());

    Ok(FeedItem {
        episode: Episode {
            title,
            members,
            thumbnail,
            duration,
            url: url.to_string(),
        },
        published_at,
    })
}

/// Parse an `itunes:duration` value (`SS`, `MM:SS` or `HH:MM:SS`) into seconds
pub fn parse_duration(value: &str) -> Option<u64> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    parts.iter().try_fold(0u64, |total, part| {
        let part = part.trim();
        // Fractional seconds are dropped
        let whole = part.split('.').next().unwrap_or(part);
        let n: u64 = whole.parse().ok()?;
        total.checked_mul(60)?.checked_add(n)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Test Podcast</title>
    <description>A test podcast for unit testing</description>
    <link>https://example.com</link>
    <itunes:author>Test Author</itunes:author>
    <itunes:image href="https://example.com/image.jpg"/>
    <item>
      <title>Episode 1</title>
      <pubDate>Mon, 01 Jan 2024 12:00:00 +0000</pubDate>
      <enclosure url="https://example.com/ep1.mp3" length="1234567" type="audio/mpeg"/>
      <itunes:duration>30:00</itunes:duration>
      <itunes:author>Alice, Bob</itunes:author>
      <itunes:image href="https://example.com/ep1.jpg"/>
    </item>
    <item>
      <title>Episode 2</title>
      <pubDate>Mon, 08 Jan 2024 12:00:00 +0000</pubDate>
      <enclosure url="https://example.com/ep2.mp3" type="audio/mpeg"/>
      <itunes:duration>1:02:03</itunes:duration>
    </item>
    <item>
      <title>Bonus</title>
      <enclosure url="https://example.com/bonus.mp3" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#;

    fn parse_sample() -> Podcast {
        let feed_url = Url::parse("https://example.com/feed.xml").unwrap();
        parse_feed(SAMPLE_FEED.as_bytes(), feed_url).unwrap()
    }

    #[test]
    fn parse_feed_extracts_podcast_metadata() {
        let podcast = parse_sample();

        assert_eq!(podcast.title, "Test Podcast");
        assert_eq!(podcast.author, Some("Test Author".to_string()));
        assert_eq!(
            podcast.image_url,
            Some(Url::parse("https://example.com/image.jpg").unwrap())
        );
        assert_eq!(podcast.items.len(), 3);
    }

    #[test]
    fn item_fields_override_channel_defaults() {
        let podcast = parse_sample();
        let ep1 = &podcast.items[0].episode;

        assert_eq!(ep1.title, "Episode 1");
        assert_eq!(ep1.members, "Alice, Bob");
        assert_eq!(ep1.thumbnail, "https://example.com/ep1.jpg");
        assert_eq!(ep1.duration, 30 * 60);
        assert_eq!(ep1.url, "https://example.com/ep1.mp3");
    }

    #[test]
    fn missing_item_fields_fall_back_to_channel() {
        let podcast = parse_sample();
        let ep2 = &podcast.items[1].episode;

        assert_eq!(ep2.members, "Test Author");
        assert_eq!(ep2.thumbnail, "https://example.com/image.jpg");
        assert_eq!(ep2.duration, 3723);

        let bonus = &podcast.items[2];
        assert_eq!(bonus.episode.duration, 0);
        assert!(bonus.published_at.is_none());
    }

    #[test]
    fn episodes_are_newest_first_with_undated_last() {
        let titles: Vec<String> = parse_sample()
            .episodes()
            .into_iter()
            .map(|e| e.title)
            .collect();

        assert_eq!(titles, vec!["Episode 2", "Episode 1", "Bonus"]);
    }

    #[test]
    fn parse_feed_skips_items_without_enclosure() {
        let feed_no_enclosure = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <description>Test</description>
    <item>
      <title>No Audio</title>
    </item>
  </channel>
</rss>"#;

        let feed_url = Url::parse("https://example.com/feed.xml").unwrap();
        let podcast = parse_feed(feed_no_enclosure.as_bytes(), feed_url).unwrap();
        assert!(podcast.items.is_empty());
        assert!(podcast.episodes().is_empty());
    }

    #[test]
    fn parse_duration_accepts_common_forms() {
        assert_eq!(parse_duration("45"), Some(45));
        assert_eq!(parse_duration("3600"), Some(3600));
        assert_eq!(parse_duration("05:30"), Some(330));
        assert_eq!(parse_duration("1:00:01"), Some(3601));
        assert_eq!(parse_duration(" 12:00.5 "), Some(720));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("1:2:3:4"), None);
        assert_eq!(parse_duration("10:-5"), None);
    }

    #[test]
    fn parse_duration_rejects_overflowing_values() {
        assert_eq!(parse_duration("18446744073709551615:59"), None);
        assert_eq!(parse_duration("99999999999999999:00:00"), None);
        assert_eq!(parse_duration("18446744073709551615"), Some(u64::MAX));
    }

    #[test]
    fn oversized_duration_in_feed_becomes_zero() {
        let feed = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Test</title>
    <description>Test</description>
    <item>
      <title>Endless</title>
      <enclosure url="https://example.com/endless.mp3" type="audio/mpeg"/>
      <itunes:duration>99999999999999999:00:00</itunes:duration>
    </item>
  </channel>
</rss>"#;

        let feed_url = Url::parse("https://example.com/feed.xml").unwrap();
        let podcast = parse_feed(feed.as_bytes(), feed_url).unwrap();

        assert_eq!(podcast.items.len(), 1);
        assert_eq!(podcast.items[0].episode.duration, 0);
    }
}
