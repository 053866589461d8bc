use crate::config::toml_config::{FeedsConfig, InstagramConfig, YouTubeConfig};
use crate::domain::model::{Platform, PortfolioItem};
use crate::domain::ports::PortfolioSource;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct YouTubeSearchResponse {
    #[serde(default)]
    items: Vec<YouTubeSearchItem>,
}

#[derive(Debug, Deserialize)]
struct YouTubeSearchItem {
    id: YouTubeVideoId,
    snippet: YouTubeSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YouTubeVideoId {
    // channel and playlist hits carry no video id
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YouTubeSnippet {
    title: String,
    published_at: String,
    thumbnails: YouTubeThumbnails,
}

#[derive(Debug, Deserialize)]
struct YouTubeThumbnails {
    medium: YouTubeThumbnail,
}

#[derive(Debug, Deserialize)]
struct YouTubeThumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct InstagramMediaResponse {
    #[serde(default)]
    data: Vec<InstagramMedia>,
}

#[derive(Debug, Deserialize)]
struct InstagramMedia {
    id: String,
    caption: Option<String>,
    media_url: String,
    permalink: String,
    timestamp: String,
}

async fn get_json<T: for<'de> Deserialize<'de>>(
    feed: &str,
    request: reqwest::RequestBuilder,
) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    tracing::debug!("{} feed response status: {}", feed, status);

    if !status.is_success() {
        return Err(SiteError::feed(feed, format!("HTTP {}", status)));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| SiteError::feed(feed, format!("unexpected response body: {}", e)))
}

/// Latest uploads of one channel, newest first.
pub struct YouTubeFeed {
    client: Client,
    config: YouTubeConfig,
}

impl YouTubeFeed {
    pub fn new(client: Client, config: YouTubeConfig) -> Self {
        Self { client, config }
    }

    pub async fn fetch_items(&self) -> Result<Vec<PortfolioItem>> {
        let url = format!("{}/youtube/v3/search", self.config.base_url());
        let max_results = self.config.max_results().to_string();
        let request = self.client.get(&url).query(&[
            ("channelId", self.config.channel_id.as_str()),
            ("part", "snippet"),
            ("order", "date"),
            ("maxResults", max_results.as_str()),
            ("key", self.config.api_key.as_str()),
        ]);

        let body: YouTubeSearchResponse = get_json("youtube", request).await?;
        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(PortfolioItem {
                    link: format!("https://www.youtube.com/watch?v={}", video_id),
                    id: video_id,
                    title: item.snippet.title,
                    description: String::new(),
                    image_url: item.snippet.thumbnails.medium.url,
                    category: String::new(),
                    platform: Platform::YouTube,
                    featured: false,
                    date: item.snippet.published_at,
                })
            })
            .collect())
    }
}

/// Media posted by the account that owns the access token.
pub struct InstagramFeed {
    client: Client,
    config: InstagramConfig,
}

impl InstagramFeed {
    pub fn new(client: Client, config: InstagramConfig) -> Self {
        Self { client, config }
    }

    pub async fn fetch_items(&self) -> Result<Vec<PortfolioItem>> {
        let url = format!("{}/me/media", self.config.base_url());
        let request = self.client.get(&url).query(&[
            ("fields", "id,caption,media_url,permalink,timestamp"),
            ("access_token", self.config.access_token.as_str()),
        ]);

        let body: InstagramMediaResponse = get_json("instagram", request).await?;
        Ok(body
            .data
            .into_iter()
            .map(|post| PortfolioItem {
                id: post.id,
                title: post.caption.unwrap_or_default(),
                description: String::new(),
                image_url: post.media_url,
                category: String::new(),
                platform: Platform::Instagram,
                link: post.permalink,
                featured: false,
                date: post.timestamp,
            })
            .collect())
    }
}

/// YouTube and Instagram combined; YouTube items come first.
///
/// The whole fetch fails if either configured feed fails, so callers fall
/// back to the bundled catalog instead of showing half a gallery.
pub struct SocialFeed {
    youtube: Option<YouTubeFeed>,
    instagram: Option<InstagramFeed>,
}

impl SocialFeed {
    pub fn new(youtube: Option<YouTubeFeed>, instagram: Option<InstagramFeed>) -> Self {
        Self { youtube, instagram }
    }

    /// `None` when feeds are switched off in the configuration.
    pub fn from_config(config: &FeedsConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Some(Self::new(
            config
                .youtube
                .clone()
                .map(|yt| YouTubeFeed::new(client.clone(), yt)),
            config
                .instagram
                .clone()
                .map(|ig| InstagramFeed::new(client.clone(), ig)),
        )))
    }
}

#[async_trait]
impl PortfolioSource for SocialFeed {
    async fn fetch(&self) -> Result<Vec<PortfolioItem>> {
        let youtube = async {
            match &self.youtube {
                Some(feed) => feed.fetch_items().await,
                None => Ok(Vec::new()),
            }
        };
        let instagram = async {
            match &self.instagram {
                Some(feed) => feed.fetch_items().await,
                None => Ok(Vec::new()),
            }
        };

        let (mut items, instagram_items) = tokio::try_join!(youtube, instagram)?;
        items.extend(instagram_items);
        Ok(items)
    }
}
