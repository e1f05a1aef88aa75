use url::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:8000/media";

/// Origins the dashboard talks to, handed to every component at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
    media_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a config from two absolute base URLs. Trailing slashes are dropped.
    pub fn new(api_base_url: &str, media_base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base(api_base_url)?,
            media_base_url: normalize_base(media_base_url)?,
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn media_base_url(&self) -> &str {
        &self.media_base_url
    }

    /// Absolute URL for an API path such as `/videos/listVideos`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.api_base_url, path)
    }

    /// Playback URL for a file the backend stored on its own disk.
    ///
    /// Only the final path segment is kept: `/srv/app/tmp/digest_1.mp3`
    /// becomes `{media}/digest_1.mp3`. Empty paths yield `None`.
    pub fn media_url(&self, stored_path: &str) -> Option<String> {
        let filename = stored_path.rsplit('/').next().unwrap_or_default();
        if filename.is_empty() {
            return None;
        }
        Some(format!("{}/{}", self.media_base_url, filename))
    }
}

fn normalize_base(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|source| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(
            config.api_url("/videos/listVideos"),
            "http://localhost:8000/api/videos/listVideos"
        );
    }

    #[test]
    fn trailing_slashes_are_dropped() {
        let config =
            ClientConfig::new("https://press.example.com/", "https://cdn.example.com/media/")
                .unwrap();
        assert_eq!(config.api_base_url(), "https://press.example.com");
        assert_eq!(config.media_base_url(), "https://cdn.example.com/media");
        assert_eq!(
            config.api_url("/digests"),
            "https://press.example.com/api/digests"
        );
    }

    #[test]
    fn relative_base_is_rejected() {
        let err = ClientConfig::new("press.example.com", DEFAULT_MEDIA_BASE_URL);
        assert!(matches!(err, Err(ClientError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn media_url_keeps_last_segment() {
        let config = ClientConfig::default();
        assert_eq!(
            config.media_url("/srv/app/tmp/digest_1.mp3").as_deref(),
            Some("http://localhost:8000/media/digest_1.mp3")
        );
        assert_eq!(
            config.media_url("digest_2.mp3").as_deref(),
            Some("http://localhost:8000/media/digest_2.mp3")
        );
        assert_eq!(config.media_url(""), None);
        assert_eq!(config.media_url("/srv/app/tmp/"), None);
    }
}
