use async_trait::async_trait;

use crate::{
    error::Result,
    types::{DigestSummary, QueryAnswer, VideoDetail, VideoSummary},
};

/// Everything the dashboard needs from the backend service.
///
/// Controllers only hold an `Arc<dyn DashboardApi>`, so shells and tests can
/// swap the HTTP client for an in-memory fake.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// All videos in arrival order, oldest first.
    async fn list_videos(&self) -> Result<Vec<VideoSummary>>;

    /// All digests in arrival order, oldest first.
    async fn list_digests(&self) -> Result<Vec<DigestSummary>>;

    async fn video_detail(&self, video_id: i64) -> Result<VideoDetail>;

    async fn query_transcripts(&self, query: &str) -> Result<QueryAnswer>;

    /// Queue a video for backend processing.
    async fn submit_video(&self, youtube_url: &str) -> Result<VideoSummary>;
}
