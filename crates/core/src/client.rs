use std::time::Duration;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    api::DashboardApi,
    config::ClientConfig,
    error::{ClientError, Result},
    types::{DigestSummary, QueryAnswer, QueryBody, SubmitVideoBody, VideoDetail, VideoSummary},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed [`DashboardApi`].
#[derive(Clone)]
pub struct HttpDashboardApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpDashboardApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|source| ClientError::Network {
                url: config.api_base_url().to_string(),
                source,
            })?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.api_url(path);
        debug!(%url, "GET");
        let request = self.client.get(&url);
        send(request, url).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.config.api_url(path);
        debug!(%url, "POST");
        let request = self.client.post(&url).json(body);
        send(request, url).await
    }
}

async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder, url: String) -> Result<T> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(source) => return Err(ClientError::Network { url, source }),
    };

    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status { url, status });
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(source) => return Err(ClientError::Network { url, source }),
    };
    serde_json::from_slice(&body).map_err(|source| ClientError::Parse { url, source })
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn list_videos(&self) -> Result<Vec<VideoSummary>> {
        self.get_json("/videos/listVideos").await
    }

    async fn list_digests(&self) -> Result<Vec<DigestSummary>> {
        self.get_json("/digests").await
    }

    async fn video_detail(&self, video_id: i64) -> Result<VideoDetail> {
        self.get_json(&format!("/videos/getVideoData/{}", video_id))
            .await
    }

    async fn query_transcripts(&self, query: &str) -> Result<QueryAnswer> {
        let body = QueryBody {
            query: query.to_string(),
        };
        self.post_json("/rag/queryTranscripts", &body).await
    }

    async fn submit_video(&self, youtube_url: &str) -> Result<VideoSummary> {
        let body = SubmitVideoBody {
            youtube_url: youtube_url.to_string(),
        };
        self.post_json("/videos/submitVideo", &body).await
    }
}
