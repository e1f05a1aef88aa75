use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    api::DashboardApi,
    error::ClientError,
    types::{DigestSummary, HasStatus, VideoSummary},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The fetch failed; the section renders empty.
    Failed,
}

#[derive(Debug, Clone)]
pub struct ListSlot<T> {
    items: Vec<T>,
    state: SlotState,
}

impl<T> Default for ListSlot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: SlotState::Idle,
        }
    }
}

impl<T: HasStatus> ListSlot<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    fn apply(&mut self, label: &'static str, result: Result<Vec<T>, Arc<ClientError>>) {
        match result {
            Ok(items) => {
                let total = items.len();
                self.items = completed_newest_first(items);
                self.state = SlotState::Loaded;
                info!(list = label, total, shown = self.items.len(), "list loaded");
            }
            Err(err) => {
                warn!(list = label, error = %err, "failed to fetch list");
                self.items.clear();
                self.state = SlotState::Failed;
            }
        }
    }
}

/// Completion of one of the two independent list reads.
#[derive(Debug, Clone)]
pub enum ListLoaded {
    Videos(Result<Vec<VideoSummary>, Arc<ClientError>>),
    Digests(Result<Vec<DigestSummary>, Arc<ClientError>>),
}

/// Keep COMPLETED items and reverse arrival order, newest first.
///
/// There is no date sort; the backend is trusted to return oldest first.
pub fn completed_newest_first<T: HasStatus>(items: Vec<T>) -> Vec<T> {
    let mut shown: Vec<T> = items
        .into_iter()
        .filter(|item| item.status().is_completed())
        .collect();
    shown.reverse();
    shown
}

pub async fn fetch_videos(api: Arc<dyn DashboardApi>) -> ListLoaded {
    ListLoaded::Videos(api.list_videos().await.map_err(Arc::new))
}

pub async fn fetch_digests(api: Arc<dyn DashboardApi>) -> ListLoaded {
    ListLoaded::Digests(api.list_digests().await.map_err(Arc::new))
}

/// Video and digest lists, fetched once per session.
#[derive(Debug, Default)]
pub struct ListSynchronizer {
    videos: ListSlot<VideoSummary>,
    digests: ListSlot<DigestSummary>,
}

impl ListSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark both slots loading. Returns `false` if the lists were already
    /// requested, in which case the caller must not fetch again.
    pub fn begin(&mut self) -> bool {
        if self.videos.state != SlotState::Idle || self.digests.state != SlotState::Idle {
            return false;
        }
        self.videos.state = SlotState::Loading;
        self.digests.state = SlotState::Loading;
        true
    }

    pub fn apply(&mut self, loaded: ListLoaded) {
        match loaded {
            ListLoaded::Videos(result) => self.videos.apply("videos", result),
            ListLoaded::Digests(result) => self.digests.apply("digests", result),
        }
    }

    /// Issue both reads concurrently and apply each as it lands.
    pub async fn sync(&mut self, api: Arc<dyn DashboardApi>) {
        if !self.begin() {
            return;
        }
        let (videos, digests) = tokio::join!(fetch_videos(api.clone()), fetch_digests(api));
        self.apply(videos);
        self.apply(digests);
    }

    pub fn videos(&self) -> &[VideoSummary] {
        self.videos.items()
    }

    pub fn digests(&self) -> &[DigestSummary] {
        self.digests.items()
    }

    pub fn video_state(&self) -> SlotState {
        self.videos.state()
    }

    pub fn digest_state(&self) -> SlotState {
        self.digests.state()
    }

    pub fn find_video(&self, video_id: i64) -> Option<&VideoSummary> {
        self.videos.items.iter().find(|video| video.id == video_id)
    }
}
