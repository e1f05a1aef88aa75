//! Open/closed lifecycle of the video detail view.
//!
//! Selecting a video opens the view with a loading placeholder and hands back
//! a [`DetailRequest`]. The host runs [`fetch_detail`] and feeds the
//! [`DetailResponse`] to [`SelectionController::resolve`], which drops it if
//! the user has since moved to another video or closed the view.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    api::DashboardApi,
    error::ClientError,
    format::embed_url,
    types::{VideoDetail, VideoSummary},
};

pub const LOADING_TITLE: &str = "Loading...";

/// Global key listener owned by the detail view while it is open.
pub trait KeyListenerHook: Send + Sync {
    fn acquire(&self);
    fn release(&self);
}

/// For hosts that derive listening from [`SelectionController::is_open`].
pub struct NoopKeyListener;

impl KeyListenerHook for NoopKeyListener {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// Releases the key listener when the open view is dropped.
struct ListenerGuard {
    hook: Arc<dyn KeyListenerHook>,
}

impl ListenerGuard {
    fn acquire(hook: Arc<dyn KeyListenerHook>) -> Self {
        hook.acquire();
        Self { hook }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.hook.release();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready(Box<VideoDetail>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    pub video_id: i64,
}

#[derive(Debug, Clone)]
pub struct DetailResponse {
    pub video_id: i64,
    pub result: Result<VideoDetail, Arc<ClientError>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The response belongs to a selection that is no longer current.
    Stale,
}

pub async fn fetch_detail(api: Arc<dyn DashboardApi>, request: DetailRequest) -> DetailResponse {
    let result = api.video_detail(request.video_id).await.map_err(Arc::new);
    DetailResponse {
        video_id: request.video_id,
        result,
    }
}

struct OpenView {
    summary: VideoSummary,
    detail: DetailState,
    _escape: ListenerGuard,
}

pub struct SelectionController {
    hook: Arc<dyn KeyListenerHook>,
    open: Option<OpenView>,
}

impl SelectionController {
    pub fn new(hook: Arc<dyn KeyListenerHook>) -> Self {
        Self { hook, open: None }
    }

    /// Open `summary` with a loading placeholder and request its detail.
    ///
    /// Replacing an already open selection keeps the existing key listener.
    pub fn select(&mut self, summary: &VideoSummary) -> DetailRequest {
        info!(video_id = summary.id, "opening video detail");
        match self.open.as_mut() {
            Some(view) => {
                view.summary = summary.clone();
                view.detail = DetailState::Loading;
            }
            None => {
                self.open = Some(OpenView {
                    summary: summary.clone(),
                    detail: DetailState::Loading,
                    _escape: ListenerGuard::acquire(self.hook.clone()),
                });
            }
        }
        DetailRequest {
            video_id: summary.id,
        }
    }

    pub fn resolve(&mut self, response: DetailResponse) -> Resolution {
        let Some(view) = self
            .open
            .as_mut()
            .filter(|view| view.summary.id == response.video_id)
        else {
            debug!(video_id = response.video_id, "discarding stale video detail");
            return Resolution::Stale;
        };

        view.detail = match response.result {
            Ok(detail) => DetailState::Ready(Box::new(detail)),
            Err(err) => {
                warn!(video_id = response.video_id, error = %err, "failed to load video detail");
                DetailState::Failed(err.to_string())
            }
        };
        Resolution::Applied
    }

    /// Close the view. Closing an already closed view is a no-op.
    pub fn close(&mut self) {
        if let Some(view) = self.open.take() {
            info!(video_id = view.summary.id, "closing video detail");
        }
    }

    /// Returns `true` when the key closed the view.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if key == Key::Escape && self.is_open() {
            self.close();
            return true;
        }
        false
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.open.as_ref().map(|view| view.summary.id)
    }

    pub fn detail_state(&self) -> Option<&DetailState> {
        self.open.as_ref().map(|view| &view.detail)
    }

    pub fn detail(&self) -> Option<&VideoDetail> {
        match self.detail_state()? {
            DetailState::Ready(detail) => Some(&**detail),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        let view = self.open.as_ref()?;
        let title = match &view.detail {
            DetailState::Loading => LOADING_TITLE,
            DetailState::Ready(detail) if !detail.video.display_title().is_empty() => {
                detail.video.display_title()
            }
            _ => view.summary.display_title(),
        };
        Some(title)
    }

    /// Player URL for the loaded detail, if it has an embeddable id.
    pub fn embed_url(&self) -> Option<String> {
        embed_url(&self.detail()?.video.youtube_url)
    }
}
