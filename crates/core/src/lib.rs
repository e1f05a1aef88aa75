//! Pressroom Core Library
//!
//! Client-side data layer for the press-conference archive dashboard: list
//! synchronization, on-demand video detail, and the transcript query overlay.

pub mod api;
pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod format;
pub mod listing;
pub mod selection;
pub mod types;

// Re-export commonly used items at crate root
pub use api::DashboardApi;
pub use client::HttpDashboardApi;
pub use config::ClientConfig;
pub use conversation::{
    ConversationController, Exchange, QueryRequest, QueryResponse, Reply, SubmitRejected,
    run_query,
};
pub use error::{ClientError, Result};
pub use format::{embed_url, format_date, format_timestamp, transcript_lines};
pub use listing::{ListLoaded, ListSynchronizer, SlotState, fetch_digests, fetch_videos};
pub use selection::{
    DetailRequest, DetailResponse, DetailState, Key, KeyListenerHook, NoopKeyListener,
    Resolution, SelectionController, fetch_detail,
};
pub use types::{
    DigestSummary, ProcessingStatus, QueryAnswer, Segment, SummaryData, TranscriptData,
    VideoDetail, VideoSummary,
};
