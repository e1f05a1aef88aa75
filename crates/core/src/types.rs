use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Backend processing state of a video or digest.
///
/// The wire form is the upper-case string the backend stores. Matching is
/// case-sensitive, so `"completed"` is carried as [`ProcessingStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Other(String),
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProcessingStatus::Pending => "PENDING",
            ProcessingStatus::Processing => "PROCESSING",
            ProcessingStatus::Completed => "COMPLETED",
            ProcessingStatus::Failed => "FAILED",
            ProcessingStatus::Other(raw) => raw,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ProcessingStatus::Completed)
    }
}

impl From<String> for ProcessingStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => ProcessingStatus::Pending,
            "PROCESSING" => ProcessingStatus::Processing,
            "COMPLETED" => ProcessingStatus::Completed,
            "FAILED" => ProcessingStatus::Failed,
            _ => ProcessingStatus::Other(raw),
        }
    }
}

impl From<ProcessingStatus> for String {
    fn from(status: ProcessingStatus) -> Self {
        match status {
            ProcessingStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything the list synchronizer can filter by processing status.
pub trait HasStatus {
    fn status(&self) -> &ProcessingStatus;
}

/// Lightweight list entry for one processed video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: i64,
    pub youtube_url: String,
    pub status: ProcessingStatus,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub speaker: Option<String>,
}

impl VideoSummary {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Speaker label for list cards, falling back to a generic label.
    pub fn display_speaker(&self) -> &str {
        match self.speaker.as_deref() {
            Some(speaker) if !speaker.is_empty() => speaker,
            _ => "Press Conference",
        }
    }

    pub fn published_date(&self) -> Option<NaiveDate> {
        self.published_at.map(|at| at.date_naive())
    }
}

/// Accepts RFC 3339 or offset-less ISO timestamps, the latter taken as UTC.
/// Anything unreadable becomes `None` so one bad record cannot sink a list.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|value| value.as_str()).and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl HasStatus for VideoSummary {
    fn status(&self) -> &ProcessingStatus {
        &self.status
    }
}

/// Enriched per-video payload: the list entry plus AI summary and transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDetail {
    #[serde(flatten)]
    pub video: VideoSummary,
    #[serde(default)]
    pub summary_data: Option<SummaryData>,
    #[serde(default)]
    pub transcript_data: Option<TranscriptData>,
}

impl VideoDetail {
    pub fn id(&self) -> i64 {
        self.video.id
    }

    pub fn segments(&self) -> &[Segment] {
        self.transcript_data
            .as_ref()
            .map(|transcript| transcript.segments.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub one_sentence_summary: String,
    #[serde(default)]
    pub key_bullet_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptData {
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub word_segments: Vec<WordSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub speaker: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// One daily audio digest compiled from a batch of videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestSummary {
    pub id: i64,
    pub digest_date: NaiveDate,
    pub status: ProcessingStatus,
    /// Server-side file path of the rendered audio, not a URL.
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub summary_text: Option<String>,
    #[serde(default)]
    pub video_ids: Vec<i64>,
}

impl HasStatus for DigestSummary {
    fn status(&self) -> &ProcessingStatus {
        &self.status
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryBody {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitVideoBody {
    pub youtube_url: String,
}
