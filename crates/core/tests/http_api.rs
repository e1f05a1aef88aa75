use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use pressroom_core::{
    ClientConfig, ClientError, DashboardApi, HttpDashboardApi, ListSynchronizer, ProcessingStatus,
    SlotState,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Received {
    queries: Arc<Mutex<Vec<Value>>>,
    submissions: Arc<Mutex<Vec<Value>>>,
}

async fn list_videos() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "youtube_url": "https://www.youtube.com/watch?v=first",
            "status": "COMPLETED",
            "speaker": "Head Coach",
            "title": "Wednesday presser",
            "thumbnail_url": "https://i.ytimg.com/vi/first/hqdefault.jpg",
            "published_at": "2024-09-04T18:00:00Z",
            "summary_data": null,
            "transcript_data": null
        },
        {
            "id": 2,
            "youtube_url": "https://www.youtube.com/watch?v=second",
            "status": "PROCESSING",
            "speaker": null,
            "title": "",
            "thumbnail_url": null,
            "published_at": null,
            "summary_data": null,
            "transcript_data": null
        },
        {
            "id": 3,
            "youtube_url": "https://www.youtube.com/watch?v=third",
            "status": "COMPLETED",
            "speaker": "Coordinator",
            "title": "Thursday presser",
            "thumbnail_url": null,
            "published_at": "2024-09-05T18:00:00",
            "summary_data": null,
            "transcript_data": null
        }
    ]))
}

async fn video_detail(Path(video_id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    if video_id != 1 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "id": 1,
        "youtube_url": "https://www.youtube.com/watch?v=first",
        "status": "COMPLETED",
        "title": "Wednesday presser",
        "summary_data": {
            "title": "Wednesday presser",
            "one_sentence_summary": "The coach confirmed the starting lineup.",
            "key_bullet_points": ["Lineup set", "No new injuries"]
        },
        "transcript_data": {
            "segments": [
                {"start": 0.0, "end": 75.0, "speaker": "SPEAKER_00", "text": " Morning, everyone."}
            ],
            "word_segments": []
        }
    })))
}

async fn query_transcripts(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
    received.queries.lock().unwrap().push(body);
    Json(json!({"answer": "The lineup is set.", "sources": ["Wednesday presser"]}))
}

async fn submit_video(
    State(received): State<Received>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let url = body["youtube_url"].as_str().unwrap_or_default().to_string();
    received.submissions.lock().unwrap().push(body);
    (
        StatusCode::CREATED,
        Json(json!({"id": 5, "youtube_url": url, "status": "PENDING"})),
    )
}

async fn spawn_backend(received: Received) -> anyhow::Result<ClientConfig> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let app = Router::new()
        .route("/api/videos/listVideos", get(list_videos))
        .route("/api/videos/getVideoData/{video_id}", get(video_detail))
        .route("/api/videos/submitVideo", post(submit_video))
        .route("/api/digests", get(|| async { "not json" }))
        .route("/api/rag/queryTranscripts", post(query_transcripts))
        .with_state(received);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let base = format!("http://{}", addr);
    Ok(ClientConfig::new(&base, &format!("{}/media", base))?)
}

#[tokio::test]
async fn lists_videos_in_arrival_order() -> anyhow::Result<()> {
    let config = spawn_backend(Received::default()).await?;
    let api = HttpDashboardApi::new(config)?;

    let videos = api.list_videos().await?;

    assert_eq!(videos.len(), 3);
    assert_eq!(videos[0].id, 1);
    assert_eq!(videos[0].status, ProcessingStatus::Completed);
    assert_eq!(videos[1].status, ProcessingStatus::Processing);
    assert_eq!(videos[1].display_speaker(), "Press Conference");
    Ok(())
}

#[tokio::test]
async fn offset_less_publish_time_keeps_the_list() -> anyhow::Result<()> {
    let config = spawn_backend(Received::default()).await?;
    let api: Arc<dyn DashboardApi> = Arc::new(HttpDashboardApi::new(config)?);

    let mut lists = ListSynchronizer::new();
    lists.sync(api).await;

    let ids: Vec<_> = lists.videos().iter().map(|video| video.id).collect();
    assert_eq!(ids, vec![3, 1]);
    assert_eq!(lists.video_state(), SlotState::Loaded);
    assert_eq!(
        lists.videos()[0].published_date(),
        NaiveDate::from_ymd_opt(2024, 9, 5)
    );
    Ok(())
}

#[tokio::test]
async fn fetches_video_detail() -> anyhow::Result<()> {
    let config = spawn_backend(Received::default()).await?;
    let api = HttpDashboardApi::new(config)?;

    let detail = api.video_detail(1).await?;

    assert_eq!(detail.id(), 1);
    assert_eq!(detail.segments().len(), 1);
    assert_eq!(
        detail.summary_data.as_ref().map(|s| s.key_bullet_points.len()),
        Some(2)
    );
    Ok(())
}

#[tokio::test]
async fn missing_video_is_a_status_error() -> anyhow::Result<()> {
    let config = spawn_backend(Received::default()).await?;
    let api = HttpDashboardApi::new(config)?;

    let err = api.video_detail(404).await.unwrap_err();

    match err {
        ClientError::Status { status, url } => {
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            assert!(url.ends_with("/api/videos/getVideoData/404"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() -> anyhow::Result<()> {
    let config = spawn_backend(Received::default()).await?;
    let api = HttpDashboardApi::new(config)?;

    let err = api.list_digests().await.unwrap_err();

    assert!(matches!(err, ClientError::Parse { .. }), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn query_posts_the_raw_text() -> anyhow::Result<()> {
    let received = Received::default();
    let config = spawn_backend(received.clone()).await?;
    let api = HttpDashboardApi::new(config)?;

    let answer = api.query_transcripts("  who starts?").await?;

    assert_eq!(answer.answer, "The lineup is set.");
    assert_eq!(answer.sources, vec!["Wednesday presser".to_string()]);
    let queries = received.queries.lock().unwrap();
    assert_eq!(queries.as_slice(), &[json!({"query": "  who starts?"})]);
    Ok(())
}

#[tokio::test]
async fn submits_video_for_processing() -> anyhow::Result<()> {
    let received = Received::default();
    let config = spawn_backend(received.clone()).await?;
    let api = HttpDashboardApi::new(config)?;

    let queued = api
        .submit_video("https://www.youtube.com/watch?v=fresh")
        .await?;
    assert_eq!(queued.status, ProcessingStatus::Pending);
    assert_eq!(received.submissions.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let base = format!("http://{}", addr);
    let api = HttpDashboardApi::new(ClientConfig::new(&base, &base)?)?;

    let err = api.list_videos().await.unwrap_err();

    assert!(err.is_network(), "got {err:?}");
    Ok(())
}
