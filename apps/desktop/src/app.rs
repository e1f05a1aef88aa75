use std::sync::Arc;

use iced::widget::{Column, button, column, container, row, scrollable, text, text_input};
use iced::{Element, Event, Length, Subscription, Task, event, keyboard, window};
use pressroom_core::{
    ClientConfig, ClientError, ConversationController, DashboardApi, DetailResponse, DetailState,
    DigestSummary, Exchange, Key, KeyListenerHook, ListLoaded, ListSynchronizer, QueryResponse,
    Reply, SelectionController, SlotState, VideoDetail, VideoSummary, fetch_detail, fetch_digests,
    fetch_videos, format_date, run_query, transcript_lines,
};
use tracing::{debug, warn};

/// The window-level Escape listener lives in [`App::subscription`]; this hook
/// only traces when the detail view claims and releases it.
struct EscapeListener;

impl KeyListenerHook for EscapeListener {
    fn acquire(&self) {
        debug!("escape listener registered");
    }

    fn release(&self) {
        debug!("escape listener released");
    }
}

pub struct App {
    api: Arc<dyn DashboardApi>,
    config: ClientConfig,
    lists: ListSynchronizer,
    selection: SelectionController,
    chat: ConversationController,
    submit_url: String,
    submit_status: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    ListLoaded(ListLoaded),
    VideoClicked(i64),
    DetailLoaded(DetailResponse),
    CloseDetail,
    KeyPressed(Key),
    ChatToggled,
    ChatInputChanged(String),
    ChatSubmitted,
    ChatAnswered(QueryResponse),
    SubmitUrlChanged(String),
    SubmitVideo,
    VideoSubmitted(Result<VideoSummary, Arc<ClientError>>),
}

impl App {
    pub fn new(api: Arc<dyn DashboardApi>, config: ClientConfig) -> (Self, Task<Message>) {
        let mut lists = ListSynchronizer::new();
        let task = if lists.begin() {
            Task::batch([
                Task::perform(fetch_videos(api.clone()), Message::ListLoaded),
                Task::perform(fetch_digests(api.clone()), Message::ListLoaded),
            ])
        } else {
            Task::none()
        };

        let app = Self {
            api,
            config,
            lists,
            selection: SelectionController::new(Arc::new(EscapeListener)),
            chat: ConversationController::new(),
            submit_url: String::new(),
            submit_status: None,
        };
        (app, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ListLoaded(loaded) => self.lists.apply(loaded),
            Message::VideoClicked(video_id) => {
                let Some(summary) = self.lists.find_video(video_id) else {
                    return Task::none();
                };
                let request = self.selection.select(summary);
                return Task::perform(
                    fetch_detail(self.api.clone(), request),
                    Message::DetailLoaded,
                );
            }
            Message::DetailLoaded(response) => {
                self.selection.resolve(response);
            }
            Message::CloseDetail => self.selection.close(),
            Message::KeyPressed(key) => {
                self.selection.handle_key(key);
            }
            Message::ChatToggled => self.chat.toggle_open(),
            Message::ChatInputChanged(input) => self.chat.set_input(input),
            Message::ChatSubmitted => {
                if let Ok(request) = self.chat.submit() {
                    return Task::perform(
                        run_query(self.api.clone(), request),
                        Message::ChatAnswered,
                    );
                }
            }
            Message::ChatAnswered(response) => {
                self.chat.resolve(response);
            }
            Message::SubmitUrlChanged(url) => self.submit_url = url,
            Message::SubmitVideo => {
                let url = self.submit_url.trim().to_string();
                if url.is_empty() {
                    return Task::none();
                }
                self.submit_status = Some(format!("Submitting {}...", url));
                let api = self.api.clone();
                return Task::perform(
                    async move { api.submit_video(&url).await.map_err(Arc::new) },
                    Message::VideoSubmitted,
                );
            }
            Message::VideoSubmitted(result) => {
                self.submit_status = Some(match result {
                    Ok(video) => {
                        self.submit_url.clear();
                        format!("Queued video {} ({})", video.id, video.status)
                    }
                    Err(err) => {
                        warn!(error = %err, "video submission failed");
                        format!("Could not submit video: {}", err)
                    }
                });
            }
        }
        Task::none()
    }

    /// Escape is only listened for while the detail view is open.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.selection.is_open() {
            event::listen_with(escape_pressed)
        } else {
            Subscription::none()
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let main: Element<'_, Message> = if self.selection.is_open() {
            self.detail_view()
        } else {
            scrollable(
                column![
                    self.header(),
                    self.submit_form(),
                    self.videos_section(),
                    self.digests_section()
                ]
                .spacing(24)
                .padding(20),
            )
            .height(Length::Fill)
            .into()
        };

        let side: Element<'_, Message> = if self.chat.is_open() {
            self.chat_panel()
        } else {
            column![button(text("Ask")).on_press(Message::ChatToggled)]
                .padding(20)
                .into()
        };

        row![container(main).width(Length::Fill), side].into()
    }

    fn header(&self) -> Element<'_, Message> {
        column![
            text("Pressroom").size(32),
            text("Daily, AI-powered briefings on the latest press conferences.").size(16),
        ]
        .spacing(6)
        .into()
    }

    fn submit_form(&self) -> Element<'_, Message> {
        let mut form = column![
            row![
                text_input("Submit a YouTube URL for processing...", &self.submit_url)
                    .on_input(Message::SubmitUrlChanged)
                    .on_submit(Message::SubmitVideo)
                    .width(Length::Fill),
                button(text("Submit")).on_press(Message::SubmitVideo),
            ]
            .spacing(8)
        ]
        .spacing(4);

        if let Some(status) = &self.submit_status {
            form = form.push(text(status.as_str()).size(12));
        }
        form.into()
    }

    fn videos_section(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match self.lists.video_state() {
            SlotState::Idle | SlotState::Loading => text("Loading...").into(),
            SlotState::Loaded | SlotState::Failed => {
                Column::with_children(self.lists.videos().iter().map(video_card))
                    .spacing(8)
                    .into()
            }
        };

        column![text("Press Conferences").size(24), body]
            .spacing(12)
            .into()
    }

    fn digests_section(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match self.lists.digest_state() {
            SlotState::Idle | SlotState::Loading => text("Loading...").into(),
            SlotState::Loaded | SlotState::Failed => Column::with_children(
                self.lists
                    .digests()
                    .iter()
                    .map(|digest| digest_card(digest, &self.config)),
            )
            .spacing(8)
            .into(),
        };

        column![text("Daily Digests").size(24), body]
            .spacing(12)
            .into()
    }

    fn detail_view(&self) -> Element<'_, Message> {
        let title = self.selection.title().unwrap_or_default();
        let top = row![
            text(title).size(24).width(Length::Fill),
            button(text("Close")).on_press(Message::CloseDetail),
        ]
        .spacing(8);

        let body: Element<'_, Message> = match self.selection.detail_state() {
            Some(DetailState::Ready(detail)) => self.detail_body(detail),
            Some(DetailState::Failed(reason)) => {
                text(format!("Could not load this video: {}", reason)).into()
            }
            Some(DetailState::Loading) | None => text("Loading...").into(),
        };

        column![top, body].spacing(16).padding(20).into()
    }

    fn detail_body<'a>(&'a self, detail: &'a VideoDetail) -> Element<'a, Message> {
        let mut player = column![].spacing(4);
        if let Some(embed) = self.selection.embed_url() {
            player = player.push(text(format!("Watch: {}", embed)).size(14));
        }

        let transcript = Column::with_children(transcript_lines(detail.segments()).map(|line| {
            column![
                text(format!("{} --> {}", line.start, line.end)).size(12),
                text(format!("{}: {}", line.speaker, line.text)).size(16),
            ]
            .spacing(2)
            .into()
        }))
        .spacing(10);

        let left = column![
            player,
            text("Transcript").size(18),
            scrollable(transcript).height(Length::Fill),
        ]
        .spacing(8)
        .width(Length::FillPortion(2));

        let mut summary = column![text("AI Summary").size(18)].spacing(8);
        if let Some(data) = &detail.summary_data {
            summary = summary
                .push(text(format!("\"{}\"", data.one_sentence_summary)))
                .push(text("Key Points:").size(16))
                .push(Column::with_children(
                    data.key_bullet_points
                        .iter()
                        .map(|point| text(format!("• {}", point)).into()),
                ));
        }

        row![left, scrollable(summary).width(Length::FillPortion(1))]
            .spacing(16)
            .into()
    }

    fn chat_panel(&self) -> Element<'_, Message> {
        let top = row![
            text("Ask Me Anything!").size(18).width(Length::Fill),
            button(text("Close")).on_press(Message::ChatToggled),
        ];

        let transcript = Column::with_children(self.chat.exchanges().iter().map(exchange_bubble))
            .spacing(12);

        let send = button(text("Send"))
            .on_press_maybe(self.chat.can_submit().then_some(Message::ChatSubmitted));

        column![
            top,
            scrollable(transcript).height(Length::Fill).anchor_bottom(),
            row![
                text_input("Ask about transcripts...", self.chat.input())
                    .on_input(Message::ChatInputChanged)
                    .on_submit(Message::ChatSubmitted)
                    .width(Length::Fill),
                send,
            ]
            .spacing(8),
        ]
        .spacing(12)
        .padding(20)
        .width(Length::Fixed(380.0))
        .into()
    }
}

fn video_card(video: &VideoSummary) -> Element<'_, Message> {
    let published = video.published_date().map(format_date).unwrap_or_default();
    let mut card = column![
        text(video.display_speaker()).size(12),
        text(video.display_title()).size(18),
        text(published).size(12),
    ]
    .spacing(4);
    if let Some(thumbnail) = thumbnail_url(video) {
        card = card.push(text(format!("Thumbnail: {}", thumbnail)).size(11));
    }

    button(card)
        .on_press(Message::VideoClicked(video.id))
        .width(Length::Fill)
        .into()
}

fn thumbnail_url(video: &VideoSummary) -> Option<&str> {
    video
        .thumbnail_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
}

/// Playable link for a digest's rendered audio, resolved against the media origin.
fn digest_audio_url(digest: &DigestSummary, config: &ClientConfig) -> Option<String> {
    digest
        .audio_url
        .as_deref()
        .and_then(|path| config.media_url(path))
}

fn digest_card<'a>(digest: &'a DigestSummary, config: &ClientConfig) -> Element<'a, Message> {
    let heading = format!("Daily Digest: {}", format_date(digest.digest_date));
    let mut card = column![text(heading).size(18)].spacing(4);
    if let Some(audio) = digest_audio_url(digest, config) {
        card = card.push(text(format!("Listen: {}", audio)).size(12));
    }
    if let Some(summary) = &digest.summary_text {
        card = card.push(text(summary.as_str()).size(14));
    }
    container(card).padding(12).width(Length::Fill).into()
}

fn exchange_bubble(exchange: &Exchange) -> Element<'_, Message> {
    let mut bubble = column![
        text(format!("You: {}", exchange.user_text)),
        text(exchange.reply.text()),
    ]
    .spacing(6);

    if let Reply::Answered { sources, .. } = &exchange.reply {
        if !sources.is_empty() {
            bubble = bubble.push(text(format!("Sources: {}", sources.join(", "))).size(12));
        }
    }
    bubble.into()
}

fn escape_pressed(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            ..
        }) => Some(Message::KeyPressed(Key::Escape)),
        _ => None,
    }
}
