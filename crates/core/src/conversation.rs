//! Optimistic transcript for the "ask the archive" overlay.
//!
//! A submission appends a pending exchange right away and hands back a
//! [`QueryRequest`] tagged with a fresh ticket. The matching
//! [`QueryResponse`] resolves that exchange in place; anything else is ignored.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{api::DashboardApi, error::ClientError, types::QueryAnswer};

pub const PENDING_TEXT: &str = "...";
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't connect to the AI. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Pending,
    Answered { text: String, sources: Vec<String> },
    Failed,
}

impl Reply {
    /// Text shown in the assistant bubble.
    pub fn text(&self) -> &str {
        match self {
            Reply::Pending => PENDING_TEXT,
            Reply::Answered { text, .. } => text,
            Reply::Failed => FALLBACK_REPLY,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Reply::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user_text: String,
    pub reply: Reply,
    ticket: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub ticket: Uuid,
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub ticket: Uuid,
    pub result: Result<QueryAnswer, Arc<ClientError>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Input was empty or whitespace.
    EmptyInput,
    /// A query is already in flight.
    Busy,
}

pub async fn run_query(api: Arc<dyn DashboardApi>, request: QueryRequest) -> QueryResponse {
    let result = api.query_transcripts(&request.query).await.map_err(Arc::new);
    QueryResponse {
        ticket: request.ticket,
        result,
    }
}

#[derive(Debug, Default)]
pub struct ConversationController {
    exchanges: Vec<Exchange>,
    input: String,
    awaiting: Option<Uuid>,
    open: bool,
}

impl ConversationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn can_submit(&self) -> bool {
        self.awaiting.is_none()
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show or hide the overlay. The transcript survives either way.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub fn submit(&mut self) -> Result<QueryRequest, SubmitRejected> {
        if self.input.trim().is_empty() {
            return Err(SubmitRejected::EmptyInput);
        }
        if self.awaiting.is_some() {
            debug!("query already in flight, ignoring submission");
            return Err(SubmitRejected::Busy);
        }

        let query = std::mem::take(&mut self.input);
        let ticket = Uuid::new_v4();
        self.exchanges.push(Exchange {
            user_text: query.clone(),
            reply: Reply::Pending,
            ticket,
        });
        self.awaiting = Some(ticket);
        info!(%ticket, "submitting transcript query");

        Ok(QueryRequest { ticket, query })
    }

    /// Resolve the exchange bound to `response.ticket`. Returns `false` when
    /// the ticket is not the outstanding one.
    pub fn resolve(&mut self, response: QueryResponse) -> bool {
        if self.awaiting != Some(response.ticket) {
            debug!(ticket = %response.ticket, "ignoring unexpected query response");
            return false;
        }
        self.awaiting = None;

        let Some(exchange) = self
            .exchanges
            .iter_mut()
            .rev()
            .find(|exchange| exchange.ticket == response.ticket)
        else {
            return false;
        };

        exchange.reply = match response.result {
            Ok(answer) => Reply::Answered {
                text: answer.answer,
                sources: answer.sources,
            },
            Err(err) => {
                warn!(ticket = %response.ticket, error = %err, "transcript query failed");
                Reply::Failed
            }
        };
        true
    }
}
