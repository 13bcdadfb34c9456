//! Alith playground conversation state.
//!
//! The page owns the network calls; this module turns their outcomes into
//! transcript entries so the wording and ordering stay testable without a
//! browser.

#[cfg(test)]
#[path = "playground_test.rs"]
mod playground_test;

use crate::net::error::ApiError;
use crate::net::types::{AlithExecuteRequest, AlithExecuteResponse, AlithQueryRequest, AlithQueryResponse};

/// Context label sent with every playground request.
pub const PLAYGROUND_CONTEXT: &str = "playground";

pub const GREETING: &str = "Hello! I'm Alith, your AI assistant from Metis. How can I help you today?";
pub const UNPROCESSED_REPLY: &str = "I received your message but couldn't process it properly.";
pub const QUERY_FAILED_REPLY: &str = "Sorry, I encountered an error processing your request. Please try again.";

/// Who authored a transcript entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Alith,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaygroundMessage {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    /// ISO-8601 creation time.
    pub timestamp: String,
}

impl PlaygroundMessage {
    fn new(sender: Sender, content: impl Into<String>, timestamp: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            content: content.into(),
            timestamp: timestamp.to_owned(),
        }
    }
}

/// Conversation transcript plus input box and in-flight flag.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaygroundState {
    pub messages: Vec<PlaygroundMessage>,
    pub input: String,
    pub loading: bool,
    /// Last execute failure, shown above the input.
    pub error: Option<String>,
}

impl PlaygroundState {
    /// Fresh transcript opened by Alith's greeting.
    #[must_use]
    pub fn new(timestamp: &str) -> Self {
        Self {
            messages: vec![PlaygroundMessage::new(Sender::Alith, GREETING, timestamp)],
            input: String::new(),
            loading: false,
            error: None,
        }
    }

    /// Whether the send control is enabled.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Move the input into the transcript and build the query request.
    ///
    /// Returns `None` (and changes nothing) for blank input or while a request
    /// is already pending.
    pub fn begin_query(&mut self, timestamp: &str) -> Option<AlithQueryRequest> {
        if !self.can_send() {
            return None;
        }
        let query = std::mem::take(&mut self.input);
        self.messages.push(PlaygroundMessage::new(Sender::User, query.clone(), timestamp));
        self.loading = true;
        self.error = None;
        Some(AlithQueryRequest { query, context: PLAYGROUND_CONTEXT.to_owned(), timestamp: timestamp.to_owned() })
    }

    /// Append Alith's reply (or the apology on failure) and clear the flag.
    pub fn finish_query(&mut self, result: Result<AlithQueryResponse, ApiError>, timestamp: &str) {
        self.loading = false;
        let content = match result {
            Ok(resp) => resp.response.filter(|r| !r.is_empty()).unwrap_or_else(|| UNPROCESSED_REPLY.to_owned()),
            Err(_) => QUERY_FAILED_REPLY.to_owned(),
        };
        self.messages.push(PlaygroundMessage::new(Sender::Alith, content, timestamp));
    }

    /// Build an execute request for `service_id`, or `None` while busy.
    pub fn begin_execute(&mut self, service_id: &str) -> Option<AlithExecuteRequest> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(AlithExecuteRequest {
            service_id: service_id.to_owned(),
            parameters: serde_json::json!({}),
            context: PLAYGROUND_CONTEXT.to_owned(),
        })
    }

    /// Append the execution result, or record the failure inline.
    pub fn finish_execute(&mut self, result: Result<AlithExecuteResponse, ApiError>, timestamp: &str) {
        self.loading = false;
        match result {
            Ok(resp) => {
                let detail = resp.result.filter(|r| !r.is_empty()).unwrap_or_else(|| "Service completed".to_owned());
                self.messages.push(PlaygroundMessage::new(
                    Sender::Alith,
                    format!("Service executed successfully: {detail}"),
                    timestamp,
                ));
            }
            Err(err) => self.error = Some(format!("Service execution failed: {err}")),
        }
    }
}

/// Enter sends; Shift+Enter inserts a newline.
#[must_use]
pub fn is_send_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}
