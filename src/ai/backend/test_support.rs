//! Test-support utilities for chat backends.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::EnhanceError;

use super::{ChatBackend, ChatRequest};

/// Deterministic backend stub that replays scripted replies and records
/// every request it receives.
///
/// Replies are consumed in order; once the script is exhausted the last
/// reply is repeated.
#[derive(Debug)]
pub struct StubChatBackend {
    replies: Mutex<VecDeque<Result<String, EnhanceError>>>,
    last_reply: Mutex<Option<Result<String, EnhanceError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubChatBackend {
    /// Creates a stub that always answers with `reply`.
    #[must_use]
    pub fn success(reply: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(reply.into())])
    }

    /// Creates a stub that always fails with `error`.
    #[must_use]
    pub fn failure(error: EnhanceError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    /// Creates a stub that answers with each scripted result in turn.
    #[must_use]
    pub fn scripted(replies: Vec<Result<String, EnhanceError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            last_reply: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Returns the most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests().pop()
    }
}

impl ChatBackend for StubChatBackend {
    fn chat(&self, request: &ChatRequest) -> Result<String, EnhanceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let next = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front());
        let Ok(mut last_reply) = self.last_reply.lock() else {
            return Err(EnhanceError::external("stub backend lock poisoned"));
        };

        match next {
            Some(reply) => {
                *last_reply = Some(reply.clone());
                reply
            }
            None => last_reply
                .clone()
                .unwrap_or_else(|| Err(EnhanceError::external("stub backend has no replies"))),
        }
    }
}
