//! Fakes for exercising handlers without a network or a chat platform.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use partbot_models::{OutboundRequest, RemoteResponse};
use serde_json::Value;

use crate::client::AutomationClient;
use crate::error::RelayError;
use crate::responder::{Reply, Responder, Visibility};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

enum Outcome {
    Respond(Value),
    Unreachable(String),
}

/// An [`AutomationClient`] that returns a canned body and records every request.
pub struct FakeClient {
    outcome: Outcome,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl FakeClient {
    /// Respond with `body` exactly as given.
    pub fn responding(body: Value) -> Self {
        Self {
            outcome: Outcome::Respond(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Respond with `{"status": "ok"}` merged into `payload`.
    pub fn ok(payload: Value) -> Self {
        let mut body = match payload {
            Value::Object(map) => Value::Object(map),
            _ => Value::Object(Default::default()),
        };
        body["status"] = Value::String("ok".to_string());
        Self::responding(body)
    }

    /// Respond with an application-level error.
    pub fn app_error(message: &str) -> Self {
        Self::responding(serde_json::json!({ "status": "error", "message": message }))
    }

    /// Fail every call the way an unreachable endpoint does.
    pub fn unreachable(detail: &str) -> Self {
        Self {
            outcome: Outcome::Unreachable(detail.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl AutomationClient for FakeClient {
    async fn call(&self, request: &OutboundRequest) -> Result<RemoteResponse, RelayError> {
        lock(&self.requests).push(request.clone());
        match &self.outcome {
            Outcome::Respond(body) => RemoteResponse::from_value(body.clone())
                .ok_or_else(|| RelayError::Decode("top-level value is not an object".to_string())),
            Outcome::Unreachable(detail) => Err(RelayError::Status {
                status: 502,
                body: detail.clone(),
            }),
        }
    }
}

/// What a handler did with the interaction, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponderEvent {
    Reply(Reply),
    Defer(Visibility),
    Edit(String),
}

/// A [`Responder`] that records every call.
#[derive(Default)]
pub struct RecordingResponder {
    events: Mutex<Vec<ResponderEvent>>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ResponderEvent> {
        lock(&self.events).clone()
    }

    /// Content of the last reply or edit.
    pub fn last_content(&self) -> Option<String> {
        lock(&self.events).iter().rev().find_map(|event| match event {
            ResponderEvent::Reply(reply) => Some(reply.content.clone()),
            ResponderEvent::Edit(content) => Some(content.clone()),
            ResponderEvent::Defer(_) => None,
        })
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn reply(&self, reply: Reply) -> Result<(), RelayError> {
        lock(&self.events).push(ResponderEvent::Reply(reply));
        Ok(())
    }

    async fn defer(&self, visibility: Visibility) -> Result<(), RelayError> {
        lock(&self.events).push(ResponderEvent::Defer(visibility));
        Ok(())
    }

    async fn edit_reply(&self, content: String) -> Result<(), RelayError> {
        lock(&self.events).push(ResponderEvent::Edit(content));
        Ok(())
    }
}
