#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use spotcred::auth::{TokenEndpoint, TokenResponse};
use spotcred::error::Result;

/// One request seen by [`ScriptedEndpoint`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub form: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// In-memory token endpoint answering from a queue of canned responses.
#[derive(Default)]
pub struct ScriptedEndpoint {
    responses: Mutex<VecDeque<TokenResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    delay: Option<Duration>,
}

impl ScriptedEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push_back(TokenResponse { status, body });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }
}

#[async_trait]
impl TokenEndpoint for ScriptedEndpoint {
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<TokenResponse> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(RecordedRequest {
                url: url.to_string(),
                form: form
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
            });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let response = self
            .responses
            .lock()
            .expect("responses lock poisoned")
            .pop_front()
            .expect("no scripted response left");
        Ok(response)
    }
}

pub fn app_token(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 3600
    })
}

pub fn user_token(access_token: &str, scope: &str) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 3600,
        "scope": scope
    })
}
