#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use desk_admin::pages::{Confirm, ConfirmPrompt, Navigator};
use desk_core::errors::{DeskError, DeskResult};
use desk_core::transport::{ApiTransport, Method, RequestConfig, Response};
use serde_json::Value;
use tokio::sync::Notify;

#[derive(Debug, Clone)]
pub enum Reply {
    Json(u16, Value),
    Fail(u16, Value),
    Network,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Scripted transport. Replies are queued per (method, path); the last
/// reply for a route repeats once the queue is down to one.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    gates: Mutex<HashMap<(Method, String), Arc<Notify>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Hold requests to this route until the returned `Notify` is signalled.
    pub fn gate(&self, method: Method, path: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert((method, path.to_string()), notify.clone());
        notify
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.method == method).collect()
    }

    async fn respond(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<&Value>,
    ) -> DeskResult<Response> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            params: params.to_vec(),
            body: body.cloned(),
        });

        let key = (method, path.to_string());
        let gate = self.gates.lock().unwrap().get(&key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            let queue = replies
                .get_mut(&key)
                .unwrap_or_else(|| panic!("no reply scripted for {} {path}", method.as_str()));
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        };

        match reply {
            Reply::Json(status, body) => Ok(Response::new(status, body)),
            Reply::Fail(status, body) => Err(DeskError::from_response(status, &body).into_anyhow()),
            Reply::Network => Err(DeskError::network("connection refused").into_anyhow()),
        }
    }
}

#[async_trait]
impl ApiTransport for FakeTransport {
    async fn get(&self, path: &str, params: &[(String, String)]) -> DeskResult<Response> {
        self.respond(Method::Get, path, params, None).await
    }

    async fn post(&self, path: &str, body: &Value, _config: &RequestConfig) -> DeskResult<Response> {
        self.respond(Method::Post, path, &[], Some(body)).await
    }

    async fn put(&self, path: &str, body: &Value, _config: &RequestConfig) -> DeskResult<Response> {
        self.respond(Method::Put, path, &[], Some(body)).await
    }

    async fn delete(&self, path: &str) -> DeskResult<Response> {
        self.respond(Method::Delete, path, &[], None).await
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

pub struct ScriptedConfirm {
    pub answer: bool,
    pub prompts: Mutex<Vec<ConfirmPrompt>>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.answer
    }
}
