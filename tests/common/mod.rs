#![allow(dead_code)]

use futures::future::{BoxFuture, FutureExt};
use relaybot::api::CompletionService;
use relaybot::error::{RelayError, Result};
use relaybot::history::{HistoryStore, InMemoryHistoryStore};
use relaybot::language::LanguageDetector;
use relaybot::models::ChatId;
use relaybot::orchestrator::{OrchestratorContext, RelaySettings};
use relaybot::transport::Transport;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(ChatId, String),
    Markdown(ChatId, String),
    Typing(ChatId),
}

#[derive(Default)]
pub struct FakeTransport {
    pub sent: Mutex<Vec<Sent>>,
    pub fail_typing: bool,
}

impl FakeTransport {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn send_text<'a>(&'a self, chat_id: ChatId, text: &'a str) -> BoxFuture<'a, Result<()>> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Text(chat_id, text.to_string()));
        futures::future::ready(Ok::<(), RelayError>(())).boxed()
    }

    fn send_markdown<'a>(&'a self, chat_id: ChatId, text: &'a str) -> BoxFuture<'a, Result<()>> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Markdown(chat_id, text.to_string()));
        futures::future::ready(Ok::<(), RelayError>(())).boxed()
    }

    fn send_typing(&self, chat_id: ChatId) -> BoxFuture<'_, Result<()>> {
        self.sent.lock().unwrap().push(Sent::Typing(chat_id));
        let fail = self.fail_typing;
        async move {
            if fail {
                Err(RelayError::ApiError {
                    status: 400,
                    message: "typing refused".to_string(),
                })
            } else {
                Ok(())
            }
        }
        .boxed()
    }
}

/// Replies with scripted results in order and records every prompt it sees.
#[derive(Default)]
pub struct FakeCompletion {
    pub replies: Mutex<VecDeque<Result<String>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeCompletion {
    pub fn replying(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionService for FakeCompletion {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RelayError::MalformedResponse("no scripted reply".to_string())));
        async move { reply }.boxed()
    }
}

pub struct FixedDetector(pub Option<&'static str>);

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str) -> Option<String> {
        self.0.map(|code| code.to_string())
    }
}

pub struct Harness {
    pub history: Arc<InMemoryHistoryStore>,
    pub completion: Arc<FakeCompletion>,
    pub transport: Arc<FakeTransport>,
    pub context: OrchestratorContext,
}

pub fn harness(detected: Option<&'static str>, replies: Vec<Result<String>>) -> Harness {
    let history = Arc::new(InMemoryHistoryStore::new(5));
    let completion = Arc::new(FakeCompletion::replying(replies));
    let transport = Arc::new(FakeTransport::default());

    let context = OrchestratorContext {
        history: history.clone() as Arc<dyn HistoryStore>,
        detector: Arc::new(FixedDetector(detected)),
        completion: completion.clone(),
        transport: transport.clone(),
        settings: RelaySettings {
            typing_delay: Duration::ZERO,
            ..RelaySettings::default()
        },
    };

    Harness {
        history,
        completion,
        transport,
        context,
    }
}
