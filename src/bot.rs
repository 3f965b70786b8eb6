use crate::error::{RelayError, Result};
use crate::history::HistoryStore;
use crate::models::{ChatId, IncomingMessage};
use crate::orchestrator::{relay_message, OrchestratorContext};
use crate::telegram::commands::{is_command, parse_command, Command};
use crate::telegram::{Message, TelegramClient, Update};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

const NETWORK_BACKOFF: Duration = Duration::from_secs(5);
const PARSE_BACKOFF: Duration = Duration::from_secs(2);

/// How an incoming message is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Command { chat_id: ChatId, command: Command },
    Text(IncomingMessage),
    Ignored,
}

/// Route a message: known commands get a static reply, other text goes to the relay.
pub fn classify(message: &Message, bot_username: Option<&str>) -> Inbound {
    let Some(text) = message.text.as_deref() else {
        return Inbound::Ignored;
    };

    if is_command(text) {
        return match parse_command(text, bot_username) {
            Some(command) => Inbound::Command {
                chat_id: message.chat.id,
                command,
            },
            None => Inbound::Ignored,
        };
    }

    match &message.from {
        Some(user) if !user.is_bot => Inbound::Text(IncomingMessage {
            user_id: user.id,
            chat_id: message.chat.id,
            text: text.to_string(),
        }),
        _ => Inbound::Ignored,
    }
}

pub struct Bot {
    context: Arc<OrchestratorContext>,
    bot_username: Option<String>,
}

impl Bot {
    pub fn new(context: OrchestratorContext, bot_username: Option<String>) -> Self {
        Self {
            context: Arc::new(context),
            bot_username,
        }
    }

    /// Answer a command. Never touches conversation history.
    pub async fn answer_command(&self, chat_id: ChatId, command: Command) -> Result<()> {
        debug!(chat_id, command = command.name(), "answering command");
        let transport = &self.context.transport;
        if command.is_markdown() {
            transport.send_markdown(chat_id, command.reply()).await
        } else {
            transport.send_text(chat_id, command.reply()).await
        }
    }

    /// Handle one update. Commands are answered inline; text messages are
    /// spawned into `exchanges`.
    pub async fn handle_update(&self, update: Update, exchanges: &mut JoinSet<()>) {
        let Some(message) = update.message else {
            return;
        };

        match classify(&message, self.bot_username.as_deref()) {
            Inbound::Command { chat_id, command } => {
                if let Err(e) = self.answer_command(chat_id, command).await {
                    warn!(chat_id, error = %e, "failed to answer command");
                }
            }
            Inbound::Text(incoming) => {
                let context = Arc::clone(&self.context);
                exchanges.spawn(async move {
                    if let Err(e) = relay_message(&context, &incoming).await {
                        error!(
                            user_id = incoming.user_id,
                            chat_id = incoming.chat_id,
                            error = %e,
                            "failed to deliver reply"
                        );
                    }
                });
            }
            Inbound::Ignored => {}
        }
    }

    /// Long-poll Telegram until `shutdown` resolves, then wait for the
    /// exchanges still in flight so every accepted update gets its reply.
    pub async fn run<F>(&self, telegram: &TelegramClient, poll_timeout: u64, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut offset: i64 = 0;
        let mut exchanges = JoinSet::new();

        info!(poll_timeout, "polling for updates");

        loop {
            let polled = tokio::select! {
                _ = &mut shutdown => break,
                polled = telegram.get_updates(offset, poll_timeout) => polled,
            };

            let updates = match polled {
                Ok(updates) => updates,
                Err(e) => {
                    let backoff = match e {
                        RelayError::JsonError(_) | RelayError::MalformedResponse(_) => {
                            PARSE_BACKOFF
                        }
                        _ => NETWORK_BACKOFF,
                    };
                    warn!(error = %e, backoff_secs = backoff.as_secs(), "poll failed, retrying");
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = tokio::time::sleep(backoff) => continue,
                    }
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                self.handle_update(update, &mut exchanges).await;
            }

            while let Some(finished) = exchanges.try_join_next() {
                log_join_failure(finished);
            }

            let purged = self.context.history.purge_expired();
            if purged > 0 {
                debug!(purged, "expired conversation histories dropped");
            }
        }

        if !exchanges.is_empty() {
            info!(in_flight = exchanges.len(), "waiting for in-flight replies");
        }
        while let Some(finished) = exchanges.join_next().await {
            log_join_failure(finished);
        }

        info!("stopped polling");
    }
}

fn log_join_failure(finished: std::result::Result<(), tokio::task::JoinError>) {
    if let Err(e) = finished {
        error!(error = %e, "relay task failed");
    }
}
