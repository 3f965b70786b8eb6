use crate::api::CompletionService;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::language::{detect_or_default, LanguageDetector, DEFAULT_LANGUAGE};
use crate::models::{IncomingMessage, Role};
use crate::prompt::build_prompt;
use crate::transport::Transport;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_FALLBACK_REPLY: &str =
    "Sorry, I am having trouble processing your request right now.";

pub const DEFAULT_TYPING_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub default_language: String,
    /// Pause between the typing indicator and the completion call.
    pub typing_delay: Duration,
    pub fallback_reply: String,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            typing_delay: Duration::from_millis(DEFAULT_TYPING_DELAY_MS),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}

/// Everything one exchange touches. Shared by every per-message task.
pub struct OrchestratorContext {
    pub history: Arc<dyn HistoryStore>,
    pub detector: Arc<dyn LanguageDetector>,
    pub completion: Arc<dyn CompletionService>,
    pub transport: Arc<dyn Transport>,
    pub settings: RelaySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The model answered and the answer was recorded as an assistant turn.
    Completed,
    /// The completion call failed; the fallback reply was sent instead.
    Failed,
}

/// What happened to one incoming message.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub language: String,
    pub prompt: String,
    pub reply: String,
    pub outcome: Outcome,
}

/// Relay one text message through the completion service and back.
///
/// Only a failure to deliver the reply is returned as `Err`; completion
/// failures are answered with the fallback reply.
pub async fn relay_message(
    context: &OrchestratorContext,
    incoming: &IncomingMessage,
) -> Result<Exchange> {
    let user_id = incoming.user_id;

    context.history.append(user_id, Role::User, &incoming.text);
    let language = detect_or_default(
        context.detector.as_ref(),
        &incoming.text,
        &context.settings.default_language,
    );

    let transcript = context.history.render(user_id);
    let prompt = build_prompt(&language, &transcript);

    if let Err(e) = context.transport.send_typing(incoming.chat_id).await {
        debug!(chat_id = incoming.chat_id, error = %e, "typing indicator not sent");
    }
    if !context.settings.typing_delay.is_zero() {
        tokio::time::sleep(context.settings.typing_delay).await;
    }

    let (reply, outcome) = match context.completion.generate(&prompt).await {
        Ok(reply) => {
            context.history.append(user_id, Role::Assistant, &reply);
            (reply, Outcome::Completed)
        }
        Err(e) => {
            warn!(user_id, error = %e, "completion failed, sending fallback reply");
            (context.settings.fallback_reply.clone(), Outcome::Failed)
        }
    };

    context.transport.send_text(incoming.chat_id, &reply).await?;

    debug!(user_id, language = %language, outcome = ?outcome, "exchange finished");

    Ok(Exchange {
        language,
        prompt,
        reply,
        outcome,
    })
}
