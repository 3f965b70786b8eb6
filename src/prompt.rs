/// Marker the completion service continues from.
pub const ASSISTANT_MARKER: &str = "Assistant:";

/// Assemble the completion prompt.
///
/// The instruction line always comes first, the transcript (which already ends
/// with the newest user turn) is embedded verbatim, and the prompt closes with
/// the bare `Assistant:` marker so the model continues the conversation instead
/// of restating it.
pub fn build_prompt(language: &str, transcript: &str) -> String {
    format!(
        "Reply ONLY in {} language.\nConversation so far:\n{}\n{}",
        language, transcript, ASSISTANT_MARKER
    )
}
