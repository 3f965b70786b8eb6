use relaybot::history::{HistoryStore, InMemoryHistoryStore};
use relaybot::models::Role;
use relaybot::prompt::build_prompt;

#[test]
fn test_prompt_layout() {
    let prompt = build_prompt("mr", "User: नमस्कार");
    assert_eq!(
        prompt,
        "Reply ONLY in mr language.\nConversation so far:\nUser: नमस्कार\nAssistant:"
    );
}

#[test]
fn test_prompt_embeds_transcript_verbatim() {
    let store = InMemoryHistoryStore::default();
    store.append(1, Role::User, "hi");
    store.append(1, Role::Assistant, "hello!");
    store.append(1, Role::User, "how are you?");

    let prompt = build_prompt("en", &store.render(1));
    let lines: Vec<&str> = prompt.lines().collect();

    assert_eq!(lines.first(), Some(&"Reply ONLY in en language."));
    assert_eq!(lines[2..5], ["User: hi", "Assistant: hello!", "User: how are you?"]);
    assert!(prompt.ends_with("User: how are you?\nAssistant:"));
}
