mod common;

use common::{harness, Sent};
use relaybot::bot::{classify, Bot, Inbound};
use relaybot::history::HistoryStore;
use relaybot::models::{IncomingMessage, Role};
use relaybot::telegram::commands::is_command;
use relaybot::telegram::{parse_command, Command, Message, TelegramClient, Update};
use serde_json::json;
use std::time::Duration;
use tokio::task::JoinSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn message(text: Option<&str>) -> Message {
    serde_json::from_value(json!({
        "message_id": 1,
        "from": { "id": 11, "is_bot": false, "first_name": "Asha" },
        "chat": { "id": 22, "type": "private" },
        "text": text,
    }))
    .unwrap()
}

fn update(text: &str) -> Update {
    serde_json::from_value(json!({
        "update_id": 900,
        "message": {
            "message_id": 1,
            "from": { "id": 11, "is_bot": false, "first_name": "Asha" },
            "chat": { "id": 22, "type": "private" },
            "text": text,
        }
    }))
    .unwrap()
}

#[test]
fn test_parse_known_commands() {
    assert_eq!(parse_command("/start", None), Some(Command::Start));
    assert_eq!(parse_command("/help please", None), Some(Command::Help));
    assert_eq!(parse_command("/ABOUT", None), Some(Command::About));
    assert_eq!(parse_command("/language", None), Some(Command::Language));
}

#[test]
fn test_parse_addressed_commands() {
    assert_eq!(
        parse_command("/help@relay_bot", Some("relay_bot")),
        Some(Command::Help)
    );
    assert_eq!(parse_command("/help@other_bot", Some("relay_bot")), None);
    assert_eq!(parse_command("/help@relay_bot", None), Some(Command::Help));
}

#[test]
fn test_parse_unknown_and_plain_text() {
    assert_eq!(parse_command("/weather", None), None);
    assert_eq!(parse_command("hello /start", None), None);
    assert_eq!(parse_command("", None), None);
}

#[test]
fn test_only_command_shaped_text_counts_as_command() {
    assert!(is_command("/start"));
    assert!(is_command("/weather today"));
    assert!(is_command("/help@relay_bot"));
    assert!(!is_command("/ kya haal hai"));
    assert!(!is_command("/home/me ka path"));
    assert!(!is_command("hello /start"));
    assert!(!is_command("/"));
}

#[test]
fn test_slash_text_that_is_not_a_command_is_relayed() {
    assert_eq!(
        classify(&message(Some("/ kya haal hai")), None),
        Inbound::Text(IncomingMessage {
            user_id: 11,
            chat_id: 22,
            text: "/ kya haal hai".to_string(),
        })
    );
    assert!(matches!(
        classify(&message(Some("/home/me")), None),
        Inbound::Text(_)
    ));
}

#[test]
fn test_command_replies_are_static() {
    assert!(Command::Start.reply().starts_with("Hello!"));
    assert!(Command::Help.reply().contains("/language Language info"));
    assert!(!Command::Start.is_markdown());
    assert!(Command::Language.is_markdown());
}

#[test]
fn test_classify_routes_text_and_commands() {
    assert_eq!(
        classify(&message(Some("/help")), None),
        Inbound::Command {
            chat_id: 22,
            command: Command::Help
        }
    );
    assert_eq!(
        classify(&message(Some("kaise ho?")), None),
        Inbound::Text(IncomingMessage {
            user_id: 11,
            chat_id: 22,
            text: "kaise ho?".to_string(),
        })
    );
    assert_eq!(classify(&message(Some("/unknown")), None), Inbound::Ignored);
    assert_eq!(classify(&message(None), None), Inbound::Ignored);
}

#[tokio::test]
async fn test_command_never_touches_history() {
    let h = harness(Some("en"), vec![]);
    h.history.append(11, Role::User, "earlier message");
    let before = h.history.render(11);
    let transport = h.transport.clone();
    let history = h.history.clone();
    let completion = h.completion.clone();

    let bot = Bot::new(h.context, Some("relay_bot".to_string()));
    let mut exchanges = JoinSet::new();
    bot.handle_update(update("/help"), &mut exchanges).await;

    assert!(exchanges.is_empty());
    assert_eq!(history.render(11), before);
    assert_eq!(history.user_count(), 1);
    assert!(completion.prompts().is_empty());
    assert_eq!(
        transport.sent(),
        vec![Sent::Markdown(22, Command::Help.reply().to_string())]
    );
}

#[tokio::test]
async fn test_start_command_is_plain_text() {
    let h = harness(Some("en"), vec![]);
    let transport = h.transport.clone();

    let bot = Bot::new(h.context, None);
    bot.handle_update(update("/start"), &mut JoinSet::new()).await;

    assert_eq!(
        transport.sent(),
        vec![Sent::Text(22, Command::Start.reply().to_string())]
    );
}

#[tokio::test]
async fn test_text_update_is_relayed_on_a_task() {
    let h = harness(Some("en"), vec![Ok("Hi there".to_string())]);
    let transport = h.transport.clone();
    let history = h.history.clone();

    let bot = Bot::new(h.context, None);
    let mut exchanges = JoinSet::new();
    bot.handle_update(update("hello"), &mut exchanges).await;
    assert_eq!(exchanges.len(), 1);
    exchanges.join_next().await.unwrap().unwrap();

    assert_eq!(history.render(11), "User: hello\nAssistant: Hi there");
    assert_eq!(
        transport.sent().last(),
        Some(&Sent::Text(22, "Hi there".to_string()))
    );
}

#[tokio::test]
async fn test_run_delivers_in_flight_reply_before_returning() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/getUpdates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": [{
                "update_id": 7,
                "message": {
                    "message_id": 1,
                    "from": { "id": 11, "is_bot": false, "first_name": "Asha" },
                    "chat": { "id": 22, "type": "private" },
                    "text": "hello"
                }
            }]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/getUpdates"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": true, "result": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut h = harness(Some("en"), vec![Ok("Hi".to_string())]);
    h.context.settings.typing_delay = Duration::from_millis(300);
    let transport = h.transport.clone();
    let history = h.history.clone();

    let telegram = TelegramClient::new("123:abc", &server.uri()).unwrap();
    let bot = Bot::new(h.context, None);
    bot.run(&telegram, 0, tokio::time::sleep(Duration::from_millis(100)))
        .await;

    assert_eq!(
        transport.sent(),
        vec![Sent::Typing(22), Sent::Text(22, "Hi".to_string())]
    );
    assert_eq!(history.render(11), "User: hello\nAssistant: Hi");
}
