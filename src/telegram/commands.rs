use regex::Regex;
use std::sync::OnceLock;

/// Slash commands the bot answers with a fixed reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    About,
    Language,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::Start,
        Command::Help,
        Command::About,
        Command::Language,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::About => "about",
            Command::Language => "language",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(name))
    }

    /// Static reply text. Everything except `/start` is Markdown.
    pub fn reply(&self) -> &'static str {
        match self {
            Command::Start => "Hello! I am your AI chatbot. How can I assist you today?",
            Command::Help => {
                "*Help*\n\n\
                 • Just type any message\n\
                 • Supports Hindi, Marathi, Tamil, Telugu\n\
                 • Commands:\n\
                 /start Start bot\n\
                 /help Help menu\n\
                 /about About bot\n\
                 /language Language info"
            }
            Command::About => {
                "*About*\n\n\
                 This is a multilingual AI chatbot built using:\n\
                 • Rust\n\
                 • Telegram Bot API\n\
                 • Google Gemini AI"
            }
            Command::Language => {
                "*Supported Languages*\n\n\
                 • Hindi\n\
                 • Marathi\n\
                 • Tamil\n\
                 • Telugu\n\n\
                 Just type in your language!"
            }
        }
    }

    pub fn is_markdown(&self) -> bool {
        !matches!(self, Command::Start)
    }
}

fn command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/[A-Za-z0-9_]+(@\w+)?$").expect("static pattern is valid"))
}

/// Whether the first word is shaped like a bot command (`/name` or
/// `/name@bot`), known or not. Text such as `/home/me` or `/ hello` is not.
pub fn is_command(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .is_some_and(|word| text.starts_with('/') && command_pattern().is_match(word))
}

/// Parse `/name` or `/name@botname` from the first word of `text`.
///
/// A command addressed to a different bot yields `None`.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<Command> {
    let first_word = text.split_whitespace().next()?;
    let invocation = first_word.strip_prefix('/')?;

    let (name, target) = match invocation.split_once('@') {
        Some((name, target)) => (name, Some(target)),
        None => (invocation, None),
    };

    if let (Some(target), Some(username)) = (target, bot_username) {
        if !target.eq_ignore_ascii_case(username) {
            return None;
        }
    }

    Command::from_name(name)
}
