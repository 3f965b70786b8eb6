use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "relaybot")]
#[command(about = "Telegram bot that relays conversations to Google Gemini", long_about = None)]
pub struct Args {
    #[arg(long = "config", help = "Path to a YAML or JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(long = "model", help = "Gemini model name (e.g., gemini-1.5-flash)")]
    pub model: Option<String>,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., https://generativelanguage.googleapis.com/v1beta)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(long = "max-turns", help = "Turns of history kept per user")]
    pub max_turns: Option<usize>,

    #[arg(short = 'v', long = "verbose", help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        long = "check-config",
        help = "Print the resolved configuration and exit"
    )]
    pub check_config: bool,
}
