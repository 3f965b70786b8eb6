use clap::Parser;
use colored::*;
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relaybot::api::GeminiClient;
use relaybot::bot::Bot;
use relaybot::cli::Args;
use relaybot::config::Config;
use relaybot::history::InMemoryHistoryStore;
use relaybot::language::WhatlangDetector;
use relaybot::orchestrator::OrchestratorContext;
use relaybot::telegram::TelegramClient;

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("relaybot=debug")
        } else {
            EnvFilter::new("relaybot=info")
        }
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_config(config: &Config) {
    println!("{}", "Resolved configuration:".bold());
    for (key, value) in config.summary() {
        println!("  {} {}", format!("{}:", key).cyan(), value);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    if args.check_config {
        print_config(&config);
        return Ok(());
    }

    init_logging(config.verbose);

    let completion = GeminiClient::new(
        &config.gemini_api_key,
        &config.api_endpoint,
        &config.model,
        config.request_timeout(),
    )?;
    let telegram = Arc::new(TelegramClient::new(
        &config.telegram_token,
        &config.telegram_api,
    )?);

    let me = match telegram.get_me().await {
        Ok(me) => me,
        Err(e) => {
            eprintln!("{} Telegram rejected the bot token: {}", "Error:".red(), e);
            process::exit(1);
        }
    };
    info!(
        username = me.username.as_deref().unwrap_or("unknown"),
        model = %config.model,
        max_turns = config.max_turns,
        "bot connected"
    );

    let context = OrchestratorContext {
        history: Arc::new(InMemoryHistoryStore::with_eviction(
            config.max_turns,
            config.eviction_policy(),
        )),
        detector: Arc::new(WhatlangDetector::new()),
        completion: Arc::new(completion),
        transport: telegram.clone(),
        settings: config.relay_settings(),
    };
    let bot = Bot::new(context, me.username.clone());

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("interrupt received, shutting down"),
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for interrupts");
                std::future::pending::<()>().await
            }
        }
    };

    bot.run(&telegram, config.poll_timeout, shutdown).await;

    Ok(())
}
