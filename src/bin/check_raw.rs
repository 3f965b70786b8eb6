use colored::*;
use relaybot::api::client::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL};
use relaybot::api::response::extract_reply;
use relaybot::api::{GeminiClient, GenerateRequest};
use relaybot::language::{detect_or_default, WhatlangDetector, DEFAULT_LANGUAGE};
use relaybot::models::Turn;
use relaybot::prompt::build_prompt;
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <message>", args[0]);
        std::process::exit(1);
    }

    let message = &args[1];

    let api_key = env::var("GEMINI_API_KEY").unwrap_or_else(|_| {
        eprintln!("Error: GEMINI_API_KEY environment variable not set");
        std::process::exit(1);
    });

    let model = env::var("RELAYBOT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let endpoint =
        env::var("RELAYBOT_API_ENDPOINT").unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string());

    let language = detect_or_default(&WhatlangDetector::new(), message, DEFAULT_LANGUAGE);
    let prompt = build_prompt(&language, &Turn::user(message.as_str()).render());

    println!("{}", format!("Using model: {}", model).green());
    println!("{}", format!("Detected language: {}", language).yellow());
    println!("{}", "-".repeat(80).dimmed());

    println!("{}", "Request payload:".bold());
    println!(
        "{}",
        serde_json::to_string_pretty(&GenerateRequest::from_prompt(&prompt))?
    );
    println!("{}", "-".repeat(80).dimmed());

    let client = GeminiClient::new(&api_key, &endpoint, &model, Duration::from_secs(60))?;
    let response = match client.generate_raw(&prompt).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    println!("{}", "Raw response:".bold());
    println!("{}", serde_json::to_string_pretty(&response)?);
    println!("{}", "-".repeat(80).dimmed());

    match extract_reply(&response) {
        Ok(reply) => println!("{}: {}", "Reply".yellow(), reply),
        Err(e) => eprintln!("{}", format!("Would fall back: {}", e).red()),
    }

    Ok(())
}
