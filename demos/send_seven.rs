//! Send an SMS through seven.io and print the delivery reports, then the balance.
use sms_core::{SmsGateway, SmsMessage};
use sms_seven::{SevenConfig, SevenGateway};

use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = arg_or_env("--api-key", "SEVEN_API_KEY");
    let from = arg_or_env("--from", "SMS_FROM");
    let to = arg_or_env("--to", "SMS_TO");
    let text = arg_or_env("--text", "SMS_TEXT");

    let gateway = SevenGateway::new(SevenConfig::from_form(&api_key, &from)?)?;
    let sms = SmsMessage::outgoing(text, to.split(',').map(str::trim));
    let result = gateway.send(&sms).await;

    println!(
        "Result: {:?} ({})",
        result.error,
        result.error_message.as_deref().unwrap_or_default()
    );
    for report in &result.reports {
        println!(
            "  {} -> {:?} id={:?} {}",
            report.recipient, report.status, report.message_id, report.status_message
        );
    }

    let balance = gateway.credit_balance().await?;
    println!("Balance: {}", serde_json::to_string_pretty(&balance)?);
    Ok(())
}

fn arg_or_env(flag: &str, env_key: &str) -> String {
    let args: Vec<String> = std::env::args().collect();
    if let Some(idx) = args.iter().position(|a| a == flag) {
        if idx + 1 < args.len() {
            return args[idx + 1].clone();
        }
    }
    env::var(env_key)
        .unwrap_or_else(|_| panic!("missing {} (arg {} or env {})", flag, flag, env_key))
}
