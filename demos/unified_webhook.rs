//! Run a tiny Axum server that exposes the webhook endpoint for inbound SMS.
//! Settings come from `config/*.toml` and `SEVENSMS__*` environment variables.

use axum::{routing::post, Router};
use sevensms::prelude::*;
use sms_web_axum::{unified_webhook, AppState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    let seven_config = config.providers.seven.clone().unwrap_or_default();
    seven_config.validate()?;
    let seven = SevenGateway::new(seven_config)?;

    let processor = WebhookProcessor::new(GatewayRegistry::new().with(Arc::new(seven)))
        .with_handler(Arc::new(|sms: &SmsMessage| {
            info!(
                "inbound SMS from {:?}: {}",
                sms.sender.as_deref().unwrap_or("unknown"),
                sms.message
            );
        }));

    let app = Router::new()
        .route("/webhooks/{gateway}", post(unified_webhook))
        .with_state(AppState { processor });

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
