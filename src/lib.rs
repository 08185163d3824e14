//! # sevensms
//!
//! Send and receive SMS through the [seven.io](https://www.seven.io) gateway.
//!
//! ## Features
//!
//! - **Outgoing SMS**: one request per message, per-recipient delivery reports
//! - **Fixed status taxonomy**: gateway return codes mapped to result and report statuses
//! - **Balance query**: the gateway's balance payload, passed through as JSON
//! - **Inbound webhook**: `sms_mo` events turned into incoming messages, acknowledged with 204
//! - **Framework agnostic**: generic webhook processor plus an Axum adapter
//! - **Configuration**: files plus `SEVENSMS__*` environment variables
//! - **Observability**: structured logging via `tracing`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sevensms::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = SevenGateway::new(SevenConfig::from_form("your_api_key", "MyShop")?)?;
//!
//!     let result = gateway
//!         .send(&SmsMessage::outgoing("Hello from sevensms!", ["+491701234567"]))
//!         .await;
//!
//!     for report in &result.reports {
//!         println!("{}: {:?}", report.recipient, report.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! use sevensms::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! sevensms::logging::init_tracing(&config.logging)?;
//! println!("Listening on {}", config.server.bind_addr());
//! ```

pub mod config;
pub mod logging;

pub use crate::config::*;

/// Common imports for sevensms usage
pub mod prelude {
    pub use crate::config::{AppConfig, LoggingConfig, ProvidersConfig, ServerConfig};
    pub use crate::logging::init_tracing;
    pub use sms_core::*;
    pub use sms_seven::{SevenConfig, SevenGateway};
    pub use sms_web_generic::WebhookProcessor;
}
