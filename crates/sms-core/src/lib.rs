//! # SMS Core
//!
//! Core traits and types shared by the sevensms gateway and web crates.
//!
//! This crate provides the fundamental building blocks for SMS operations:
//! - [`SmsGateway`] trait for sending messages and querying the account balance
//! - [`InboundWebhook`] trait for turning a gateway callback into inbound messages
//! - [`SmsMessage`], [`SmsMessageResult`] and [`SmsDeliveryReport`] with a fixed status taxonomy
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SmsGateway, SmsMessage};
//!
//! // Any gateway implements SmsGateway
//! let result = gateway
//!     .send(&SmsMessage::outgoing("Hello world!", ["+491701234567"]))
//!     .await;
//! if let Some(status) = result.error {
//!     eprintln!("send failed: {status:?}");
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

mod message;

pub use message::{
    Direction, SmsDeliveryReport, SmsMessage, SmsMessageReportStatus, SmsMessageResult,
    SmsMessageResultStatus,
};

/// Errors that can occur during SMS operations
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// HTTP communication error
    #[error("http error: {0}")]
    Http(String),
    /// Authentication/authorization error
    #[error("authentication error: {0}")]
    Auth(String),
    /// Invalid request parameters or settings
    #[error("invalid request: {0}")]
    Invalid(String),
    /// SMS gateway returned something we could not use
    #[error("provider error: {0}")]
    Provider(String),
}

/// Web-specific error types for webhook processing
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("gateway not found: {0}")]
    GatewayNotFound(String),
}

/// HTTP status code for web responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok = 200,
    NoContent = 204,
    NotFound = 404,
}

impl HttpStatus {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// Generic webhook response that can be converted to any framework's response type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: HttpStatus,
    pub body: String,
    /// Empty when there is no body.
    pub content_type: String,
}

impl WebhookResponse {
    /// Empty acknowledgment.
    pub fn no_content() -> Self {
        Self {
            status: HttpStatus::NoContent,
            body: String::new(),
            content_type: String::new(),
        }
    }

    pub fn error(status: HttpStatus, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
            content_type: "application/json".to_string(),
        }
    }
}

/// What a gateway extracted from one webhook request, plus the reply to send back.
#[derive(Debug, Clone)]
pub struct SmsProcessingResponse {
    pub messages: Vec<SmsMessage>,
    pub response: WebhookResponse,
}

impl SmsProcessingResponse {
    pub fn new(response: WebhookResponse) -> Self {
        Self {
            messages: Vec::new(),
            response,
        }
    }

    pub fn with_messages(mut self, messages: Vec<SmsMessage>) -> Self {
        self.messages = messages;
        self
    }
}

/// Static description of what a gateway supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayDefinition {
    /// Stable gateway key, e.g. "seven".
    pub id: &'static str,
    pub label: &'static str,
    pub credit_balance_available: bool,
    pub incoming: bool,
    pub incoming_route: bool,
    pub outgoing_message_max_recipients: usize,
    pub reports_pull: bool,
    pub reports_push: bool,
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    fn definition(&self) -> &GatewayDefinition;

    /// Send one message to all of its recipients.
    ///
    /// Gateway and transport failures are reported through the returned result,
    /// never as an `Err`.
    async fn send(&self, sms: &SmsMessage) -> SmsMessageResult;

    /// Account balance as reported by the gateway, undecoded beyond JSON.
    async fn credit_balance(&self) -> Result<serde_json::Value, SmsError>;
}

/// Lightweight header representation to avoid tying the core to any HTTP framework.
pub type Headers = Vec<(String, String)>;

/// Gateway-specific inbound webhook interface.
pub trait InboundWebhook: Send + Sync {
    /// Stable gateway key, e.g. "seven".
    fn gateway_id(&self) -> &'static str;

    /// Turn one incoming HTTP request (headers + raw body) into inbound messages and a reply.
    fn process_incoming(&self, headers: &Headers, body: &[u8]) -> SmsProcessingResponse;
}

/// Runtime registry so apps can look up incoming-capable gateways by id.
#[derive(Default, Clone)]
pub struct GatewayRegistry {
    map: Arc<HashMap<&'static str, Arc<dyn InboundWebhook>>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self {
            map: Arc::new(HashMap::new()),
        }
    }

    pub fn with(mut self, hook: Arc<dyn InboundWebhook>) -> Self {
        let mut m = (*self.map).clone();
        m.insert(hook.gateway_id(), hook);
        self.map = Arc::new(m);
        self
    }

    pub fn get(&self, gateway: &str) -> Option<Arc<dyn InboundWebhook>> {
        self.map.get(gateway).cloned()
    }
}
