use sms_core::{
    GatewayRegistry, Headers, HttpStatus, SmsMessage, SmsProcessingResponse, WebhookError,
    WebhookResponse,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Callback invoked once for every inbound message a gateway extracts.
pub type IncomingHandler = Arc<dyn Fn(&SmsMessage) + Send + Sync>;

/// Framework-agnostic webhook processor that handles the core SMS logic
#[derive(Clone)]
pub struct WebhookProcessor {
    registry: GatewayRegistry,
    handler: Option<IncomingHandler>,
}

impl WebhookProcessor {
    pub fn new(registry: GatewayRegistry) -> Self {
        Self {
            registry,
            handler: None,
        }
    }

    pub fn with_handler(mut self, handler: IncomingHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Hand an incoming webhook request to the named gateway.
    ///
    /// The returned response is what the HTTP layer should answer with; extracted
    /// messages have already been passed to the handler, if one is set.
    pub fn process_webhook(
        &self,
        gateway: &str,
        headers: Headers,
        body: &[u8],
    ) -> SmsProcessingResponse {
        match self.process_webhook_internal(gateway, headers, body) {
            Ok(res) => res,
            Err(e) => SmsProcessingResponse::new(self.error_to_response(e)),
        }
    }

    fn process_webhook_internal(
        &self,
        gateway: &str,
        headers: Headers,
        body: &[u8],
    ) -> Result<SmsProcessingResponse, WebhookError> {
        let hook = self
            .registry
            .get(gateway)
            .ok_or_else(|| WebhookError::GatewayNotFound(gateway.to_string()))?;

        let res = hook.process_incoming(&headers, body);
        debug!(
            "{} webhook yielded {} message(s)",
            gateway,
            res.messages.len()
        );

        if let Some(handler) = &self.handler {
            res.messages.iter().for_each(|msg| handler(msg));
        }
        Ok(res)
    }

    fn error_to_response(&self, error: WebhookError) -> WebhookResponse {
        warn!("webhook rejected: {}", error);
        match error {
            WebhookError::GatewayNotFound(_) => {
                WebhookResponse::error(HttpStatus::NotFound, "unknown gateway")
            }
        }
    }
}

/// Helper trait for framework adapters to convert headers
pub trait HeaderConverter {
    type HeaderType;

    fn to_generic_headers(headers: &Self::HeaderType) -> Headers;
}

/// Helper trait for framework adapters to convert responses
pub trait ResponseConverter {
    type ResponseType;

    fn from_webhook_response(response: WebhookResponse) -> Self::ResponseType;
}
