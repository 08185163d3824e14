//! # seven.io SMS gateway
//!
//! [seven.io](https://www.seven.io) backend for sevensms.
//!
//! ## Features
//!
//! - Send one message to many recipients with per-recipient delivery reports
//! - Gateway return codes mapped to the shared result and report statuses
//! - Account balance query
//! - Inbound SMS webhook (`sms_mo` events)
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SmsGateway, SmsMessage};
//! use sms_seven::{SevenConfig, SevenGateway};
//!
//! let gateway = SevenGateway::new(SevenConfig::from_form("api-key", "MyShop")?)?;
//! let result = gateway
//!     .send(&SmsMessage::outgoing("Hello from seven!", ["+491701234567"]))
//!     .await;
//! println!("{:?}: {:?}", result.error, result.error_message);
//! ```

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sms_core::{
    GatewayDefinition, SmsDeliveryReport, SmsError, SmsGateway, SmsMessage,
    SmsMessageReportStatus, SmsMessageResult, SmsMessageResultStatus,
};
use std::time::Duration;
use tracing::{debug, error, info, warn};

mod settings;
mod status;
mod webhook;
mod wire;

pub use settings::SevenConfig;

use wire::{SevenSendRequest, SevenSendResponse};

pub const GATEWAY_ID: &str = "seven";

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://gateway.seven.io/api";

/// Longest text the gateway accepts, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 1520;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Identifies this client to the gateway in the `SentWith` header.
const SENT_WITH: &str = "sevensms";

static DEFINITION: GatewayDefinition = GatewayDefinition {
    id: GATEWAY_ID,
    label: "Seven",
    credit_balance_available: true,
    incoming: true,
    incoming_route: true,
    outgoing_message_max_recipients: 10_000,
    reports_pull: true,
    reports_push: true,
};

/// seven.io REST client.
#[derive(Clone, Debug)]
pub struct SevenGateway {
    config: SevenConfig,
    /// API base URL; override for testing/mocking.
    base_url: String,
    http: reqwest::Client,
}

impl SevenGateway {
    pub fn new(config: SevenConfig) -> Result<Self, SmsError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        config: SevenConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, SmsError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| SmsError::Http(e.to_string()))?;
        Ok(Self::with_client(config, http, base_url))
    }

    /// Use a caller-provided HTTP client as is.
    pub fn with_client(
        config: SevenConfig,
        http: reqwest::Client,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            config,
            base_url: base_url.into(),
            http,
        }
    }

    pub fn config(&self) -> &SevenConfig {
        &self.config
    }

    async fn request<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, SmsError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        debug!("seven {} {}", method, url);

        let mut req = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header("SentWith", SENT_WITH)
            .header("X-Api-Key", &self.config.api_key);
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await.map_err(|e| SmsError::Http(e.to_string()))?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SmsError::Auth(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SmsError::Http(format!("HTTP {}: {}", status, body)));
        }

        res.json::<T>()
            .await
            .map_err(|e| SmsError::Provider(format!("unexpected response body: {}", e)))
    }
}

/// Report the `+` form of a recipient if that is how it appeared in the request.
fn normalize_recipient(recipient: String, to: &str) -> String {
    let prefixed = format!("+{}", recipient);
    if to.contains(&prefixed) {
        prefixed
    } else {
        recipient
    }
}

fn build_result(response: SevenSendResponse, to: &str) -> SmsMessageResult {
    let (error, message) = status::result_status(response.success);

    let reports = response
        .messages
        .into_iter()
        .map(|msg| {
            let status = status::report_status(msg.error, msg.success);
            let recipient = normalize_recipient(msg.recipient.unwrap_or_default(), to);
            SmsDeliveryReport::new(recipient)
                .with_message_id(msg.id)
                .with_status(status)
                .with_status_message(msg.error_text.unwrap_or_default())
        })
        .collect();

    SmsMessageResult {
        error,
        error_message: Some(message.to_string()),
        reports,
        credits_balance: response.balance,
        credits_used: response.total_price,
    }
}

#[async_trait]
impl SmsGateway for SevenGateway {
    fn definition(&self) -> &GatewayDefinition {
        &DEFINITION
    }

    async fn send(&self, sms: &SmsMessage) -> SmsMessageResult {
        let to = sms.recipients.join(",");

        if sms.message.chars().count() > MAX_MESSAGE_LENGTH {
            warn!("Refusing to send {}: text exceeds {} characters", sms.uuid, MAX_MESSAGE_LENGTH);
            return SmsMessageResult::new().with_report(
                SmsDeliveryReport::new(to)
                    .with_status(SmsMessageReportStatus::ContentInvalid)
                    .with_status_message(format!(
                        "Maximum message length is {} characters.",
                        MAX_MESSAGE_LENGTH
                    )),
            );
        }

        info!("Sending SMS {} via seven to {} recipient(s)", sms.uuid, sms.recipients.len());

        let payload = SevenSendRequest {
            from: &self.config.from,
            to: &to,
            text: &sms.message,
            json: 1,
        };
        let sent = self.request(Method::POST, "sms", Some(&payload)).await;
        let response: SevenSendResponse = match sent {
            Ok(res) => res,
            Err(e) => {
                error!("seven send failed for {}: {}", sms.uuid, e);
                return SmsMessageResult::failed(SmsMessageResultStatus::Error, e.to_string());
            }
        };

        debug!("seven returned code {} for {}", response.success, sms.uuid);
        let result = build_result(response, &to);
        if result.is_error() {
            warn!("seven rejected {}: {:?}", sms.uuid, result.error_message);
        }
        result
    }

    async fn credit_balance(&self) -> Result<serde_json::Value, SmsError> {
        self.request::<(), _>(Method::POST, "balance", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn gateway(server: &MockServer) -> SevenGateway {
        SevenGateway::with_base_url(SevenConfig::new("test-key", "MyShop"), server.base_url())
            .unwrap()
    }

    #[test]
    fn definition() {
        let gw = SevenGateway::new(SevenConfig::new("k", "")).unwrap();
        let def = gw.definition();
        assert_eq!(def.id, "seven");
        assert_eq!(def.outgoing_message_max_recipients, 10_000);
        assert!(def.credit_balance_available && def.incoming && def.reports_push);
    }

    #[test]
    fn recipient_normalization() {
        let to = "+491701234567,491709876543";
        assert_eq!(normalize_recipient("491701234567".into(), to), "+491701234567");
        assert_eq!(normalize_recipient("491709876543".into(), to), "491709876543");
    }

    #[tokio::test]
    async fn send_maps_response_to_result() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/sms")
                    .header("x-api-key", "test-key")
                    .header("sentwith", "sevensms")
                    .json_body(json!({
                        "from": "MyShop",
                        "to": "+491701234567,491709876543",
                        "text": "Hello",
                        "json": 1
                    }));
                then.status(200).json_body(json!({
                    "success": "101",
                    "total_price": 0.075,
                    "balance": 42.5,
                    "debug": "false",
                    "messages": [
                        {
                            "id": "1001",
                            "recipient": "491701234567",
                            "error": null,
                            "error_text": null,
                            "success": true
                        },
                        {
                            "id": null,
                            "recipient": "491709876543",
                            "error": "202",
                            "error_text": "Invalid recipient",
                            "success": false
                        }
                    ]
                }));
            })
            .await;

        let sms = SmsMessage::outgoing("Hello", ["+491701234567", "491709876543"]);
        let result = gateway(&server).send(&sms).await;
        mock.assert_async().await;

        assert_eq!(result.error, None);
        assert_eq!(result.error_message.as_deref(), Some("PARTIALLY_DELIVERED"));
        assert_eq!(result.credits_balance, Some(42.5));
        assert_eq!(result.credits_used, Some(0.075));
        assert_eq!(result.reports.len(), 2);

        let ok = result.report("+491701234567").expect("plus form");
        assert_eq!(ok.status, Some(SmsMessageReportStatus::Queued));
        assert_eq!(ok.message_id.as_deref(), Some("1001"));
        assert_eq!(ok.status_message, "");

        let bad = result.report("491709876543").expect("bare form");
        assert_eq!(bad.status, Some(SmsMessageReportStatus::InvalidRecipient));
        assert_eq!(bad.message_id, None);
        assert_eq!(bad.status_message, "Invalid recipient");
    }

    #[tokio::test]
    async fn overlong_text_never_reaches_the_gateway() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/sms");
                then.status(200).json_body(json!({ "success": "100", "messages": [] }));
            })
            .await;

        let text = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        let sms = SmsMessage::outgoing(text, ["+491701234567", "4917000"]);
        let result = gateway(&server).send(&sms).await;

        assert_eq!(mock.hits_async().await, 0);
        assert_eq!(result.error, None);
        assert_eq!(result.reports.len(), 1);
        let report = &result.reports[0];
        assert_eq!(report.recipient, "+491701234567,4917000");
        assert_eq!(report.status, Some(SmsMessageReportStatus::ContentInvalid));
        assert_eq!(report.status_message, "Maximum message length is 1520 characters.");
    }

    #[tokio::test]
    async fn length_limit_counts_characters_not_bytes() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/sms");
                then.status(200).json_body(json!({ "success": "100", "messages": [] }));
            })
            .await;

        let sms = SmsMessage::outgoing("ä".repeat(MAX_MESSAGE_LENGTH), ["491701234567"]);
        let result = gateway(&server).send(&sms).await;

        mock.assert_async().await;
        assert_eq!(result.error_message.as_deref(), Some("DELIVERED"));
    }

    #[tokio::test]
    async fn gateway_error_codes_become_result_statuses() {
        let cases = [
            (201, SmsMessageResultStatus::InvalidSender, "INVALID_SENDER"),
            (500, SmsMessageResultStatus::NoCredit, "INSUFFICIENT_BALANCE"),
            (900, SmsMessageResultStatus::Authentication, "AUTHENTICATION_ERROR"),
            (903, SmsMessageResultStatus::AccountError, "SERVER_IP_IS_WRONG"),
            (12, SmsMessageResultStatus::Error, "UNHANDLED_ERROR"),
        ];
        for (code, status, message) in cases {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(POST).path("/sms");
                    then.status(200).json_body(json!({ "success": code, "messages": [] }));
                })
                .await;

            let result = gateway(&server)
                .send(&SmsMessage::outgoing("hi", ["491701234567"]))
                .await;
            assert_eq!(result.error, Some(status), "code {code}");
            assert_eq!(result.error_message.as_deref(), Some(message));
            assert!(result.reports.is_empty());
        }
    }

    #[tokio::test]
    async fn rejected_recipients() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/sms");
                then.status(200).json_body(json!({
                    "success": 402,
                    "messages": [
                        { "id": "1", "recipient": "4911", "error": 402, "error_text": "reload lock", "success": false },
                        { "id": "2", "recipient": "4922", "error": 305, "error_text": "bad text", "success": false },
                        { "id": "3", "recipient": "4933", "error": null, "error_text": null, "success": false }
                    ]
                }));
            })
            .await;

        let result = gateway(&server)
            .send(&SmsMessage::outgoing("hi", ["4911", "4922", "4933"]))
            .await;

        assert_eq!(result.error, Some(SmsMessageResultStatus::Parameters));
        assert_eq!(result.error_message.as_deref(), Some("PREVENTED_BY_RELOAD_LOCK"));
        let statuses: Vec<_> = result.reports.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                Some(SmsMessageReportStatus::Rejected),
                Some(SmsMessageReportStatus::ContentInvalid),
                Some(SmsMessageReportStatus::Error),
            ]
        );
    }

    #[tokio::test]
    async fn http_failure_becomes_error_result() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/sms");
                then.status(503).body("maintenance");
            })
            .await;

        let result = gateway(&server)
            .send(&SmsMessage::outgoing("hi", ["491701234567"]))
            .await;

        assert_eq!(result.error, Some(SmsMessageResultStatus::Error));
        let message = result.error_message.unwrap();
        assert!(message.contains("503"), "{message}");
        assert!(result.reports.is_empty());
    }

    #[tokio::test]
    async fn unreachable_gateway_becomes_error_result() {
        let gw = SevenGateway::with_base_url(SevenConfig::new("k", ""), "http://127.0.0.1:1")
            .unwrap();
        let result = gw.send(&SmsMessage::outgoing("hi", ["491701234567"])).await;

        assert_eq!(result.error, Some(SmsMessageResultStatus::Error));
        assert!(!result.error_message.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn balance_is_returned_verbatim() {
        let server = MockServer::start_async().await;
        let payload = json!({ "amount": 12.34, "currency": "EUR" });
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/balance").header("x-api-key", "test-key");
                then.status(200).json_body(payload.clone());
            })
            .await;

        let balance = gateway(&server).credit_balance().await.unwrap();
        mock.assert_async().await;
        assert_eq!(balance, payload);
    }

    #[tokio::test]
    async fn bare_number_balance_is_passed_through() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/balance");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("12.5");
            })
            .await;

        let balance = gateway(&server).credit_balance().await.unwrap();
        mock.assert_async().await;
        assert_eq!(balance, json!(12.5));
    }

    #[tokio::test]
    async fn balance_with_bad_key_is_auth_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/balance");
                then.status(401);
            })
            .await;

        let err = gateway(&server).credit_balance().await.unwrap_err();
        assert!(matches!(err, SmsError::Auth(_)));
    }
}
