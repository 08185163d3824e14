//! Messages, per-recipient delivery reports and the status taxonomy shared by all gateways.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Which way a message travels relative to the application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Outgoing,
    Incoming,
}

/// Aggregate outcome of a send attempt, set on [`SmsMessageResult::error`].
///
/// A result without an error status means the gateway accepted the message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SmsMessageResultStatus {
    /// Generic failure, including transport errors.
    Error,
    /// The account is misconfigured on the gateway side.
    AccountError,
    /// Too many requests, e.g. a daily limit was reached.
    ExcessiveRequests,
    /// The gateway rejected the credentials.
    Authentication,
    /// The sender name or number was refused.
    InvalidSender,
    /// The account has no credit left.
    NoCredit,
    /// One or more request parameters were invalid.
    Parameters,
}

/// Outcome for a single recipient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SmsMessageReportStatus {
    Queued,
    Delivered,
    Expired,
    Rejected,
    InvalidRecipient,
    ContentInvalid,
    Error,
}

/// Delivery report for one recipient of one send attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SmsDeliveryReport {
    /// Gateway-assigned message id, if any.
    pub message_id: Option<String>,
    pub recipient: String,
    pub status: Option<SmsMessageReportStatus>,
    pub status_message: String,
    #[serde(with = "time::serde::timestamp::option", default)]
    pub status_time: Option<OffsetDateTime>,
    #[serde(with = "time::serde::timestamp::option", default)]
    pub time_queued: Option<OffsetDateTime>,
    #[serde(with = "time::serde::timestamp::option", default)]
    pub time_delivered: Option<OffsetDateTime>,
}

impl SmsDeliveryReport {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            ..Self::default()
        }
    }

    pub fn with_message_id(mut self, id: Option<String>) -> Self {
        self.message_id = id;
        self
    }

    pub fn with_status(mut self, status: SmsMessageReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_status_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = message.into();
        self
    }

    pub fn with_time_delivered(mut self, at: Option<OffsetDateTime>) -> Self {
        self.time_delivered = at;
        self
    }
}

/// Result of a send attempt: the aggregate status plus one report per recipient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SmsMessageResult {
    pub error: Option<SmsMessageResultStatus>,
    pub error_message: Option<String>,
    pub reports: Vec<SmsDeliveryReport>,
    pub credits_balance: Option<f64>,
    pub credits_used: Option<f64>,
}

impl SmsMessageResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failed result carrying only an error status and message.
    pub fn failed(status: SmsMessageResultStatus, message: impl Into<String>) -> Self {
        Self {
            error: Some(status),
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_report(mut self, report: SmsDeliveryReport) -> Self {
        self.reports.push(report);
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Report for a recipient, matched exactly as the gateway reported it.
    pub fn report(&self, recipient: &str) -> Option<&SmsDeliveryReport> {
        self.reports.iter().find(|r| r.recipient == recipient)
    }
}

/// An SMS travelling through a gateway, in either direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmsMessage {
    pub uuid: Uuid,
    pub message: String,
    pub recipients: Vec<String>,
    pub sender: Option<String>,
    pub direction: Direction,
    /// Id of the gateway that sent or received the message.
    pub gateway: Option<String>,
    pub result: Option<SmsMessageResult>,
}

impl SmsMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            message: message.into(),
            recipients: Vec::new(),
            sender: None,
            direction: Direction::Outgoing,
            gateway: None,
            result: None,
        }
    }

    /// Outgoing message to the given recipients.
    pub fn outgoing<I, S>(message: impl Into<String>, recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(message).with_recipients(recipients)
    }

    pub fn with_recipients<I, S>(mut self, recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipients = recipients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sender(mut self, sender: Option<String>) -> Self {
        self.sender = sender;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = Some(gateway.into());
        self
    }

    pub fn with_result(mut self, result: SmsMessageResult) -> Self {
        self.result = Some(result);
        self
    }
}
