//! Inbound SMS webhook. seven passes exactly one event per request.

use serde_json::Value;
use sms_core::{
    Direction, Headers, InboundWebhook, SmsDeliveryReport, SmsMessage, SmsMessageResult,
    SmsProcessingResponse, WebhookResponse,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::wire::SevenInbound;
use crate::{SevenGateway, GATEWAY_ID};

const EVENT_SMS_MO: &str = "sms_mo";

impl InboundWebhook for SevenGateway {
    fn gateway_id(&self) -> &'static str {
        GATEWAY_ID
    }

    fn process_incoming(&self, _headers: &Headers, body: &[u8]) -> SmsProcessingResponse {
        let res = SmsProcessingResponse::new(WebhookResponse::no_content());
        match parse_event(body) {
            Some(msg) => res.with_messages(vec![msg]),
            None => res,
        }
    }
}

fn parse_event(body: &[u8]) -> Option<SmsMessage> {
    let json: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            warn!("Ignoring undecodable seven webhook body: {}", e);
            return None;
        }
    };

    let event = json.get("webhook_event").and_then(Value::as_str);
    if event != Some(EVENT_SMS_MO) {
        debug!("Ignoring seven webhook event {:?}", event);
        return None;
    }

    // A missing or non-object `data` still yields a message, just an empty one.
    let data = match json.get("data").cloned() {
        Some(data) => serde_json::from_value::<SevenInbound>(data).unwrap_or_else(|e| {
            warn!("Invalid seven sms_mo data: {}", e);
            SevenInbound::default()
        }),
        None => {
            warn!("seven sms_mo event without data");
            SevenInbound::default()
        }
    };

    let delivered = data
        .time
        .and_then(|t| OffsetDateTime::from_unix_timestamp(t).ok());

    info!("Received inbound SMS via seven with id {:?}", data.id);

    let report = SmsDeliveryReport::default()
        .with_message_id(data.id)
        .with_time_delivered(delivered);

    Some(
        SmsMessage::new(data.text.unwrap_or_default())
            .with_direction(Direction::Incoming)
            .with_gateway(GATEWAY_ID)
            .with_sender(data.sender)
            .with_recipients(data.system)
            .with_result(SmsMessageResult::new().with_report(report)),
    )
}
