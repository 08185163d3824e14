//! Example showing how to integrate sevensms with any web framework
//! This demonstrates the framework-agnostic approach using the generic processor

use sms_core::{GatewayRegistry, SmsMessage};
use sms_seven::{SevenConfig, SevenGateway};
use sms_web_generic::WebhookProcessor;
use std::sync::Arc;

// Simulated request from any web framework
struct GenericRequest {
    pub gateway: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

// Simulated response for any web framework
struct GenericResponse {
    pub status: u16,
    pub body: String,
}

impl From<sms_core::WebhookResponse> for GenericResponse {
    fn from(response: sms_core::WebhookResponse) -> Self {
        Self {
            status: response.status.as_u16(),
            body: response.body,
        }
    }
}

/// This is how you would integrate sevensms into ANY web framework
fn handle_sms_webhook(processor: &WebhookProcessor, req: GenericRequest) -> GenericResponse {
    let res = processor.process_webhook(&req.gateway, req.headers, &req.body);
    res.response.into()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== SMS Webhook Generic Integration Example ===");

    // Set up the gateway once at startup
    let seven = SevenGateway::new(SevenConfig::new("your_api_key", ""))?;
    let processor = WebhookProcessor::new(GatewayRegistry::new().with(Arc::new(seven)))
        .with_handler(Arc::new(|sms: &SmsMessage| {
            println!("Inbound: {:?} says {:?}", sms.sender, sms.message);
        }));

    // Simulate an inbound SMS callback from seven
    let request = GenericRequest {
        gateway: "seven".to_string(),
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: br#"{"webhook_event":"sms_mo","data":{"id":"681590","sender":"491716992343","system":"4915126716517","text":"Hello World","time":"1605878104"}}"#.to_vec(),
    };

    let response = handle_sms_webhook(&processor, request);

    println!("Response Status: {}", response.status);
    println!("Response Body: {:?}", response.body);
    Ok(())
}
