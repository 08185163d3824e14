//! Gateway return codes and how they map onto the shared status taxonomy.

use sms_core::{SmsMessageReportStatus, SmsMessageResultStatus};

/// Aggregate status for the top-level `success` code of a `/sms` response.
///
/// 100 and 101 are successes and carry no error status.
pub(crate) fn result_status(code: i64) -> (Option<SmsMessageResultStatus>, &'static str) {
    use SmsMessageResultStatus::*;

    match code {
        100 => (None, "DELIVERED"),
        101 => (None, "PARTIALLY_DELIVERED"),
        201 => (Some(InvalidSender), "INVALID_SENDER"),
        202 | 301 => (Some(Parameters), "INVALID_RECIPIENT"),
        305 => (Some(Parameters), "CONTENT_INVALID"),
        401 => (Some(Parameters), "CONTENT_TOO_LONG"),
        402 => (Some(Parameters), "PREVENTED_BY_RELOAD_LOCK"),
        403 => (Some(ExcessiveRequests), "DAILY_NUMBER_LIMIT_REACHED"),
        500 => (Some(NoCredit), "INSUFFICIENT_BALANCE"),
        600 => (Some(Error), "CARRIER_DELIVERY_FAILED"),
        700 => (Some(Error), "UNKNOWN_ERROR"),
        900 => (Some(Authentication), "AUTHENTICATION_ERROR"),
        903 => (Some(AccountError), "SERVER_IP_IS_WRONG"),
        _ => (Some(Error), "UNHANDLED_ERROR"),
    }
}

/// Per-recipient status. The entry's error code wins over its success flag.
pub(crate) fn report_status(error: Option<i64>, success: bool) -> SmsMessageReportStatus {
    use SmsMessageReportStatus::*;

    match error {
        Some(202 | 301) => InvalidRecipient,
        Some(305 | 401) => ContentInvalid,
        Some(402 | 403 | 500 | 600) => Rejected,
        _ if success => Queued,
        _ => Error,
    }
}
