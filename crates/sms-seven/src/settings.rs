use serde::{Deserialize, Serialize};
use sms_core::SmsError;

/// Gateway settings as entered by an administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SevenConfig {
    /// API key from the seven.io dashboard (Developer section). Required.
    #[serde(default)]
    pub api_key: String,
    /// Sender name or number shown to recipients. Empty lets the gateway pick.
    #[serde(default)]
    pub from: String,
}

impl SevenConfig {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            from: from.into(),
        }
    }

    /// Build settings from submitted form values. The API key is trimmed, the sender kept verbatim.
    pub fn from_form(api_key: &str, from: &str) -> Result<Self, SmsError> {
        let cfg = Self::new(api_key.trim(), from);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SmsError> {
        if self.api_key.trim().is_empty() {
            return Err(SmsError::Invalid("seven API key is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let cfg = SevenConfig::default();
        assert_eq!(cfg.api_key, "");
        assert_eq!(cfg.from, "");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn form_trims_only_the_api_key() {
        let cfg = SevenConfig::from_form("  abc123\n", " My Shop ").unwrap();
        assert_eq!(cfg.api_key, "abc123");
        assert_eq!(cfg.from, " My Shop ");
    }

    #[test]
    fn form_requires_api_key() {
        let err = SevenConfig::from_form("   ", "shop").unwrap_err();
        assert!(matches!(err, SmsError::Invalid(_)));
    }
}
