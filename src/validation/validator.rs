use serde_json::Value;

use super::RawSubmission;
use crate::NoteDraft;
use crate::RejectReason;
use crate::ValidationConfig;

pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Checks, in order, stopping at the first failure:
    /// 1. `message`, `signature`, `walletAddress` present and not falsy
    /// 2. all three are strings
    /// 3. `message` within `message_max_length` characters
    /// 4. `color`, when given and not falsy, is one of `allowed_colors`
    pub fn validate(
        &self,
        raw: &RawSubmission,
    ) -> Result<NoteDraft, RejectReason> {
        let required = [&raw.message, &raw.signature, &raw.wallet_address];

        if !required.iter().all(|v| is_present(v)) {
            return Err(RejectReason::MissingField);
        }

        let (Some(Value::String(message)), Some(Value::String(proof_token)), Some(Value::String(principal))) =
            (&raw.message, &raw.signature, &raw.wallet_address)
        else {
            return Err(RejectReason::InvalidType);
        };

        if message.chars().count() > self.config.message_max_length {
            return Err(RejectReason::MessageTooLong);
        }

        let color = match &raw.color {
            c if !is_present(c) => self.config.default_color.clone(),
            Some(Value::String(c)) if self.config.is_allowed_color(c) => c.clone(),
            _ => return Err(RejectReason::InvalidColor),
        };

        Ok(NoteDraft {
            message: message.clone(),
            proof_token: proof_token.clone(),
            principal: principal.clone(),
            color,
        })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

/// Falsy JSON values count as absent: null, `false`, zero and `""`.
fn is_present(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
