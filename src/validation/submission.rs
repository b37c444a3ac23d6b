use serde::Deserialize;
use serde_json::Value;

/// A submission exactly as the caller sent it.
///
/// Every field is kept as an untyped JSON value so that a missing field and
/// a field of the wrong type can be told apart during validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub signature: Option<Value>,
    #[serde(default)]
    pub wallet_address: Option<Value>,
    #[serde(default)]
    pub color: Option<Value>,
    /// Informational flag from clients; not interpreted
    #[serde(default)]
    pub on_chain: Option<Value>,
}

impl RawSubmission {
    /// Text-only submission, mostly useful to embedders and tests.
    pub fn new(
        message: impl Into<String>,
        signature: impl Into<String>,
        wallet_address: impl Into<String>,
    ) -> Self {
        Self {
            message: Some(Value::String(message.into())),
            signature: Some(Value::String(signature.into())),
            wallet_address: Some(Value::String(wallet_address.into())),
            color: None,
            on_chain: None,
        }
    }

    pub fn with_color(
        mut self,
        color: impl Into<String>,
    ) -> Self {
        self.color = Some(Value::String(color.into()));
        self
    }
}
