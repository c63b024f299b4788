use serde_json::Value;

/// A successful (2xx) JSON answer from the inference server.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

pub const LANGUAGE_MODEL_PATH: &str = "/languageModel";
pub const CONV_MODEL_PATH: &str = "/convModel";
