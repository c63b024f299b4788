use async_trait::async_trait;
use ml_proxy::{
    Error, Result,
    models::ImageUpload,
    upstream::{InferenceClient, UpstreamReply},
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Mock inference server for handler tests: records what it is sent and
/// answers with a fixed reply or error.
#[derive(Debug, Clone)]
pub struct MockInferenceClient {
    pub language_payloads: Arc<Mutex<Vec<Value>>>,
    pub images: Arc<Mutex<Vec<ImageUpload>>>,
    pub reply: UpstreamReply,
    pub error: Option<String>,
}

impl MockInferenceClient {
    pub fn new(body: Value) -> Self {
        Self {
            language_payloads: Arc::new(Mutex::new(Vec::new())),
            images: Arc::new(Mutex::new(Vec::new())),
            reply: UpstreamReply { status: 200, body },
            error: None,
        }
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn language_payloads(&self) -> Vec<Value> {
        self.language_payloads.lock().unwrap().clone()
    }

    pub fn images(&self) -> Vec<ImageUpload> {
        self.images.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<UpstreamReply> {
        match &self.error {
            Some(error) => Err(Error::upstream(error.clone())),
            None => Ok(self.reply.clone()),
        }
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn language_model(&self, payload: Value) -> Result<UpstreamReply> {
        self.language_payloads.lock().unwrap().push(payload);
        self.answer()
    }

    async fn conv_model(&self, image: ImageUpload) -> Result<UpstreamReply> {
        self.images.lock().unwrap().push(image);
        self.answer()
    }
}
