use crate::{
    Result,
    models::{IMAGE_FIELD, ImageUpload, LanguageModelRequest},
    upstream::{CONV_MODEL_PATH, LANGUAGE_MODEL_PATH},
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::debug;

/// The proxy's two routes as the model panels call them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProxyApi: Send + Sync {
    async fn generate_names(&self, request: &LanguageModelRequest) -> Result<Value>;

    async fn classify_image(&self, image: &ImageUpload) -> Result<Value>;
}

/// HTTP client for the proxy. The JSON body is returned whatever the status,
/// so error bodies reach the panel and are judged by their content.
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ProxyApi for ProxyClient {
    async fn generate_names(&self, request: &LanguageModelRequest) -> Result<Value> {
        debug!(
            "Requesting {} names at temperature {}",
            request.number_to_generate, request.temperature
        );

        let response = self
            .client
            .post(self.url(LANGUAGE_MODEL_PATH))
            .json(request)
            .send()
            .await?;

        Ok(response.json().await?)
    }

    async fn classify_image(&self, image: &ImageUpload) -> Result<Value> {
        debug!("Uploading '{}' for classification", image.file_name);

        let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        if let Some(content_type) = &image.content_type {
            part = part.mime_str(content_type)?;
        }

        let response = self
            .client
            .post(self.url(CONV_MODEL_PATH))
            .multipart(Form::new().part(IMAGE_FIELD, part))
            .send()
            .await?;

        Ok(response.json().await?)
    }
}
