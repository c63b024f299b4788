use super::types::*;
use crate::{
    Error, Result,
    config::UpstreamConfig,
    models::{IMAGE_FIELD, ImageUpload},
};
use async_trait::async_trait;
use reqwest::{
    RequestBuilder,
    multipart::{Form, Part},
};
use serde_json::Value;
use tracing::{debug, warn};

/// The inference server as seen by the proxy routes.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn language_model(&self, payload: Value) -> Result<UpstreamReply>;

    async fn conv_model(&self, image: ImageUpload) -> Result<UpstreamReply>;
}

pub struct HttpInferenceClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl HttpInferenceClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(Error::config("Inference client requires upstream.base_url"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, config })
    }

    /// Sends the request built by `build`, retrying transport failures up to
    /// `max_retries` times. A received response ends the loop whatever its status.
    async fn send_with_retry<F>(&self, path: &str, build: F) -> Result<UpstreamReply>
    where
        F: Fn(&str) -> Result<RequestBuilder> + Send + Sync,
    {
        let url = self.config.endpoint(path);
        let mut attempt: u32 = 0;

        loop {
            let request = build(&url)?;
            match request.send().await {
                Ok(response) => return read_reply(response).await,
                Err(e) => {
                    let err = Error::from(e);
                    if err.is_transport() && attempt < self.config.max_retries {
                        attempt += 1;
                        warn!(
                            "Inference server unreachable at {} (attempt {}/{}): {}",
                            url,
                            attempt,
                            self.config.max_retries + 1,
                            err
                        );
                        tokio::time::sleep(self.config.retry_backoff() * attempt).await;
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }
}

async fn read_reply(response: reqwest::Response) -> Result<UpstreamReply> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(Error::UpstreamStatus {
            status: status.as_u16(),
            body: text,
        });
    }

    let body: Value = serde_json::from_str(&text).map_err(|e| {
        Error::upstream(format!("Inference server returned invalid JSON: {}", e))
    })?;

    debug!("Inference server replied with status {}", status);

    Ok(UpstreamReply {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn language_model(&self, payload: Value) -> Result<UpstreamReply> {
        debug!("Forwarding language model payload: {}", payload);

        self.send_with_retry(LANGUAGE_MODEL_PATH, |url| {
            Ok(self.client.post(url).json(&payload))
        })
        .await
    }

    async fn conv_model(&self, image: ImageUpload) -> Result<UpstreamReply> {
        debug!(
            "Forwarding image '{}' ({} bytes)",
            image.file_name,
            image.bytes.len()
        );

        // Form is consumed by send, so each attempt builds its own.
        self.send_with_retry(CONV_MODEL_PATH, |url| {
            let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
            if let Some(content_type) = &image.content_type {
                part = part.mime_str(content_type)?;
            }
            Ok(self
                .client
                .post(url)
                .multipart(Form::new().part(IMAGE_FIELD, part)))
        })
        .await
    }
}
